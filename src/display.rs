//! Core display operations
//!
//! [`Display`] owns the interface, the [`Config`] and, once initialized, the
//! [`PlaneCompositor`] holding both frame planes. It walks the controller
//! through a fixed sequence on every [`Display::display`] call:
//!
//! ```text
//! Uninitialized -> Idle -> PoweredUp -> Transferring -> Refreshing -> PoweredDown
//!                           ^                                            |
//!                           +--------------------------------------------+
//! ```
//!
//! A bus failure aborts the sequence where it happened and leaves the state
//! at [`DriverState::PoweredUp`] or [`DriverState::Transferring`]. The caller
//! can retry [`Display::power_down`] or start a fresh [`Display::display`].
//!
//! Every operation blocks the caller, including the long settle after a
//! refresh. There is no cancellation.

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::command::{
    BOOSTER_SOFT_START, CHARGE_DISCHARGE_INTERVAL, DATA_TRANSFER_1, DATA_TRANSFER_2, DEEP_SLEEP,
    DEEP_SLEEP_CHECK, DISPLAY_REFRESH, PANEL_SETTING, PLL, POWER_OFF, POWER_ON, POWER_SETTING,
    RESOLUTION, VCM_DC_SETTING,
};
use crate::compositor::PlaneCompositor;
use crate::plane::PixelPlane;
use crate::config::{Config, Rotation};
use crate::error::Error;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Driver lifecycle state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverState {
    /// Planes not allocated, pins not configured
    #[default]
    Uninitialized,
    /// Initialized and reset, nothing sent yet
    Idle,
    /// Power-up sequence complete
    PoweredUp,
    /// Streaming planes into controller RAM
    Transferring,
    /// Refresh issued, waiting for the panel
    Refreshing,
    /// Power-down sequence complete
    PoweredDown,
}

/// IL0373 driver
///
/// Draw through [`planes_mut`](Self::planes_mut), then push the frame with
/// [`display`](Self::display).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    state: DriverState,
    /// Allocated by `initialize()`
    planes: Option<PlaneCompositor>,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing touches the hardware until [`initialize`](Self::initialize).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: DriverState::Uninitialized,
            planes: None,
        }
    }

    /// Configure control pins, allocate both planes and pulse reset
    ///
    /// The black role is bound to the first plane and the color role to the
    /// second, both inverted. Calling this again discards the current frame.
    /// The planes are only installed once the reset succeeds.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.configure().map_err(Error::Interface)?;

        let dims = self.config.dimensions;
        let mut planes = PlaneCompositor::new(dims.width, dims.height);
        planes.set_rotation(self.config.rotation);

        self.hardware_reset(delay)?;
        self.planes = Some(planes);
        self.state = DriverState::Idle;
        log::debug!("il0373: initialized {}x{}", dims.width, dims.height);
        Ok(())
    }

    /// Optionally reset, then power down
    ///
    /// Leaves the panel in a known low-power state without allocating planes.
    pub fn begin<D: DelayNs>(&mut self, delay: &mut D, reset: bool) -> DisplayResult<I> {
        if reset {
            self.hardware_reset(delay)?;
        }
        self.power_down()
    }

    /// Pulse the reset line, if one is wired
    pub fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface
            .reset(delay, self.config.reset_hold_ms)
            .map_err(Error::Interface)
    }

    /// Send one framed command
    ///
    /// See [`DisplayInterface::command`] for the framing.
    pub fn command(&mut self, opcode: u8, payload: Option<&[u8]>, release: bool) -> DisplayResult<I> {
        log::trace!("il0373: command {opcode:#04x} payload {payload:02x?}");
        self.interface
            .command(opcode, payload, release)
            .map_err(Error::Interface)
    }

    /// Block until the panel is ready
    ///
    /// Without a busy pin this is a fixed sleep; see [`DisplayInterface::busy_wait`].
    pub fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.busy_wait(delay).map_err(Error::Interface)
    }

    /// Reset and run the power-on register sequence
    pub fn power_up<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("il0373: power up");
        self.hardware_reset(delay)?;
        self.busy_wait(delay)?;

        let config = self.config;
        self.command(POWER_SETTING, Some(&config.power_setting), true)?;
        self.command(BOOSTER_SOFT_START, Some(&config.booster_soft_start), true)?;
        self.command(POWER_ON, None, true)?;
        self.busy_wait(delay)?;
        delay.delay_ms(config.power_on_settle_ms);

        self.command(PANEL_SETTING, Some(&[config.panel_setting]), true)?;
        self.command(
            CHARGE_DISCHARGE_INTERVAL,
            Some(&[config.vcom_data_interval]),
            true,
        )?;
        self.command(PLL, Some(&[config.pll]), true)?;

        let width = config.dimensions.width;
        let height = config.dimensions.height;
        self.command(
            RESOLUTION,
            Some(&[(width & 0xFF) as u8, (height >> 8) as u8, (height & 0xFF) as u8]),
            true,
        )?;
        self.command(VCM_DC_SETTING, Some(&[config.vcm_dc]), true)?;
        delay.delay_ms(config.init_settle_ms);

        self.state = DriverState::PoweredUp;
        Ok(())
    }

    /// Disable VCOM and the charge pump, then power off
    pub fn power_down(&mut self) -> DisplayResult<I> {
        log::debug!("il0373: power down");
        self.command(
            CHARGE_DISCHARGE_INTERVAL,
            Some(&[self.config.vcom_data_interval_off]),
            true,
        )?;
        self.command(VCM_DC_SETTING, Some(&[self.config.vcm_dc_off]), true)?;
        self.command(POWER_OFF, None, true)?;
        self.state = DriverState::PoweredDown;
        Ok(())
    }

    /// Enter deep sleep
    ///
    /// Only a reset wakes the controller again.
    pub fn deep_sleep(&mut self) -> DisplayResult<I> {
        log::debug!("il0373: deep sleep");
        self.command(DEEP_SLEEP, Some(&[DEEP_SLEEP_CHECK]), true)?;
        self.state = DriverState::PoweredDown;
        Ok(())
    }

    /// Push both planes to the panel, refresh and power down
    ///
    /// The color plane is only sent when it is a distinct buffer; a
    /// monochrome layout sends the black plane alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Uninitialized`] before [`initialize`](Self::initialize).
    /// Bus failures abort the frame part way through.
    pub fn display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if self.planes.is_none() {
            return Err(Error::Uninitialized);
        }
        self.power_up(delay)?;
        self.transfer(delay)?;
        self.update(delay)?;
        self.power_down()
    }

    fn transfer<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.state = DriverState::Transferring;
        let planes = self.planes.as_ref().ok_or(Error::Uninitialized)?;
        let dual = planes.color_plane().is_some();

        log::debug!("il0373: writing black plane");
        self.command(DATA_TRANSFER_1, None, false)?;
        self.stream_plane(|planes| Some(planes.black_plane()))?;
        delay.delay_ms(self.config.plane_settle_ms);

        if dual {
            log::debug!("il0373: writing color plane");
            self.command(DATA_TRANSFER_2, None, false)?;
            delay.delay_ms(self.config.bank_switch_ms);
            self.stream_plane(PlaneCompositor::color_plane)?;
        }
        Ok(())
    }

    /// Stream one plane into the command left open by a data-transfer opcode,
    /// then release CS
    fn stream_plane(
        &mut self,
        select: fn(&PlaneCompositor) -> Option<&PixelPlane>,
    ) -> DisplayResult<I> {
        if let Some(plane) = self.planes.as_ref().and_then(select) {
            self.interface
                .send_data(plane.buffer())
                .map_err(Error::Interface)?;
        }
        self.interface.release().map_err(Error::Interface)
    }

    /// Refresh the panel from controller RAM
    ///
    /// Holds for the post-refresh settle after busy clears; the panel is not
    /// safe to command before then.
    pub fn update<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("il0373: refresh");
        self.state = DriverState::Refreshing;
        self.command(DISPLAY_REFRESH, None, true)?;
        delay.delay_ms(self.config.refresh_settle_ms);
        self.busy_wait(delay)?;

        log::info!(
            "il0373: holding {} ms after refresh",
            self.config.post_refresh_settle_ms
        );
        delay.delay_ms(self.config.post_refresh_settle_ms);
        log::info!("il0373: refresh settled");
        Ok(())
    }

    /// Set rotation from its numeric form (0..=3, quarter turns clockwise)
    ///
    /// Applies to both planes when they exist, and to the planes allocated by
    /// the next [`initialize`](Self::initialize).
    pub fn set_rotation(&mut self, value: u8) -> DisplayResult<I> {
        let rotation = Rotation::try_from(value).map_err(|_| Error::InvalidRotation { value })?;
        self.config.rotation = rotation;
        if let Some(planes) = self.planes.as_mut() {
            planes.set_rotation(rotation);
        }
        Ok(())
    }

    /// Current rotation
    ///
    /// Once initialized this is the rotation the planes draw with, including
    /// one set directly on [`planes_mut`](Self::planes_mut).
    pub fn rotation(&self) -> Rotation {
        self.planes
            .as_ref()
            .map_or(self.config.rotation, PlaneCompositor::rotation)
    }

    /// Logical `(width, height)` under the current rotation
    pub fn size(&self) -> (u16, u16) {
        let dims = self.config.dimensions;
        if self.rotation().is_odd() {
            (dims.height, dims.width)
        } else {
            (dims.width, dims.height)
        }
    }

    /// Replace the black plane contents with an image
    ///
    /// `pixels` is row-major, one byte per pixel: nonzero is black ink, zero
    /// is white. The image must match [`size`](Self::size). Accent ink is
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] or [`Error::BufferTooSmall`] before
    /// touching either plane.
    pub fn display_image(&mut self, width: u16, height: u16, pixels: &[u8]) -> DisplayResult<I> {
        let (expected_width, expected_height) = self.size();
        if width != expected_width || height != expected_height {
            return Err(Error::DimensionMismatch {
                expected_width,
                expected_height,
                width,
                height,
            });
        }
        let required = width as usize * height as usize;
        if pixels.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: pixels.len(),
            });
        }
        let planes = self.planes.as_mut().ok_or(Error::Uninitialized)?;

        planes.fill(Color::White);
        for (index, &value) in pixels[..required].iter().enumerate() {
            if value != 0 {
                let x = (index % width as usize) as i32;
                let y = (index / width as usize) as i32;
                planes.pixel(x, y, Color::Black);
            }
        }
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Get display configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drawing surface, once initialized
    pub fn planes(&self) -> Option<&PlaneCompositor> {
        self.planes.as_ref()
    }

    /// Mutable drawing surface, once initialized
    pub fn planes_mut(&mut self) -> Option<&mut PlaneCompositor> {
        self.planes.as_mut()
    }

    /// Borrow the interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Release the interface
    pub fn release(self) -> I {
        self.interface
    }
}
