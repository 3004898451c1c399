//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};

/// Display dimensions in the panel's native orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (source outputs)
    pub width: u16,
    /// Height in pixels (gate outputs)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is 0, > MAX_SOURCE_OUTPUTS, or not a multiple of 8
    /// - height is 0 or > MAX_GATE_OUTPUTS
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_SOURCE_OUTPUTS || !width.is_multiple_of(8) {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_GATE_OUTPUTS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Size of one plane in bytes
    pub fn buffer_size(&self) -> usize {
        (self.width as usize * self.height as usize) / 8
    }
}

/// Display rotation relative to native orientation (clockwise)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0 = 0,
    /// Rotate 90 degrees clockwise
    Rotate90 = 1,
    /// Rotate 180 degrees
    Rotate180 = 2,
    /// Rotate 270 degrees clockwise
    Rotate270 = 3,
}

impl Rotation {
    /// Whether width and height swap under this rotation
    pub fn is_odd(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

impl TryFrom<u8> for Rotation {
    type Error = BuilderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Rotate0),
            1 => Ok(Self::Rotate90),
            2 => Ok(Self::Rotate180),
            3 => Ok(Self::Rotate270),
            _ => Err(BuilderError::InvalidRotation { value }),
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation as u8
    }
}

/// Display configuration
///
/// Register values and settle times for the IL0373 power and refresh sequences.
/// Use `Builder` to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Display rotation
    pub rotation: Rotation,
    /// Power setting (5 bytes for command 0x01)
    pub power_setting: [u8; 5],
    /// Booster soft-start (3 bytes for command 0x06)
    pub booster_soft_start: [u8; 3],
    /// Panel setting byte
    pub panel_setting: u8,
    /// VCOM/data interval while powered
    pub vcom_data_interval: u8,
    /// VCOM/data interval written on power down
    pub vcom_data_interval_off: u8,
    /// PLL (frame rate) byte
    pub pll: u8,
    /// VCM DC level while powered
    pub vcm_dc: u8,
    /// VCM DC level written on power down
    pub vcm_dc_off: u8,
    /// Reset pin low and high hold time
    pub reset_hold_ms: u32,
    /// Settle after the power-on busy wait
    pub power_on_settle_ms: u32,
    /// Settle after the power-up register writes
    pub init_settle_ms: u32,
    /// Settle after streaming the black plane
    pub plane_settle_ms: u32,
    /// Settle after selecting the second RAM bank
    pub bank_switch_ms: u32,
    /// Settle between the refresh command and the busy wait
    pub refresh_settle_ms: u32,
    /// Hold after the refresh busy wait before further commands
    pub post_refresh_settle_ms: u32,
}

impl Config {
    /// Get the rotated dimensions based on rotation setting
    pub fn rotated_dimensions(&self) -> Dimensions {
        if self.rotation.is_odd() {
            Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            }
        } else {
            self.dimensions
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust
/// use il0373::{Builder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(128, 296) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate90).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.rotated_dimensions().width, 296);
/// ```
#[must_use]
pub struct Builder {
    dimensions: Option<Dimensions>,
    rotation: Rotation,
    power_setting: [u8; 5],
    booster_soft_start: [u8; 3],
    panel_setting: u8,
    vcom_data_interval: u8,
    vcom_data_interval_off: u8,
    pll: u8,
    vcm_dc: u8,
    vcm_dc_off: u8,
    reset_hold_ms: u32,
    power_on_settle_ms: u32,
    init_settle_ms: u32,
    plane_settle_ms: u32,
    bank_switch_ms: u32,
    refresh_settle_ms: u32,
    post_refresh_settle_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            // Internal power, VGH/VGL +-15V, VDH/VDL +-11V
            power_setting: [0x03, 0x00, 0x2B, 0x2B, 0x09],
            booster_soft_start: [0x17, 0x17, 0x17],
            // LUT from OTP, KWR mode, scan up, shift right, booster on
            panel_setting: 0xCF,
            vcom_data_interval: 0x37,
            vcom_data_interval_off: 0x17,
            // 50Hz
            pll: 0x29,
            vcm_dc: 0x0A,
            vcm_dc_off: 0x00,
            reset_hold_ms: 100,
            power_on_settle_ms: 200,
            init_settle_ms: 20,
            plane_settle_ms: 20,
            bank_switch_ms: 10,
            refresh_settle_ms: 100,
            // Panel keeps driving for a while after BUSY is released
            post_refresh_settle_ms: 15_000,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set power setting bytes
    pub fn power_setting(mut self, values: [u8; 5]) -> Self {
        self.power_setting = values;
        self
    }

    /// Set booster soft-start bytes
    pub fn booster_soft_start(mut self, values: [u8; 3]) -> Self {
        self.booster_soft_start = values;
        self
    }

    /// Set panel setting byte
    pub fn panel_setting(mut self, value: u8) -> Self {
        self.panel_setting = value;
        self
    }

    /// Set VCOM/data interval values used while powered and on power down
    pub fn vcom_data_interval(mut self, on: u8, off: u8) -> Self {
        self.vcom_data_interval = on;
        self.vcom_data_interval_off = off;
        self
    }

    /// Set PLL byte
    pub fn pll(mut self, value: u8) -> Self {
        self.pll = value;
        self
    }

    /// Set VCM DC values used while powered and on power down
    pub fn vcm_dc(mut self, on: u8, off: u8) -> Self {
        self.vcm_dc = on;
        self.vcm_dc_off = off;
        self
    }

    /// Set reset pin hold time in milliseconds
    pub fn reset_hold_ms(mut self, value: u32) -> Self {
        self.reset_hold_ms = value;
        self
    }

    /// Set settle time after power on in milliseconds
    pub fn power_on_settle_ms(mut self, value: u32) -> Self {
        self.power_on_settle_ms = value;
        self
    }

    /// Set settle time after power-up register writes in milliseconds
    pub fn init_settle_ms(mut self, value: u32) -> Self {
        self.init_settle_ms = value;
        self
    }

    /// Set settle time after the black plane transfer in milliseconds
    pub fn plane_settle_ms(mut self, value: u32) -> Self {
        self.plane_settle_ms = value;
        self
    }

    /// Set settle time after selecting the second RAM bank in milliseconds
    pub fn bank_switch_ms(mut self, value: u32) -> Self {
        self.bank_switch_ms = value;
        self
    }

    /// Set settle time between refresh and busy wait in milliseconds
    pub fn refresh_settle_ms(mut self, value: u32) -> Self {
        self.refresh_settle_ms = value;
        self
    }

    /// Set the hold after a refresh completes in milliseconds
    ///
    /// Some panels keep driving after BUSY is released and ignore commands
    /// issued too early.
    pub fn post_refresh_settle_ms(mut self, value: u32) -> Self {
        self.post_refresh_settle_ms = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            rotation: self.rotation,
            power_setting: self.power_setting,
            booster_soft_start: self.booster_soft_start,
            panel_setting: self.panel_setting,
            vcom_data_interval: self.vcom_data_interval,
            vcom_data_interval_off: self.vcom_data_interval_off,
            pll: self.pll,
            vcm_dc: self.vcm_dc,
            vcm_dc_off: self.vcm_dc_off,
            reset_hold_ms: self.reset_hold_ms,
            power_on_settle_ms: self.power_on_settle_ms,
            init_settle_ms: self.init_settle_ms,
            plane_settle_ms: self.plane_settle_ms,
            bank_switch_ms: self.bank_switch_ms,
            refresh_settle_ms: self.refresh_settle_ms,
            post_refresh_settle_ms: self.post_refresh_settle_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_reject_unaligned_width() {
        assert_eq!(
            Dimensions::new(130, 296),
            Err(BuilderError::InvalidDimensions {
                width: 130,
                height: 296
            })
        );
    }

    #[test]
    fn test_dimensions_reject_out_of_range() {
        assert!(Dimensions::new(0, 10).is_err());
        assert!(Dimensions::new(168, 10).is_err());
        assert!(Dimensions::new(128, 0).is_err());
        assert!(Dimensions::new(128, 297).is_err());
    }

    #[test]
    fn test_buffer_size() {
        let dims = Dimensions::new(128, 296).unwrap();
        assert_eq!(dims.buffer_size(), 4736);
    }

    #[test]
    fn test_rotation_from_u8() {
        assert_eq!(Rotation::try_from(0), Ok(Rotation::Rotate0));
        assert_eq!(Rotation::try_from(3), Ok(Rotation::Rotate270));
        assert_eq!(
            Rotation::try_from(7),
            Err(BuilderError::InvalidRotation { value: 7 })
        );
        assert_eq!(u8::from(Rotation::Rotate180), 2);
    }

    #[test]
    fn test_rotated_dimensions_swap_for_odd_rotation() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 296).unwrap())
            .rotation(Rotation::Rotate270)
            .build()
            .unwrap();
        assert_eq!(
            config.rotated_dimensions(),
            Dimensions {
                width: 296,
                height: 128
            }
        );
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 296).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.power_setting, [0x03, 0x00, 0x2B, 0x2B, 0x09]);
        assert_eq!(config.booster_soft_start, [0x17, 0x17, 0x17]);
        assert_eq!(config.post_refresh_settle_ms, 15_000);
    }

    #[test]
    fn test_builder_missing_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }
}
