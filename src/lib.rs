//! IL0373 E-Paper Display Driver
//!
//! A driver for IL0373 dual-plane e-paper panels (black/white plus an accent
//! color, up to 160x296 pixels), with a bit-packed framebuffer and drawing
//! primitives.
//!
//! ## Features
//!
//! - `no_std` compatible (requires `alloc` for the frame planes)
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Rotation-aware pixel, line, rectangle, circle and scroll primitives
//! - Monochrome panels by binding both color roles to one plane
//! - Optional reset and busy pins
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::SpiBus;
//! use il0373::{Builder, Color, Dimensions, Display, Interface, Rotation};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let cs = MockPin;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, cs, dc, Some(rst), Some(busy));
//! let dims = match Dimensions::new(128, 296) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate90).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! if display.initialize(&mut delay).is_err() {
//!     return;
//! }
//! if let Some(planes) = display.planes_mut() {
//!     planes.fill(Color::White);
//!     planes.rect(10, 10, 100, 40, Color::Red, true);
//!     planes.line(0, 60, 295, 60, Color::Black);
//! }
//! let _ = display.display(&mut delay);
//! ```

#![no_std]

extern crate alloc;

/// Logical colors and inks
pub mod color;
/// IL0373 command definitions
pub mod command;
/// Two-plane compositor
pub mod compositor;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Bit-packed frame plane
pub mod plane;
/// Coordinate rotation utilities
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::{Color, Ink};
pub use compositor::{PlaneBinding, PlaneCompositor, PlaneIndex, PlaneLayout};
pub use config::{Builder, Config, Dimensions, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS, Rotation};
pub use display::{Display, DriverState};
pub use error::{BuilderError, Error};
pub use interface::InterfaceError;
pub use interface::{
    DEFAULT_BUSY_FALLBACK_MS, DEFAULT_BUSY_POLL_MS, DEFAULT_BUSY_TIMEOUT_MS, DisplayInterface,
    Interface, NoPin,
};
pub use plane::PixelPlane;
