//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus and pin errors
//!
//! Out-of-bounds pixel reads and writes are not errors: drawing clips silently
//! so callers can overdraw past the edges.
//!
//! ## Example
//!
//! ```
//! use il0373::{Builder, BuilderError, Dimensions, Rotation};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Width not byte aligned
//! assert!(Dimensions::new(100, 296).is_err());
//!
//! // Rotation outside 0..=3
//! assert!(matches!(
//!     Rotation::try_from(4),
//!     Err(BuilderError::InvalidRotation { value: 4 })
//! ));
//! ```

use crate::interface::DisplayInterface;

/// Maximum gate outputs (rows) driven by the IL0373
pub const MAX_GATE_OUTPUTS: u16 = 296;

/// Maximum source outputs (columns) driven by the IL0373
///
/// The resolution command carries the width in a single byte.
pub const MAX_SOURCE_OUTPUTS: u16 = 160;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Bus transfer or control pin failure
    ///
    /// Wraps the underlying error from the [`DisplayInterface`] implementation.
    /// A failure aborts the sequence in progress; the panel may hold a partial frame.
    Interface(I::Error),
    /// Rotation value outside `0..=3`
    InvalidRotation {
        /// Requested rotation
        value: u8,
    },
    /// Image dimensions do not match the rotated display geometry
    DimensionMismatch {
        /// Width required by the current rotation
        expected_width: u16,
        /// Height required by the current rotation
        expected_height: u16,
        /// Provided image width
        width: u16,
        /// Provided image height
        height: u16,
    },
    /// Pixel data is shorter than the declared image
    BufferTooSmall {
        /// Required length in bytes
        required: usize,
        /// Provided length in bytes
        provided: usize,
    },
    /// Framebuffers have not been allocated yet; call `initialize()` first
    Uninitialized,
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::InvalidRotation { value } => write!(f, "Invalid rotation: {value}"),
            Self::DimensionMismatch {
                expected_width,
                expected_height,
                width,
                height,
            } => write!(
                f,
                "Image is {width}x{height}, display expects {expected_width}x{expected_height}"
            ),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::Uninitialized => write!(f, "Display not initialized"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Requested width in pixels
        width: u16,
        /// Requested height in pixels
        height: u16,
    },
    /// Row stride is narrower than the width or not byte aligned
    InvalidStride {
        /// Plane width in pixels
        width: u16,
        /// Requested stride in pixels
        stride: u16,
    },
    /// Rotation value outside `0..=3`
    InvalidRotation {
        /// Requested rotation
        value: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_SOURCE_OUTPUTS}x{MAX_GATE_OUTPUTS}, width must be multiple of 8)"
            ),
            Self::InvalidStride { width, stride } => write!(
                f,
                "Invalid stride {stride} for width {width} (must be >= width and a multiple of 8)"
            ),
            Self::InvalidRotation { value } => {
                write!(f, "Invalid rotation {value} (must be 0..=3)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
