//! Logical colors for dual-plane e-paper displays
//!
//! Callers draw with a [`Color`]. Before any bit is computed the color is
//! resolved to an [`Ink`], the three states a pixel can physically show.
//! Each plane then stores `ink == plane's ink XOR plane inverted`.
//!
//! | Color   | Resolves to                                  |
//! |---------|----------------------------------------------|
//! | Black   | [`Ink::Black`]                               |
//! | White   | [`Ink::White`]                               |
//! | Red     | [`Ink::Red`]                                 |
//! | Dark    | [`Ink::Black`]                               |
//! | Light   | [`Ink::White`]                               |
//! | Inverse | opposite of the pixel's current black state  |
//!
//! ## Example
//!
//! ```
//! use il0373::{Color, Ink};
//!
//! assert_eq!(Color::Dark.ink(), Some(Ink::Black));
//! assert_eq!(Color::Red.ink(), Some(Ink::Red));
//! assert_eq!(Color::Inverse.ink(), None);
//! ```

/// Caller-facing color
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// Black ink
    Black,
    /// No ink
    White,
    /// Accent ink (red on most panels)
    Red,
    /// Flip the current black/white state
    Inverse,
    /// Alias of [`Color::Black`]
    Dark,
    /// Alias of [`Color::White`]
    Light,
}

/// Physical pixel state
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Ink {
    /// Black ink
    Black,
    /// No ink
    White,
    /// Accent ink
    Red,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU8;
}

impl Color {
    /// Resolve to a fixed ink
    ///
    /// Returns `None` for [`Color::Inverse`], whose ink depends on the pixel
    /// being drawn over.
    pub fn ink(self) -> Option<Ink> {
        match self {
            Self::Black | Self::Dark => Some(Ink::Black),
            Self::White | Self::Light => Some(Ink::White),
            Self::Red => Some(Ink::Red),
            Self::Inverse => None,
        }
    }
}

impl From<Ink> for Color {
    fn from(ink: Ink) -> Self {
        match ink {
            Ink::Black => Self::Black,
            Ink::White => Self::White,
            Ink::Red => Self::Red,
        }
    }
}
