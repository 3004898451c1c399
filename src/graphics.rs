//! Graphics support via embedded-graphics
//!
//! [`PlaneCompositor`] implements the [`DrawTarget`] trait from the
//! embedded-graphics ecosystem, so text, images and primitives can be drawn
//! straight into both planes. Coordinates are logical: the compositor's
//! rotation applies and anything past the edges is clipped.
//!
//! Solid fills go through [`PlaneCompositor::rect`] instead of one pixel at a
//! time.
//!
//! `PlaneCompositor` has an inherent `clear()` that zeroes both planes; call
//! the trait form as `DrawTarget::clear(&mut planes, color)`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use il0373::{Color, PlaneCompositor};
//!
//! let mut planes = PlaneCompositor::new(128, 296);
//! planes.fill(Color::White);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::Red))
//!     .draw(&mut planes);
//!
//! let _ = Circle::new(Point::new(40, 80), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::Black, 2))
//!     .draw(&mut planes);
//!
//! let _ = Text::new(
//!     "Hello, E-Paper!",
//!     Point::new(10, 150),
//!     MonoTextStyle::new(&FONT_6X10, Color::Black),
//! )
//! .draw(&mut planes);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::Color;
use crate::compositor::PlaneCompositor;

impl DrawTarget for PlaneCompositor {
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.pixel(x, y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let width = i32::try_from(area.size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(area.size.height).unwrap_or(i32::MAX);
        self.rect(area.top_left.x, area.top_left.y, width, height, color, true);
        Ok(())
    }
}

impl OriginDimensions for PlaneCompositor {
    fn size(&self) -> Size {
        let (width, height) = self.logical_size();
        Size::new(width as u32, height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Ink;
    use crate::config::Rotation;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    fn white(width: u16, height: u16) -> PlaneCompositor {
        let mut planes = PlaneCompositor::new(width, height);
        planes.fill(Color::White);
        planes
    }

    #[test]
    fn test_size_follows_rotation() {
        let mut planes = PlaneCompositor::new(16, 8);
        assert_eq!(planes.size(), Size::new(16, 8));
        planes.set_rotation(Rotation::Rotate90);
        assert_eq!(planes.size(), Size::new(8, 16));
    }

    #[test]
    fn test_filled_rectangle() {
        let mut planes = white(16, 8);
        Rectangle::new(Point::new(2, 1), Size::new(4, 3))
            .into_styled(PrimitiveStyle::with_fill(Color::Black))
            .draw(&mut planes)
            .unwrap();

        assert_eq!(planes.ink_at(2, 1), Ink::Black);
        assert_eq!(planes.ink_at(5, 3), Ink::Black);
        assert_eq!(planes.ink_at(6, 3), Ink::White);
        assert_eq!(planes.ink_at(2, 4), Ink::White);
    }

    #[test]
    fn test_fill_solid_matches_rect() {
        let mut drawn = white(16, 8);
        drawn.set_rotation(Rotation::Rotate270);
        drawn
            .fill_solid(&Rectangle::new(Point::new(1, 2), Size::new(3, 5)), Color::Red)
            .unwrap();

        let mut expected = white(16, 8);
        expected.set_rotation(Rotation::Rotate270);
        expected.rect(1, 2, 3, 5, Color::Red, true);

        assert_eq!(drawn.black_plane(), expected.black_plane());
        assert_eq!(drawn.color_plane(), expected.color_plane());
    }

    #[test]
    fn test_line_primitive() {
        let mut planes = white(16, 8);
        Line::new(Point::new(0, 0), Point::new(5, 0))
            .into_styled(PrimitiveStyle::with_stroke(Color::Red, 1))
            .draw(&mut planes)
            .unwrap();
        for x in 0..=5 {
            assert_eq!(planes.ink_at(x, 0), Ink::Red);
        }
        assert_eq!(planes.ink_at(6, 0), Ink::White);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_clipped() {
        let mut planes = white(16, 8);
        let before = planes.clone();
        Pixel(Point::new(-1, 0), Color::Black).draw(&mut planes).unwrap();
        Pixel(Point::new(16, 0), Color::Black).draw(&mut planes).unwrap();
        Pixel(Point::new(0, 8), Color::Black).draw(&mut planes).unwrap();
        assert_eq!(planes.black_plane(), before.black_plane());
    }

    #[test]
    fn test_trait_clear() {
        let mut planes = PlaneCompositor::new(16, 8);
        DrawTarget::clear(&mut planes, Color::White).unwrap();
        assert!(planes.black_plane().buffer().iter().all(|&b| b == 0xFF));
    }
}
