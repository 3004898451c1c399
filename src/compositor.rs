//! Two-plane compositor
//!
//! A [`PlaneCompositor`] owns two [`PixelPlane`]s and binds the two logical
//! roles of a dual-plane panel to them:
//!
//! - the **black** role, whose bit means "black ink"
//! - the **color** role, whose bit means "accent ink"
//!
//! Each role has its own inversion flag. A role's bit for a given ink is
//! `(ink == role ink) XOR inverted`.
//!
//! Binding both roles to the same plane gives a monochrome device. The
//! resulting [`PlaneLayout::Monochrome`] writes the shared plane once per
//! operation, using the black role's bit.
//!
//! ## Example
//!
//! ```
//! use il0373::{Color, PlaneCompositor, PlaneIndex, PlaneLayout};
//!
//! let mut planes = PlaneCompositor::new(16, 8);
//! planes.fill(Color::White);
//! planes.pixel(2, 3, Color::Red);
//!
//! // Monochrome panel: one plane, both roles
//! planes.set_color_plane(PlaneIndex::First, true);
//! assert_eq!(planes.layout(), PlaneLayout::Monochrome { plane: PlaneIndex::First });
//! assert!(planes.color_plane().is_none());
//! ```

use crate::color::{Color, Ink};
use crate::config::Rotation;
use crate::plane::{PixelPlane, circle_points, line_points};

/// One of the two owned planes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneIndex {
    /// First plane
    First,
    /// Second plane
    Second,
}

/// A role's plane and inversion flag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneBinding {
    /// Plane the role writes to
    pub plane: PlaneIndex,
    /// Whether a set bit means "no ink"
    pub inverted: bool,
}

impl PlaneBinding {
    fn bit(self, role: Ink, ink: Ink) -> bool {
        (ink == role) != self.inverted
    }
}

/// How the roles map onto planes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneLayout {
    /// Both roles share one plane
    Monochrome {
        /// The shared plane
        plane: PlaneIndex,
    },
    /// Each role has its own plane
    DualPlane {
        /// Plane bound to the black role
        black: PlaneIndex,
        /// Plane bound to the color role
        color: PlaneIndex,
    },
}

/// Two bit planes behind a logical color drawing surface
#[derive(Clone, Debug)]
pub struct PlaneCompositor {
    first: PixelPlane,
    second: PixelPlane,
    black: PlaneBinding,
    color: PlaneBinding,
}

impl PlaneCompositor {
    /// Allocate two cleared planes of identical geometry
    ///
    /// The black role is bound to the first plane and the color role to the
    /// second, both inverted.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            first: PixelPlane::new(width, height),
            second: PixelPlane::new(width, height),
            black: PlaneBinding {
                plane: PlaneIndex::First,
                inverted: true,
            },
            color: PlaneBinding {
                plane: PlaneIndex::Second,
                inverted: true,
            },
        }
    }

    /// Bind the black role
    pub fn set_black_plane(&mut self, which: PlaneIndex, inverted: bool) {
        self.black = PlaneBinding {
            plane: which,
            inverted,
        };
    }

    /// Bind the color role
    pub fn set_color_plane(&mut self, which: PlaneIndex, inverted: bool) {
        self.color = PlaneBinding {
            plane: which,
            inverted,
        };
    }

    /// Black role binding
    pub fn black_binding(&self) -> PlaneBinding {
        self.black
    }

    /// Color role binding
    pub fn color_binding(&self) -> PlaneBinding {
        self.color
    }

    /// Current role layout
    pub fn layout(&self) -> PlaneLayout {
        if self.black.plane == self.color.plane {
            PlaneLayout::Monochrome {
                plane: self.black.plane,
            }
        } else {
            PlaneLayout::DualPlane {
                black: self.black.plane,
                color: self.color.plane,
            }
        }
    }

    /// Borrow a plane by index
    pub fn plane(&self, which: PlaneIndex) -> &PixelPlane {
        match which {
            PlaneIndex::First => &self.first,
            PlaneIndex::Second => &self.second,
        }
    }

    fn plane_mut(&mut self, which: PlaneIndex) -> &mut PixelPlane {
        match which {
            PlaneIndex::First => &mut self.first,
            PlaneIndex::Second => &mut self.second,
        }
    }

    /// Plane bound to the black role
    pub fn black_plane(&self) -> &PixelPlane {
        self.plane(self.black.plane)
    }

    /// Plane bound to the color role, or `None` when it aliases the black plane
    pub fn color_plane(&self) -> Option<&PixelPlane> {
        match self.layout() {
            PlaneLayout::Monochrome { .. } => None,
            PlaneLayout::DualPlane { color, .. } => Some(self.plane(color)),
        }
    }

    /// Current rotation
    pub fn rotation(&self) -> Rotation {
        self.first.rotation()
    }

    /// Rotate both planes
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.first.set_rotation(rotation);
        self.second.set_rotation(rotation);
    }

    /// Logical `(width, height)` as seen through the current rotation
    pub fn logical_size(&self) -> (i32, i32) {
        self.first.logical_size()
    }

    /// Zero both planes
    pub fn clear(&mut self) {
        self.first.clear();
        self.second.clear();
    }

    /// Ink currently shown at a logical coordinate
    ///
    /// Outside the display this reports whatever a cleared bit means.
    pub fn ink_at(&self, x: i32, y: i32) -> Ink {
        let black = self.black_plane().pixel(x, y) != self.black.inverted;
        let red = self
            .color_plane()
            .is_some_and(|plane| plane.pixel(x, y) != self.color.inverted);
        if red {
            Ink::Red
        } else if black {
            Ink::Black
        } else {
            Ink::White
        }
    }

    /// Fill every distinct plane with one color
    pub fn fill(&mut self, color: Color) {
        match color.ink() {
            Some(ink) => self.each_plane(ink, |plane, on| plane.fill(if on { 0xFF } else { 0x00 })),
            None => self.invert_with(|plane| plane.invert(), |plane, on| {
                plane.fill(if on { 0xFF } else { 0x00 });
            }),
        }
    }

    /// Set one pixel in logical coordinates
    pub fn pixel(&mut self, x: i32, y: i32, color: Color) {
        let ink = match color.ink() {
            Some(ink) => ink,
            None if self.ink_at(x, y) == Ink::Black => Ink::White,
            None => Ink::Black,
        };
        self.each_plane(ink, |plane, on| plane.set_pixel(x, y, on));
    }

    /// Fill a rectangle in raw buffer coordinates, ignoring rotation
    #[allow(clippy::many_single_char_names)]
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        match color.ink() {
            Some(ink) => self.each_plane(ink, |plane, on| plane.fill_rect(x, y, w, h, on)),
            None => self.invert_with(
                |plane| plane.invert_rect(x, y, w, h),
                |plane, on| plane.fill_rect(x, y, w, h, on),
            ),
        }
    }

    /// Draw a rectangle in logical coordinates
    #[allow(clippy::many_single_char_names)]
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color, filled: bool) {
        if let Some(ink) = color.ink() {
            self.each_plane(ink, |plane, on| plane.rect(x, y, w, h, on, filled));
            return;
        }
        if w < 1 || h < 1 {
            return;
        }
        if filled || w <= 2 || h <= 2 {
            self.invert_area(x, y, w, h);
            return;
        }
        // Edges must not overlap or the corners would flip twice
        let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));
        self.invert_area(x, y, w, 1);
        self.invert_area(x, bottom, w, 1);
        self.invert_area(x, y.saturating_add(1), 1, h - 2);
        self.invert_area(right, y.saturating_add(1), 1, h - 2);
    }

    /// Bresenham line in logical coordinates
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        line_points(x0, y0, x1, y1, |x, y| self.pixel(x, y, color));
    }

    /// Midpoint circle outline in logical coordinates
    ///
    /// With [`Color::Inverse`], points on octant boundaries are visited twice
    /// and end up unchanged.
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        circle_points(cx, cy, radius, |x, y| self.pixel(x, y, color));
    }

    /// Scroll every distinct plane by `(dx, dy)` logical pixels
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        match self.layout() {
            PlaneLayout::Monochrome { plane } => self.plane_mut(plane).scroll(dx, dy),
            PlaneLayout::DualPlane { black, color } => {
                self.plane_mut(black).scroll(dx, dy);
                self.plane_mut(color).scroll(dx, dy);
            }
        }
    }

    /// Apply `draw` once per distinct plane with that plane's bit for `ink`
    fn each_plane(&mut self, ink: Ink, mut draw: impl FnMut(&mut PixelPlane, bool)) {
        match self.layout() {
            PlaneLayout::Monochrome { plane } => {
                let on = self.black.bit(Ink::Black, ink);
                draw(self.plane_mut(plane), on);
            }
            PlaneLayout::DualPlane { black, color } => {
                let black_on = self.black.bit(Ink::Black, ink);
                let color_on = self.color.bit(Ink::Red, ink);
                draw(self.plane_mut(black), black_on);
                draw(self.plane_mut(color), color_on);
            }
        }
    }

    /// Flip the black plane with `invert` and clear accent ink with `clear`
    fn invert_with(
        &mut self,
        invert: impl FnOnce(&mut PixelPlane),
        clear: impl FnOnce(&mut PixelPlane, bool),
    ) {
        invert(self.plane_mut(self.black.plane));
        if let PlaneLayout::DualPlane { color, .. } = self.layout() {
            let on = self.color.bit(Ink::Red, Ink::White);
            clear(self.plane_mut(color), on);
        }
    }

    #[allow(clippy::many_single_char_names)]
    fn invert_area(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.invert_with(
            |plane| plane.invert_area(x, y, w, h),
            |plane, on| plane.rect(x, y, w, h, on, true),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones(plane: &PixelPlane) -> u32 {
        plane.buffer().iter().map(|byte| byte.count_ones()).sum()
    }

    fn monochrome() -> PlaneCompositor {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.set_black_plane(PlaneIndex::First, true);
        planes.set_color_plane(PlaneIndex::First, false);
        planes
    }

    #[test]
    fn test_default_layout_is_dual_plane() {
        let planes = PlaneCompositor::new(16, 8);
        assert_eq!(
            planes.layout(),
            PlaneLayout::DualPlane {
                black: PlaneIndex::First,
                color: PlaneIndex::Second
            }
        );
        assert!(planes.black_binding().inverted);
        assert!(planes.color_binding().inverted);
    }

    #[test]
    fn test_fill_bytes_follow_inversion() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.fill(Color::White);
        assert!(planes.black_plane().buffer().iter().all(|&b| b == 0xFF));
        assert!(planes.color_plane().unwrap().buffer().iter().all(|&b| b == 0xFF));

        planes.fill(Color::Black);
        assert!(planes.black_plane().buffer().iter().all(|&b| b == 0x00));
        assert!(planes.color_plane().unwrap().buffer().iter().all(|&b| b == 0xFF));

        planes.set_color_plane(PlaneIndex::Second, false);
        planes.fill(Color::Red);
        assert!(planes.black_plane().buffer().iter().all(|&b| b == 0xFF));
        assert!(planes.color_plane().unwrap().buffer().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_pixel_writes_both_planes() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.set_black_plane(PlaneIndex::First, false);
        planes.set_color_plane(PlaneIndex::Second, false);

        planes.pixel(1, 1, Color::Red);
        assert!(!planes.plane(PlaneIndex::First).pixel(1, 1));
        assert!(planes.plane(PlaneIndex::Second).pixel(1, 1));
        assert_eq!(planes.ink_at(1, 1), Ink::Red);

        planes.pixel(1, 1, Color::Dark);
        assert!(planes.plane(PlaneIndex::First).pixel(1, 1));
        assert!(!planes.plane(PlaneIndex::Second).pixel(1, 1));
        assert_eq!(planes.ink_at(1, 1), Ink::Black);
    }

    #[test]
    fn test_swapped_roles() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.set_black_plane(PlaneIndex::Second, false);
        planes.set_color_plane(PlaneIndex::First, false);
        planes.pixel(0, 0, Color::Black);
        assert!(planes.plane(PlaneIndex::Second).pixel(0, 0));
        assert!(!planes.plane(PlaneIndex::First).pixel(0, 0));
        assert_eq!(planes.black_plane(), planes.plane(PlaneIndex::Second));
    }

    #[test]
    fn test_monochrome_writes_shared_plane_once() {
        let mut planes = monochrome();
        planes.pixel(4, 2, Color::Black);
        planes.pixel(4, 2, Color::White);
        assert_eq!(ones(planes.plane(PlaneIndex::First)), 1);
        assert!(planes.plane(PlaneIndex::First).pixel(4, 2));
        assert_eq!(ones(planes.plane(PlaneIndex::Second)), 0);
    }

    #[test]
    fn test_monochrome_fill_uses_black_role_only() {
        let mut planes = monochrome();
        // The color role is not inverted; if it also wrote, White would end at 0x00
        planes.fill(Color::White);
        assert!(planes.black_plane().buffer().iter().all(|&b| b == 0xFF));
        assert!(planes.color_plane().is_none());
    }

    #[test]
    fn test_fill_rect_is_raw() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.set_rotation(Rotation::Rotate180);
        planes.fill_rect(0, 0, 8, 1, Color::White);
        assert_eq!(planes.black_plane().buffer()[0], 0xFF);
        assert_eq!(planes.color_plane().unwrap().buffer()[0], 0xFF);
    }

    #[test]
    fn test_inverse_pixel_toggles() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.fill(Color::White);
        planes.pixel(3, 3, Color::Inverse);
        assert_eq!(planes.ink_at(3, 3), Ink::Black);
        planes.pixel(3, 3, Color::Inverse);
        assert_eq!(planes.ink_at(3, 3), Ink::White);

        planes.pixel(5, 5, Color::Red);
        planes.pixel(5, 5, Color::Inverse);
        assert_eq!(planes.ink_at(5, 5), Ink::Black);
    }

    #[test]
    fn test_inverse_fill_flips_black_and_drops_accent() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.fill(Color::White);
        planes.pixel(0, 0, Color::Black);
        planes.pixel(1, 0, Color::Red);
        planes.fill(Color::Inverse);
        assert_eq!(planes.ink_at(0, 0), Ink::White);
        assert_eq!(planes.ink_at(1, 0), Ink::Black);
        assert_eq!(planes.ink_at(2, 0), Ink::Black);
    }

    #[test]
    fn test_inverse_rect_outline_corners_flip_once() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.fill(Color::White);
        planes.rect(1, 1, 5, 4, Color::Inverse, false);
        for (x, y) in [(1, 1), (5, 1), (1, 4), (5, 4), (3, 1), (1, 2)] {
            assert_eq!(planes.ink_at(x, y), Ink::Black, "({x}, {y})");
        }
        assert_eq!(planes.ink_at(3, 2), Ink::White);
        assert_eq!(ones(planes.black_plane()), 16 * 8 - 14);
    }

    #[test]
    fn test_inverse_rect_outline_past_the_edge_is_silent() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.fill(Color::White);
        planes.set_rotation(Rotation::Rotate90);
        let before = planes.clone();
        planes.rect(0, i32::MAX - 1, 6, 6, Color::Inverse, false);
        planes.rect(i32::MIN, 0, 6, 6, Color::Inverse, false);
        assert_eq!(planes.black_plane(), before.black_plane());
        assert_eq!(planes.color_plane(), before.color_plane());
    }

    #[test]
    fn test_line_and_circle_fan_out() {
        let mut planes = PlaneCompositor::new(32, 32);
        planes.set_black_plane(PlaneIndex::First, false);
        planes.set_color_plane(PlaneIndex::Second, false);
        planes.line(0, 0, 7, 0, Color::Red);
        planes.circle(16, 16, 6, Color::Black);
        assert_eq!(ones(planes.plane(PlaneIndex::Second)), 8);
        assert!(planes.plane(PlaneIndex::First).pixel(21, 16));
        assert!(!planes.plane(PlaneIndex::Second).pixel(21, 16));
    }

    #[test]
    fn test_scroll_moves_both_planes() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.set_black_plane(PlaneIndex::First, false);
        planes.set_color_plane(PlaneIndex::Second, false);
        planes.pixel(0, 0, Color::Black);
        planes.pixel(1, 0, Color::Red);
        planes.scroll(2, 1);
        assert_eq!(planes.ink_at(2, 1), Ink::Black);
        assert_eq!(planes.ink_at(3, 1), Ink::Red);
        assert_eq!(planes.ink_at(0, 0), Ink::White);
    }

    #[test]
    fn test_set_rotation_applies_to_both_planes() {
        let mut planes = PlaneCompositor::new(16, 8);
        planes.set_rotation(Rotation::Rotate270);
        assert_eq!(planes.plane(PlaneIndex::First).rotation(), Rotation::Rotate270);
        assert_eq!(planes.plane(PlaneIndex::Second).rotation(), Rotation::Rotate270);
        assert_eq!(planes.logical_size(), (8, 16));
    }
}
