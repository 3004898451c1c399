//! Bit-packed pixel plane
//!
//! A [`PixelPlane`] is one physical ink channel: a rectangular bitmap packed
//! 8 pixels per byte, most significant bit first, rows `stride` pixels apart.
//!
//! Per-pixel access ([`PixelPlane::pixel`], [`PixelPlane::set_pixel`]) and the
//! shape primitives built on it are rotation aware. [`PixelPlane::fill_rect`]
//! works in raw buffer coordinates and is the building block for rectangles.
//!
//! Out-of-bounds accesses clip silently: reads return `false` (background) and
//! writes are dropped. Drawing code relies on this to overdraw past the edges.
//!
//! ## Example
//!
//! ```
//! use il0373::{PixelPlane, Rotation};
//!
//! let mut plane = PixelPlane::new(8, 8);
//! plane.set_pixel(3, 3, true);
//! assert_eq!(plane.buffer()[3], 0b0001_0000);
//!
//! // Off-plane writes are ignored
//! plane.set_pixel(-1, 20, true);
//! assert!(!plane.pixel(-1, 20));
//!
//! plane.set_rotation(Rotation::Rotate90);
//! assert!(plane.pixel(3, 4));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::config::Rotation;
use crate::error::BuilderError;
use crate::rotation::{logical_size, transform, transform_rect};

/// Owned bit-packed bitmap with rotation-aware addressing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelPlane {
    buffer: Vec<u8>,
    width: u16,
    height: u16,
    stride: u32,
    rotation: Rotation,
}

impl PixelPlane {
    /// Allocate a cleared plane
    ///
    /// The stride is `width` rounded up to a whole byte.
    pub fn new(width: u16, height: u16) -> Self {
        let stride = u32::from(width).div_ceil(8) * 8;
        Self {
            buffer: vec![0; stride as usize * usize::from(height) / 8],
            width,
            height,
            stride,
            rotation: Rotation::Rotate0,
        }
    }

    /// Allocate a cleared plane with an explicit row stride in pixels
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidStride` if `stride < width` or `stride`
    /// is not a multiple of 8.
    pub fn with_stride(width: u16, height: u16, stride: u16) -> Result<Self, BuilderError> {
        if stride < width || !stride.is_multiple_of(8) {
            return Err(BuilderError::InvalidStride { width, stride });
        }
        Ok(Self {
            buffer: vec![0; usize::from(stride) * usize::from(height) / 8],
            width,
            height,
            stride: stride.into(),
            rotation: Rotation::Rotate0,
        })
    }

    /// Physical width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Physical height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixels per buffer row
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Current rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Set the rotation applied to every subsequent per-pixel access
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Logical `(width, height)` as seen through the current rotation
    pub fn logical_size(&self) -> (i32, i32) {
        logical_size(self.width.into(), self.height.into(), self.rotation)
    }

    /// Packed plane contents
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Read a pixel; `false` outside the plane
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        let (x, y) = self.to_physical(x, y);
        self.bit_index(x, y)
            .and_then(|(index, mask)| self.buffer.get(index).map(|byte| byte & mask != 0))
            .unwrap_or(false)
    }

    /// Write a pixel; ignored outside the plane
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let (x, y) = self.to_physical(x, y);
        self.write_raw(x, y, on);
    }

    /// Set every byte to zero
    pub fn clear(&mut self) {
        self.fill(0x00);
    }

    /// Set every byte, padding included, to `value`
    pub fn fill(&mut self, value: u8) {
        self.buffer.fill(value);
    }

    /// Flip every bit
    pub fn invert(&mut self) {
        for byte in &mut self.buffer {
            *byte = !*byte;
        }
    }

    /// Fill a rectangle in raw buffer coordinates, ignoring rotation
    ///
    /// The parts of the rectangle outside the plane are clipped.
    #[allow(clippy::many_single_char_names)]
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool) {
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = x.saturating_add(w).min(self.width.into());
        let y_end = y.saturating_add(h).min(self.height.into());
        for row in y_start..y_end {
            for col in x_start..x_end {
                self.write_raw(col, row, on);
            }
        }
    }

    /// Flip the pixels of a rectangle in raw buffer coordinates
    #[allow(clippy::many_single_char_names)]
    pub fn invert_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let x_end = x.saturating_add(w).min(self.width.into());
        let y_end = y.saturating_add(h).min(self.height.into());
        for row in y.max(0)..y_end {
            for col in x.max(0)..x_end {
                if let Some((index, mask)) = self.bit_index(col, row) {
                    if let Some(byte) = self.buffer.get_mut(index) {
                        *byte ^= mask;
                    }
                }
            }
        }
    }

    /// Draw a rectangle in logical coordinates
    ///
    /// Filled rectangles are one `fill_rect`; outlines are four one-pixel strips.
    #[allow(clippy::many_single_char_names)]
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool, filled: bool) {
        if let Some((x, y, x_end, y_end)) = self.clip_rect(x, y, w, h) {
            let w = x_end - x + 1;
            let h = y_end - y + 1;
            if filled {
                self.fill_rect(x, y, w, h, on);
                return;
            }
            self.fill_rect(x, y, w, 1, on);
            self.fill_rect(x, y_end, w, 1, on);
            self.fill_rect(x, y, 1, h, on);
            self.fill_rect(x_end, y, 1, h, on);
        }
    }

    /// Invert a rectangle given in logical coordinates
    #[allow(clippy::many_single_char_names)]
    pub fn invert_area(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if let Some((x, y, x_end, y_end)) = self.clip_rect(x, y, w, h) {
            self.invert_rect(x, y, x_end - x + 1, y_end - y + 1);
        }
    }

    /// Horizontal line of `w` pixels
    pub fn hline(&mut self, x: i32, y: i32, w: i32, on: bool) {
        self.rect(x, y, w, 1, on, true);
    }

    /// Vertical line of `h` pixels
    pub fn vline(&mut self, x: i32, y: i32, h: i32, on: bool) {
        self.rect(x, y, 1, h, on, true);
    }

    /// Bresenham line, both endpoints inclusive
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        line_points(x0, y0, x1, y1, |x, y| self.set_pixel(x, y, on));
    }

    /// Midpoint circle outline centred on `(cx, cy)`
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, on: bool) {
        circle_points(cx, cy, radius, |x, y| self.set_pixel(x, y, on));
    }

    /// Shift the contents by `(dx, dy)` logical pixels
    ///
    /// Uncovered pixels become background; nothing wraps around. A shift of
    /// a full dimension or more clears the plane.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let (width, height) = self.logical_size();
        let dx = dx.clamp(-width, width);
        let dy = dy.clamp(-height, height);

        // Walk away from the shift so every source is read before it is overwritten
        let (x_start, x_end, x_step) = if dx < 0 {
            (0, width, 1)
        } else {
            (width - 1, -1, -1)
        };
        let (mut y, y_end, y_step) = if dy < 0 {
            (0, height, 1)
        } else {
            (height - 1, -1, -1)
        };

        while y != y_end {
            let mut x = x_start;
            while x != x_end {
                let on = self.pixel(x - dx, y - dy);
                self.set_pixel(x, y, on);
                x += x_step;
            }
            y += y_step;
        }
    }

    fn to_physical(&self, x: i32, y: i32) -> (i32, i32) {
        transform(x, y, self.width.into(), self.height.into(), self.rotation)
    }

    /// Clip a logical rectangle to physical `(x, y, x_end, y_end)`, ends inclusive
    #[allow(clippy::many_single_char_names)]
    fn clip_rect(&self, x: i32, y: i32, w: i32, h: i32) -> Option<(i32, i32, i32, i32)> {
        let width = i32::from(self.width);
        let height = i32::from(self.height);
        let (x, y, w, h) = transform_rect(x, y, w, h, width, height, self.rotation)?;
        if x.saturating_add(w) <= 0 || y.saturating_add(h) <= 0 || x >= width || y >= height {
            return None;
        }
        let x_end = (width - 1).min(x.saturating_add(w - 1));
        let y_end = (height - 1).min(y.saturating_add(h - 1));
        Some((x.max(0), y.max(0), x_end, y_end))
    }

    fn write_raw(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = self.bit_index(x, y) {
            if let Some(byte) = self.buffer.get_mut(index) {
                if on {
                    *byte |= mask;
                } else {
                    *byte &= !mask;
                }
            }
        }
    }

    /// Byte index and bit mask of a physical coordinate
    fn bit_index(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let index = (y * self.stride as usize + x) / 8;
        Some((index, 0x80 >> (x & 0x07)))
    }
}

/// Visit the points of a Bresenham line from `(x0, y0)` to `(x1, y1)`
///
/// The major axis is the one with the larger delta; each step visits exactly
/// one point and both endpoints are visited.
pub fn line_points(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    // Deltas of far-apart endpoints overflow i32
    let dx = (i64::from(x1) - i64::from(x0)).abs();
    let dy = (i64::from(y1) - i64::from(y0)).abs();
    let sx = if x0 > x1 { -1 } else { 1 };
    let sy = if y0 > y1 { -1 } else { 1 };
    let (mut x, mut y) = (x0, y0);

    if dx > dy {
        let mut err = dx / 2;
        while x != x1 {
            plot(x, y);
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy / 2;
        while y != y1 {
            plot(x, y);
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }

    plot(x, y);
}

/// Visit the points of a midpoint circle outline
///
/// Every iteration visits all eight octant reflections, so points on the
/// octant boundaries are visited more than once.
pub fn circle_points(cx: i32, cy: i32, radius: i32, mut plot: impl FnMut(i32, i32)) {
    let diameter = i64::from(radius) << 1;
    let mut x = radius.saturating_sub(1);
    let mut y = 0;
    let mut dx: i64 = 1;
    let mut dy: i64 = 1;
    let mut err = dx - diameter;

    while x >= y {
        plot(cx.saturating_add(x), cy.saturating_add(y));
        plot(cx.saturating_add(y), cy.saturating_add(x));
        plot(cx.saturating_sub(y), cy.saturating_add(x));
        plot(cx.saturating_sub(x), cy.saturating_add(y));
        plot(cx.saturating_sub(x), cy.saturating_sub(y));
        plot(cx.saturating_sub(y), cy.saturating_sub(x));
        plot(cx.saturating_add(y), cy.saturating_sub(x));
        plot(cx.saturating_add(x), cy.saturating_sub(y));
        if err <= 0 {
            y += 1;
            err += dy;
            dy += 2;
        }
        if err > 0 {
            x -= 1;
            dx += 2;
            err += dx - diameter;
        }
    }
}
