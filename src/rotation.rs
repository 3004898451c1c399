//! Coordinate rotation utilities
//!
//! Every drawing primitive maps logical (screen) coordinates to physical
//! (buffer) coordinates through [`transform`]. Rectangles go through
//! [`transform_rect`], which is built from the same point transform so the
//! two paths cannot disagree.
//!
//! ## Rotation Modes
//!
//! - **Rotate0**: identity
//! - **Rotate90**: swap `(x, y)`, then mirror x
//! - **Rotate180**: mirror both axes
//! - **Rotate270**: swap `(x, y)`, then mirror y
//!
//! Coordinates are signed so callers may pass points past the edges; the
//! result is clipped by the plane, not here. The arithmetic saturates, so an
//! extreme input lands far off the plane instead of wrapping back onto it.
//!
//! ## Example
//!
//! ```
//! use il0373::{rotation::transform, Rotation};
//!
//! // On an 8x8 plane, logical (3, 3) lands on physical (4, 3) at 90 degrees
//! assert_eq!(transform(3, 3, 8, 8, Rotation::Rotate90), (4, 3));
//! assert_eq!(transform(3, 3, 8, 8, Rotation::Rotate0), (3, 3));
//! ```

use crate::config::Rotation;

/// Map a logical coordinate to a physical one
///
/// `width` and `height` are the physical (unrotated) plane dimensions.
/// The mapping is a bijection from the logical rectangle
/// ([`logical_size`]) onto `[0, width) x [0, height)`.
pub fn transform(x: i32, y: i32, width: i32, height: i32, rotation: Rotation) -> (i32, i32) {
    match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (mirror(y, width), x),
        Rotation::Rotate180 => (mirror(x, width), mirror(y, height)),
        Rotation::Rotate270 => (y, mirror(x, height)),
    }
}

/// `extent - value - 1`, saturating at the `i32` bounds
fn mirror(value: i32, extent: i32) -> i32 {
    extent.saturating_sub(value).saturating_sub(1)
}

/// Map a logical rectangle to the physical rectangle covering the same pixels
///
/// Returns `(x, y, w, h)` in physical coordinates, or `None` when `w` or `h`
/// is less than 1.
#[allow(clippy::many_single_char_names)]
pub fn transform_rect(
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    width: i32,
    height: i32,
    rotation: Rotation,
) -> Option<(i32, i32, i32, i32)> {
    if w < 1 || h < 1 {
        return None;
    }
    let (ax, ay) = transform(x, y, width, height, rotation);
    let (bx, by) = transform(
        x.saturating_add(w - 1),
        y.saturating_add(h - 1),
        width,
        height,
        rotation,
    );
    let span = |a: i32, b: i32| {
        i32::try_from(a.abs_diff(b))
            .unwrap_or(i32::MAX)
            .saturating_add(1)
    };
    Some((ax.min(bx), ay.min(by), span(ax, bx), span(ay, by)))
}

/// Logical `(width, height)` of a plane after rotation
pub fn logical_size(width: i32, height: i32, rotation: Rotation) -> (i32, i32) {
    if rotation.is_odd() {
        (height, width)
    } else {
        (width, height)
    }
}
