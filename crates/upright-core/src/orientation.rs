//! EXIF orientation codes and their pixel-space transforms.
//!
//! Cameras record sensor data in a fixed orientation and store the rotation
//! needed for upright display in the EXIF `Orientation` tag (1-8). This
//! module models those eight codes and maps each one to the affine transform
//! that re-projects source pixels into an upright output raster.

use serde::{Deserialize, Serialize};

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip + rotate 90 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90Cw = 6,
    /// Transverse (flip + rotate 90 CCW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270Cw = 8,
}

/// Output geometry plus the 2D affine matrix `[a, b, c, d, e, f]` that maps
/// source pixel space into upright output space, applied as
/// `x' = a*x + c*y + e, y' = b*x + d*y + f`.
///
/// Derived purely from `(orientation, source width, source height)`; the
/// output dimensions swap for the 90/270 degree family (codes 5-8).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationTransform {
    /// Output raster width in pixels.
    pub width: u32,
    /// Output raster height in pixels.
    pub height: u32,
    /// Affine matrix `[a, b, c, d, e, f]`.
    pub matrix: [f64; 6],
}

impl Orientation {
    /// Parse a raw EXIF tag value.
    ///
    /// Returns `None` for anything outside 1-8. Malformed metadata must not
    /// mis-rotate an image, so out-of-range values are treated as absent
    /// rather than coerced to `Normal`.
    pub fn from_exif(value: u16) -> Option<Orientation> {
        match value {
            1 => Some(Orientation::Normal),
            2 => Some(Orientation::FlipHorizontal),
            3 => Some(Orientation::Rotate180),
            4 => Some(Orientation::FlipVertical),
            5 => Some(Orientation::Transpose),
            6 => Some(Orientation::Rotate90Cw),
            7 => Some(Orientation::Transverse),
            8 => Some(Orientation::Rotate270Cw),
            _ => None,
        }
    }

    /// The raw EXIF tag value (1-8).
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Returns true if this orientation swaps width and height.
    ///
    /// Rotations of 90 and 270 degrees (and their flip variants
    /// Transpose/Transverse) swap the image dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90Cw
                | Orientation::Transverse
                | Orientation::Rotate270Cw
        )
    }

    /// Compute the output geometry and affine matrix for a `width` x `height`
    /// source.
    ///
    /// Pure lookup, integer-exact for the dimension swaps. `Normal` yields
    /// the identity transform; callers normally short-circuit that case
    /// before decoding anything.
    pub fn transform(self, width: u32, height: u32) -> OrientationTransform {
        let w = width as f64;
        let h = height as f64;
        let (out_w, out_h, matrix) = match self {
            Orientation::Normal => (width, height, [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
            Orientation::FlipHorizontal => (width, height, [-1.0, 0.0, 0.0, 1.0, w, 0.0]),
            Orientation::Rotate180 => (width, height, [-1.0, 0.0, 0.0, -1.0, w, h]),
            Orientation::FlipVertical => (width, height, [1.0, 0.0, 0.0, -1.0, 0.0, h]),
            Orientation::Transpose => (height, width, [0.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
            Orientation::Rotate90Cw => (height, width, [0.0, 1.0, -1.0, 0.0, h, 0.0]),
            Orientation::Transverse => (height, width, [0.0, -1.0, -1.0, 0.0, h, w]),
            Orientation::Rotate270Cw => (height, width, [0.0, -1.0, 1.0, 0.0, 0.0, w]),
        };
        OrientationTransform {
            width: out_w,
            height: out_h,
            matrix,
        }
    }
}
