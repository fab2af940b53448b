//! Painting pixels through an orientation transform.
//!
//! The affine matrices in [`crate::orientation`] are signed permutation
//! matrices with integral translations, so forward-mapping each source pixel
//! center through the matrix and flooring is integer-exact: every source
//! pixel lands on exactly one output pixel and the output raster is covered
//! completely.

use crate::decode::DecodedImage;
use crate::orientation::OrientationTransform;

/// Re-project `image` into a new raster through `transform`.
///
/// Allocates an output of `transform.width` x `transform.height` and copies
/// each source pixel to the position its center maps to. Pixels mapping
/// outside the output raster are skipped; that cannot happen for the
/// orientation table's matrices, the guard only protects against a
/// hand-built transform.
pub fn apply_transform(image: &DecodedImage, transform: &OrientationTransform) -> DecodedImage {
    let [a, b, c, d, e, f] = transform.matrix;
    let out_w = transform.width as usize;
    let out_h = transform.height as usize;
    let src_w = image.width as usize;

    let mut pixels = vec![0u8; out_w * out_h * 3];
    for y in 0..image.height as usize {
        for x in 0..src_w {
            // Map the pixel center so sign flips land on the right cell.
            let sx = x as f64 + 0.5;
            let sy = y as f64 + 0.5;
            let dx = (a * sx + c * sy + e).floor();
            let dy = (b * sx + d * sy + f).floor();
            if dx < 0.0 || dy < 0.0 || dx >= out_w as f64 || dy >= out_h as f64 {
                continue;
            }

            let src = (y * src_w + x) * 3;
            let dst = (dy as usize * out_w + dx as usize) * 3;
            pixels[dst..dst + 3].copy_from_slice(&image.pixels[src..src + 3]);
        }
    }

    DecodedImage::new(transform.width, transform.height, pixels)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::orientation::Orientation;
    use proptest::prelude::*;

    fn orientation_strategy() -> impl Strategy<Value = Orientation> {
        (1u16..=8).prop_map(|code| Orientation::from_exif(code).unwrap())
    }

    proptest! {
        /// Every orientation is a pixel permutation: dimensions follow the
        /// table and the pixel multiset is preserved exactly.
        #[test]
        fn prop_transform_permutes_pixels(
            (width, height) in (1u32..=16, 1u32..=16),
            orientation in orientation_strategy(),
        ) {
            let size = (width * height * 3) as usize;
            let pixels: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
            let img = DecodedImage::new(width, height, pixels);

            let t = orientation.transform(width, height);
            let out = apply_transform(&img, &t);

            if orientation.swaps_dimensions() {
                prop_assert_eq!((out.width, out.height), (height, width));
            } else {
                prop_assert_eq!((out.width, out.height), (width, height));
            }

            let mut src: Vec<[u8; 3]> = img.pixels.chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            let mut dst: Vec<[u8; 3]> = out.pixels.chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            src.sort_unstable();
            dst.sort_unstable();
            prop_assert_eq!(src, dst);
        }
    }
}
