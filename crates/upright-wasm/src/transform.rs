//! Orientation transform WASM bindings.
//!
//! Exposes the orientation -> affine-transform table so a widget can apply
//! the correction with a 2D canvas context (`ctx.transform(a, b, c, d, e,
//! f)`) instead of round-tripping pixels through WASM.

use upright_core::Orientation;
use wasm_bindgen::prelude::*;

/// Compute the output geometry and affine matrix for an EXIF orientation
/// code applied to a `width` x `height` source.
///
/// Returns `{ width, height, matrix: [a, b, c, d, e, f] }`. The dimensions
/// swap for the 90/270 degree orientations (codes 5-8).
///
/// # Errors
///
/// Throws when `code` is outside 1-8 or the transform cannot be serialized.
#[wasm_bindgen]
pub fn orientation_transform(code: u16, width: u32, height: u32) -> Result<JsValue, JsValue> {
    let orientation = Orientation::from_exif(code)
        .ok_or_else(|| JsValue::from_str(&format!("invalid EXIF orientation code: {}", code)))?;
    let transform = orientation.transform(width, height);
    serde_wasm_bindgen::to_value(&transform).map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_rotate_90_swaps_dimensions() {
        let value = orientation_transform(6, 640, 480).unwrap();
        let width = js_sys::Reflect::get(&value, &"width".into()).unwrap();
        let height = js_sys::Reflect::get(&value, &"height".into()).unwrap();
        assert_eq!(width.as_f64(), Some(480.0));
        assert_eq!(height.as_f64(), Some(640.0));
    }

    #[wasm_bindgen_test]
    fn test_invalid_code_throws() {
        assert!(orientation_transform(0, 10, 10).is_err());
    }
}
