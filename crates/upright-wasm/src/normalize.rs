//! Upload normalization WASM bindings.
//!
//! This module exposes the upright-core normalization pipeline to
//! JavaScript, so the upload flow can hand over a file's bytes and get back
//! an upright JPEG (or the untouched original) plus a preview data URL.
//!
//! # Functions
//!
//! - [`normalize_upload`] - Normalize an uploaded image's orientation
//! - [`exif_orientation`] - Peek at the raw EXIF orientation code
//!
//! # Example
//!
//! ```typescript
//! import { normalize_upload } from '@upright/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const upload = normalize_upload(bytes, file.type, file.name);
//!
//! preview.src = upload.data_url;
//! const fixed = new File([upload.bytes()], upload.name, {
//!   type: upload.mime_type,
//!   lastModified: Date.now(),
//! });
//! ```

use upright_core::{normalize, NormalizeOutcome};
use wasm_bindgen::prelude::*;

use crate::types::JsNormalizedUpload;

/// Normalize an uploaded image so its pixels are stored upright.
///
/// JPEGs carrying a non-identity EXIF orientation are decoded, re-painted
/// upright, and re-encoded; everything else (non-JPEG MIME types, JPEGs
/// without orientation metadata, undecodable buffers) passes through with
/// the original bytes. This function never throws - normalization is a
/// best-effort enhancement, not a gate the upload flow can fail on.
///
/// # Arguments
///
/// * `bytes` - The uploaded file's bytes as a `Uint8Array`
/// * `mime_type` - The file's declared MIME type (e.g. `image/jpeg`)
/// * `file_name` - The original file name, used to derive the output name
#[wasm_bindgen]
pub fn normalize_upload(bytes: &[u8], mime_type: &str, file_name: &str) -> JsNormalizedUpload {
    let result = normalize::normalize_upload(bytes, mime_type, file_name);

    if result.outcome == NormalizeOutcome::Fallback {
        log_warn("upright: orientation correction failed, passing the original upload through");
    }

    JsNormalizedUpload::from_core(result)
}

/// Read the raw EXIF orientation code (1-8) from a JPEG buffer.
///
/// Returns 0 when the buffer is not a JPEG, carries no orientation tag, or
/// the metadata is malformed. Useful for diagnostics and for skipping an
/// upload round-trip when the orientation is already normal.
#[wasm_bindgen]
pub fn exif_orientation(bytes: &[u8]) -> u8 {
    upright_core::read_orientation(bytes).map_or(0, |orientation| orientation.code() as u8)
}

#[cfg(target_arch = "wasm32")]
fn log_warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn log_warn(_msg: &str) {}


/// WASM-specific tests that exercise the bindings in a browser.
///
/// These run on wasm32 targets only; use `wasm-pack test` to run them.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_normalize_upload_pass_through_in_browser() {
        let bytes = [0u8; 16];
        let upload = normalize_upload(&bytes, "image/webp", "photo.webp");
        assert_eq!(upload.byte_length(), 16);
        assert_eq!(upload.mime_type(), "image/webp");
    }

    #[wasm_bindgen_test]
    fn test_exif_orientation_in_browser() {
        assert_eq!(exif_orientation(&[0x00, 0x01, 0x02]), 0);
    }
}
