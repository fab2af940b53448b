//! WASM-compatible wrapper types for normalized uploads.
//!
//! This module provides JavaScript-friendly types that wrap the core Upright
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use upright_core::NormalizedUpload;
use wasm_bindgen::prelude::*;

/// A normalized upload wrapper for JavaScript.
///
/// Wraps the core `NormalizedUpload` and exposes the pieces the upload UI
/// needs: the output file name and MIME type, the encoded bytes, and a
/// ready-made `data:` URL for an `<img>` preview.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory; `bytes()` copies them out to a
/// `Uint8Array`. The `free()` method can be called to release WASM memory
/// eagerly, but wasm-bindgen's finalizer handles cleanup automatically.
#[wasm_bindgen]
pub struct JsNormalizedUpload {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
    data_url: String,
    last_modified: f64,
}

#[wasm_bindgen]
impl JsNormalizedUpload {
    /// Get the output file name (extension rewritten to `.jpg` when the
    /// upload was re-encoded).
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Get the output MIME type (`image/jpeg` when re-encoded).
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Get the `data:<mime>;base64,...` representation of the output bytes.
    #[wasm_bindgen(getter)]
    pub fn data_url(&self) -> String {
        self.data_url.clone()
    }

    /// Get the number of encoded output bytes.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Get the modification timestamp (ms since epoch) for the produced
    /// file, mirroring `File.lastModified` on a freshly created file.
    #[wasm_bindgen(getter)]
    pub fn last_modified(&self) -> f64 {
        self.last_modified
    }

    /// Returns the encoded image bytes as a Uint8Array.
    ///
    /// Note: This creates a copy, which is what lets JavaScript construct a
    /// `File`/`Blob` from it without aliasing WASM memory.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this to release a large image immediately.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsNormalizedUpload {
    /// Create a JsNormalizedUpload from a core NormalizedUpload, stamped
    /// with the current time.
    pub(crate) fn from_core(upload: NormalizedUpload) -> Self {
        Self {
            name: upload.file.name,
            mime_type: upload.file.mime_type,
            bytes: upload.file.bytes,
            data_url: upload.data_url,
            last_modified: now_ms(),
        }
    }
}

/// Current time in ms since epoch. `js_sys::Date` only exists in a JS host,
/// so native test builds get a fixed value.
fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upright_core::{NormalizeOutcome, UploadFile};

    #[test]
    fn test_from_core_preserves_fields() {
        let upload = NormalizedUpload {
            file: UploadFile {
                name: "photo.jpg".to_string(),
                mime_type: "image/jpeg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            },
            data_url: "data:image/jpeg;base64,/9j/2Q==".to_string(),
            outcome: NormalizeOutcome::Reoriented,
        };

        let js = JsNormalizedUpload::from_core(upload);
        assert_eq!(js.name(), "photo.jpg");
        assert_eq!(js.mime_type(), "image/jpeg");
        assert_eq!(js.byte_length(), 4);
        assert_eq!(js.bytes(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(js.data_url(), "data:image/jpeg;base64,/9j/2Q==");
    }
}
