//! Upright WASM - WebAssembly bindings for Upright
//!
//! This crate exposes the upright-core upload normalization to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for normalized uploads
//! - `normalize` - Upload normalization bindings
//! - `transform` - Orientation -> canvas transform lookup
//!
//! # Usage
//!
//! ```typescript
//! import init, { normalize_upload } from '@upright/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const upload = normalize_upload(bytes, file.type, file.name);
//! preview.src = upload.data_url;
//! ```

use wasm_bindgen::prelude::*;

mod normalize;
mod transform;
mod types;

// Re-export public types
pub use normalize::{exif_orientation, normalize_upload};
pub use transform::orientation_transform;
pub use types::JsNormalizedUpload;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
