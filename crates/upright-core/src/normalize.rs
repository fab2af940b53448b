//! The upload normalization pipeline.
//!
//! Phone photos routinely arrive as JPEGs whose pixels are stored sideways
//! or mirrored, with the correction recorded in the EXIF `Orientation` tag.
//! [`normalize_upload`] rewrites such uploads into upright JPEGs; everything
//! else - non-JPEG formats, JPEGs without an orientation tag, buffers whose
//! metadata or pixel data turn out to be broken - passes through untouched.
//!
//! Normalization is best-effort by contract: no failure inside this module
//! ever surfaces to the caller, the upload flow always gets a usable result.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_jpeg, EncodeError};
use crate::exif::read_orientation;
use crate::orientation::Orientation;
use crate::transform::apply_transform;

/// Fixed quality for re-encoded uploads, matching canvas `toBlob(..., 0.92)`
/// on the usual 0-100 JPEG scale. Deliberately not configurable.
pub const NORMALIZED_JPEG_QUALITY: u8 = 92;

/// An upload's bytes together with its file name and declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    /// File name, with the extension rewritten to `.jpg` after re-encoding.
    pub name: String,
    /// Declared MIME type (`image/jpeg` after re-encoding).
    pub mime_type: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// Result of normalizing an upload: the (possibly re-encoded) file plus a
/// `data:` URL ready for an `<img>` preview or a JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedUpload {
    pub file: UploadFile,
    pub data_url: String,
    /// How this result was produced; lets callers log or surface a
    /// correction that was needed but could not be applied.
    pub outcome: NormalizeOutcome,
}

/// How [`normalize_upload`] arrived at its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizeOutcome {
    /// No correction was needed; the original bytes passed through.
    PassThrough,
    /// The upload was decoded, painted upright, and re-encoded.
    Reoriented,
    /// A correction was needed but decoding or encoding failed; the
    /// original bytes passed through instead.
    Fallback,
}

/// A failure inside the re-orientation path. Recovered internally by
/// [`normalize_upload`]; exposed for callers that use [`reorient_jpeg`]
/// directly.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Normalize an uploaded image so its pixels are stored upright.
///
/// * Non-JPEG MIME types pass through unchanged: PNG and WebP store pixels
///   upright already, only JPEG commonly carries EXIF orientation.
/// * JPEGs with no orientation tag, or orientation 1, pass through without
///   decoding - the overwhelmingly common case stays a cheap no-op.
/// * Otherwise the buffer is decoded, painted through the orientation's
///   affine transform, and re-encoded as JPEG at quality
///   [`NORMALIZED_JPEG_QUALITY`]. The file name's trailing `.jpg`/`.jpeg`
///   extension (any case) becomes `.jpg` and the MIME type is reset to
///   `image/jpeg`.
/// * Any decode or encode failure falls back to the original bytes.
///
/// Never fails and never panics on untrusted input.
pub fn normalize_upload(bytes: &[u8], mime_type: &str, file_name: &str) -> NormalizedUpload {
    if !is_jpeg_mime(mime_type) {
        return pass_through(bytes, mime_type, file_name);
    }

    let orientation = match read_orientation(bytes) {
        Some(orientation) if orientation != Orientation::Normal => orientation,
        _ => return pass_through(bytes, mime_type, file_name),
    };

    match reorient_jpeg(bytes, orientation) {
        Ok(upright) => {
            let data_url = data_url("image/jpeg", &upright);
            NormalizedUpload {
                file: UploadFile {
                    name: normalized_name(file_name),
                    mime_type: "image/jpeg".to_string(),
                    bytes: upright,
                },
                data_url,
                outcome: NormalizeOutcome::Reoriented,
            }
        }
        // Best effort: a broken image still proceeds through the upload
        // flow with its original bytes.
        Err(_) => NormalizedUpload {
            outcome: NormalizeOutcome::Fallback,
            ..pass_through(bytes, mime_type, file_name)
        },
    }
}

/// Decode a JPEG, paint it upright for `orientation`, and re-encode it.
///
/// # Errors
///
/// Returns [`NormalizeError`] when the buffer cannot be decoded or the
/// upright raster cannot be encoded.
pub fn reorient_jpeg(bytes: &[u8], orientation: Orientation) -> Result<Vec<u8>, NormalizeError> {
    let image = decode_image(bytes)?;
    let transform = orientation.transform(image.width, image.height);
    let upright = apply_transform(&image, &transform);
    Ok(encode_jpeg(
        &upright.pixels,
        upright.width,
        upright.height,
        NORMALIZED_JPEG_QUALITY,
    )?)
}

/// Render `bytes` as a `data:<mime>;base64,<payload>` URL.
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

fn is_jpeg_mime(mime_type: &str) -> bool {
    mime_type == "image/jpeg" || mime_type == "image/jpg"
}

fn pass_through(bytes: &[u8], mime_type: &str, file_name: &str) -> NormalizedUpload {
    NormalizedUpload {
        file: UploadFile {
            name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        },
        data_url: data_url(mime_type, bytes),
        outcome: NormalizeOutcome::PassThrough,
    }
}

/// Rewrite a trailing `.jpg`/`.jpeg` extension (case-insensitive) to `.jpg`.
/// Names without that suffix are kept as-is.
fn normalized_name(file_name: &str) -> String {
    for ext in [".jpeg", ".jpg"] {
        if file_name.len() >= ext.len() {
            let split = file_name.len() - ext.len();
            // The suffix comparison is pure ASCII, so `split` is a valid
            // char boundary whenever it matches.
            if file_name.as_bytes()[split..].eq_ignore_ascii_case(ext.as_bytes()) {
                return format!("{}.jpg", &file_name[..split]);
            }
        }
    }
    file_name.to_string()
}
