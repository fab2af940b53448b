//! Upright Core - upload orientation normalization
//!
//! This crate fixes the classic "my photo is sideways" upload bug: phone
//! JPEGs store pixels in sensor order and record the display rotation in the
//! EXIF `Orientation` tag, which many consumers ignore. The pipeline reads
//! that tag with a hand-rolled bounds-checked parser, re-paints the pixels
//! upright through the matching affine transform, and re-encodes the result
//! as a plain JPEG with no orientation metadata.
//!
//! Entry point: [`normalize_upload`]. It is infallible by design - anything
//! that cannot be normalized passes through unchanged.

pub mod decode;
pub mod encode;
pub mod exif;
pub mod normalize;
pub mod orientation;
pub mod transform;

pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode_jpeg, EncodeError};
pub use exif::read_orientation;
pub use normalize::{
    data_url, normalize_upload, reorient_jpeg, NormalizeError, NormalizeOutcome, NormalizedUpload,
    UploadFile, NORMALIZED_JPEG_QUALITY,
};
pub use orientation::{Orientation, OrientationTransform};
pub use transform::apply_transform;
