//! Minimal EXIF orientation reader for JPEG buffers.
//!
//! Walks the JPEG marker segments looking for an APP1/Exif payload, then
//! follows the embedded TIFF structure (endianness header, IFD0 entry table)
//! to the `Orientation` tag (0x0112).
//!
//! The robustness contract is deliberately permissive: any structural
//! anomaly - a truncated buffer, a bad endianness token, an entry table
//! overrunning the buffer - resolves to "absent" rather than an error.
//! Malformed metadata must never block the upload flow.

use thiserror::Error;

use crate::orientation::Orientation;

/// JPEG Start-Of-Image marker.
const MARKER_SOI: u16 = 0xFFD8;
/// End-Of-Image: terminates the segment walk.
const MARKER_EOI: u8 = 0xD9;
/// Start-Of-Scan: EXIF metadata always precedes scan data.
const MARKER_SOS: u8 = 0xDA;
/// APP1, the segment EXIF lives in.
const MARKER_APP1: u8 = 0xE1;

/// TIFF byte-order tokens: "II" (Intel) and "MM" (Motorola).
const BYTE_ORDER_LITTLE: u16 = 0x4949;
const BYTE_ORDER_BIG: u16 = 0x4D4D;

/// The EXIF Orientation tag.
const TAG_ORIENTATION: u16 = 0x0112;
/// TIFF SHORT field type.
const TYPE_SHORT: u16 = 3;
/// Size of one IFD entry: tag (2) + type (2) + count (4) + value/offset (4).
const IFD_ENTRY_LEN: usize = 12;

/// A bounds-violating read while parsing EXIF metadata.
///
/// Internal to the reader: `read_orientation` maps every parse failure to
/// "absent" instead of surfacing it.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ExifParseError {
    #[error("read of {wanted} bytes at offset {offset} overruns {len}-byte buffer")]
    OutOfBounds {
        offset: usize,
        wanted: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

/// Bounds-checked positional reader over a byte slice.
///
/// Every read validates `offset + wanted` against the remaining length, so
/// the marker walk can probe arbitrary declared offsets without risking an
/// out-of-bounds access.
struct ByteReader<'a> {
    buf: &'a [u8],
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    fn bytes_at(&self, offset: usize, wanted: usize) -> Result<&'a [u8], ExifParseError> {
        let end = offset.checked_add(wanted).filter(|&end| end <= self.buf.len());
        match end {
            Some(end) => Ok(&self.buf[offset..end]),
            None => Err(ExifParseError::OutOfBounds {
                offset,
                wanted,
                len: self.buf.len(),
            }),
        }
    }

    fn u8_at(&self, offset: usize) -> Result<u8, ExifParseError> {
        Ok(self.bytes_at(offset, 1)?[0])
    }

    fn u16_at(&self, offset: usize, endian: Endian) -> Result<u16, ExifParseError> {
        let b = self.bytes_at(offset, 2)?;
        Ok(match endian {
            Endian::Little => u16::from_le_bytes([b[0], b[1]]),
            Endian::Big => u16::from_be_bytes([b[0], b[1]]),
        })
    }

    fn u32_at(&self, offset: usize, endian: Endian) -> Result<u32, ExifParseError> {
        let b = self.bytes_at(offset, 4)?;
        Ok(match endian {
            Endian::Little => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            Endian::Big => u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
        })
    }
}

/// Outcome of scanning one APP1 segment.
enum App1Scan {
    /// Orientation tag found; raw value still needs range validation.
    Found(u16),
    /// No usable Exif payload here; keep walking marker segments.
    NotFound,
    /// Structural dead end (truncated TIFF header, unknown byte order);
    /// the whole read resolves to absent.
    Abort,
}

/// Extract the EXIF `Orientation` tag from a JPEG buffer.
///
/// Returns `None` when the buffer is not a JPEG, carries no EXIF orientation,
/// or the metadata is malformed in any way. Never panics and never reads out
/// of bounds, whatever the input.
pub fn read_orientation(bytes: &[u8]) -> Option<Orientation> {
    let r = ByteReader::new(bytes);
    if r.len() < 4 {
        return None;
    }
    if r.u16_at(0, Endian::Big).ok()? != MARKER_SOI {
        return None;
    }

    let mut offset = 2usize;
    while offset + 4 < r.len() {
        if r.u8_at(offset).ok()? != 0xFF {
            break;
        }
        let marker = r.u8_at(offset + 1).ok()?;
        offset += 2;

        if marker == MARKER_EOI || marker == MARKER_SOS {
            break;
        }

        // Segment length includes its own two bytes.
        let size = r.u16_at(offset, Endian::Big).ok()? as usize;
        if size < 2 {
            break;
        }

        if marker == MARKER_APP1 {
            match scan_app1(&r, offset + 2) {
                App1Scan::Found(value) => return Orientation::from_exif(value),
                App1Scan::Abort => return None,
                App1Scan::NotFound => {}
            }
        }

        offset += size;
    }

    None
}

/// Scan an APP1 segment body starting at `exif_offset` for the Orientation
/// tag in IFD0.
fn scan_app1(r: &ByteReader<'_>, exif_offset: usize) -> App1Scan {
    // Byte-exact "Exif\0\0" header; anything else is some other APP1 payload
    // (XMP also uses APP1), so the marker walk continues.
    match r.bytes_at(exif_offset, 6) {
        Ok(b"Exif\0\0") => {}
        _ => return App1Scan::NotFound,
    }

    let tiff = exif_offset + 6;
    // The 8-byte TIFF header must fit: byte order (2), magic (2), IFD0
    // offset (4).
    if tiff + 8 > r.len() {
        return App1Scan::Abort;
    }

    let endian = match r.u16_at(tiff, Endian::Big) {
        Ok(BYTE_ORDER_LITTLE) => Endian::Little,
        Ok(BYTE_ORDER_BIG) => Endian::Big,
        _ => return App1Scan::Abort,
    };

    let ifd_offset = match r.u32_at(tiff + 4, endian) {
        Ok(v) => v as usize,
        Err(_) => return App1Scan::Abort,
    };
    // IFD offsets are relative to the TIFF header start.
    let ifd0 = match tiff.checked_add(ifd_offset) {
        Some(v) => v,
        None => return App1Scan::Abort,
    };

    let entries = match r.u16_at(ifd0, endian) {
        Ok(n) => n as usize,
        Err(_) => return App1Scan::Abort,
    };

    let table = ifd0 + 2;
    for i in 0..entries {
        let entry = table + i * IFD_ENTRY_LEN;
        if entry + IFD_ENTRY_LEN > r.len() {
            break;
        }
        let Ok(tag) = r.u16_at(entry, endian) else {
            break;
        };
        if tag != TAG_ORIENTATION {
            continue;
        }
        let (Ok(kind), Ok(count)) = (r.u16_at(entry + 2, endian), r.u32_at(entry + 4, endian))
        else {
            break;
        };
        if kind == TYPE_SHORT && count == 1 {
            // SHORT with count 1 is inlined in the value field, not a
            // pointer.
            return match r.u16_at(entry + 8, endian) {
                Ok(value) => App1Scan::Found(value),
                Err(_) => App1Scan::Abort,
            };
        }
        // Type/count mismatch on the Orientation tag: conservatively treat
        // as not found, keep scanning the remaining entries.
    }

    App1Scan::NotFound
}



#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Arbitrary bytes never panic and never yield an out-of-range code.
        #[test]
        fn prop_arbitrary_bytes_terminate(bytes in prop::collection::vec(any::<u8>(), 0..1024)) {
            if let Some(orientation) = read_orientation(&bytes) {
                prop_assert!((1..=8).contains(&orientation.code()));
            }
        }

        /// Garbage behind a valid SOI marker still degrades to absent or a
        /// valid code, without panicking.
        #[test]
        fn prop_soi_prefixed_garbage_terminates(tail in prop::collection::vec(any::<u8>(), 0..1024)) {
            let mut bytes = vec![0xFF, 0xD8];
            bytes.extend_from_slice(&tail);
            if let Some(orientation) = read_orientation(&bytes) {
                prop_assert!((1..=8).contains(&orientation.code()));
            }
        }

        /// Random single-byte corruption of a well-formed EXIF JPEG never
        /// panics.
        #[test]
        fn prop_corrupted_exif_terminates(pos in 0usize..64, value in any::<u8>()) {
            let entries = [fixtures::Entry::orientation(6)];
            let mut jpeg = fixtures::jpeg_with_exif(true, &entries);
            let pos = pos % jpeg.len();
            jpeg[pos] = value;
            let _ = read_orientation(&jpeg);
        }
    }
}
