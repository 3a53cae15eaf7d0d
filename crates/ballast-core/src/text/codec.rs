// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # UTF-8 Codec
//!
//! A stateless state machine over byte buffers. Each leading byte is
//! classified by its high bits into a sequence length:
//!
//! | Leading byte | Length | Payload bits |
//! |--------------|--------|--------------|
//! | `0xxxxxxx`   | 1      | 7            |
//! | `110xxxxx`   | 2      | 5            |
//! | `1110xxxx`   | 3      | 4            |
//! | `11110xxx`   | 4      | 3            |
//!
//! and must be followed by exactly `length - 1` continuation bytes
//! (`10xxxxxx`), each contributing six more bits.
//!
//! The codec is permissive: overlong forms, surrogates and scalars up to
//! `0x1FFFFF` decode without complaint, and `encode` produces the shortest
//! form for every scalar in that range. It is therefore a superset of Rust's
//! `str` validation, and `decode(encode(v)) == v` holds for every `v` it
//! accepts.
//!
//! ```rust
//! use ballast_core::error::ErrorKind;
//! use ballast_core::text::codec;
//!
//! let bytes = "café".as_bytes();
//! assert_eq!(codec::count(bytes), Ok(4));
//! assert_eq!(codec::nth(bytes, 3), Ok(0xE9));
//! assert_eq!(codec::decode(&[0xFF]).map_err(|e| e.kind()), Err(ErrorKind::Encoding));
//! assert_eq!(codec::encode(&[0x63, 0xE9]), Ok(vec![0x63, 0xC3, 0xA9]));
//! ```

use crate::{
    error::{EncodingFault, Error, Result},
    utils::index::ByteOffset,
};
use std::iter::FusedIterator;

/// The largest scalar with a (four-byte) encoding.
pub const MAX_ENCODABLE: u32 = 0x1F_FFFF;

/// The largest Unicode scalar value.
pub const MAX_UNICODE: u32 = 0x10_FFFF;

/// Returns the sequence length announced by `lead`, or `None` if `lead`
/// cannot start a sequence.
///
/// # Examples
///
/// ```rust
/// # use ballast_core::text::codec::sequence_len;
/// assert_eq!(sequence_len(b'a'), Some(1));
/// assert_eq!(sequence_len(0xC3), Some(2));
/// assert_eq!(sequence_len(0xF4), Some(4));
/// assert_eq!(sequence_len(0x80), None);
/// assert_eq!(sequence_len(0xF8), None);
/// ```
#[inline]
pub const fn sequence_len(lead: u8) -> Option<usize> {
    if lead & 0x80 == 0x00 {
        Some(1)
    } else if lead & 0xE0 == 0xC0 {
        Some(2)
    } else if lead & 0xF0 == 0xE0 {
        Some(3)
    } else if lead & 0xF8 == 0xF0 {
        Some(4)
    } else {
        None
    }
}

#[inline(always)]
const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes the sequence starting at `at`, returning the scalar and its width.
#[inline]
fn decode_at(bytes: &[u8], at: usize) -> Result<(u32, usize)> {
    let lead = bytes[at];
    let width = sequence_len(lead)
        .ok_or(Error::encoding(at, EncodingFault::InvalidLeadingByte(lead)))?;

    let available = bytes.len() - at;
    if available < width {
        return Err(Error::encoding(
            at,
            EncodingFault::Truncated {
                expected: width,
                available,
            },
        ));
    }

    let mut scalar = match width {
        1 => return Ok((u32::from(lead), 1)),
        2 => u32::from(lead & 0x1F),
        3 => u32::from(lead & 0x0F),
        _ => u32::from(lead & 0x07),
    };
    for (i, &byte) in bytes[at + 1..at + width].iter().enumerate() {
        if !is_continuation(byte) {
            return Err(Error::encoding(
                at + 1 + i,
                EncodingFault::InvalidContinuation(byte),
            ));
        }
        scalar = (scalar << 6) | u32::from(byte & 0x3F);
    }
    Ok((scalar, width))
}

/// Streams the scalars of a byte buffer together with their byte offsets.
///
/// Yields `Err` once for the first malformed sequence and then stops.
#[derive(Debug, Clone)]
pub struct Scalars<'a> {
    bytes: &'a [u8],
    at: ByteOffset,
    failed: bool,
}

impl<'a> Scalars<'a> {
    /// Creates an iterator over `bytes`.
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            at: ByteOffset::ZERO,
            failed: false,
        }
    }

    /// The offset of the next sequence to be decoded; after a scalar has
    /// been yielded, this is the end of that scalar.
    #[inline]
    pub const fn offset(&self) -> ByteOffset {
        self.at
    }
}

impl Iterator for Scalars<'_> {
    type Item = Result<(ByteOffset, u32)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.at.get() >= self.bytes.len() {
            return None;
        }
        match decode_at(self.bytes, self.at.get()) {
            Ok((scalar, width)) => {
                let offset = self.at;
                self.at += width;
                Some(Ok((offset, scalar)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.bytes.len() - self.at.get();
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Scalars<'_> {}

/// Returns a streaming iterator over the scalars of `bytes`.
#[inline]
pub const fn scalars(bytes: &[u8]) -> Scalars<'_> {
    Scalars::new(bytes)
}

/// Decodes `bytes` into scalar values.
///
/// # Errors
///
/// `Error::Encoding` with the offset of the first malformed byte.
pub fn decode(bytes: &[u8]) -> Result<Vec<u32>> {
    let mut out = Vec::with_capacity(bytes.len());
    for item in scalars(bytes) {
        let (_, scalar) = item?;
        out.push(scalar);
    }
    Ok(out)
}

/// Checks `bytes` and reports the first fault, if any.
///
/// This is the entry point for bytes arriving from outside; rejections are
/// logged at debug level.
pub fn validate(bytes: &[u8]) -> Result<()> {
    for item in scalars(bytes) {
        if let Err(e) = item {
            tracing::debug!(len = bytes.len(), error = %e, "rejected UTF-8 input");
            return Err(e);
        }
    }
    Ok(())
}

/// Returns `true` if `bytes` is well-formed under the permissive rules.
///
/// # Examples
///
/// ```rust
/// # use ballast_core::text::codec::is_valid_utf8;
/// assert!(is_valid_utf8(b""));
/// assert!(is_valid_utf8("héllo".as_bytes()));
/// // Overlong encoding of '/' is accepted.
/// assert!(is_valid_utf8(&[0xC0, 0xAF]));
/// assert!(!is_valid_utf8(&[0xE0, 0x80, 0x41]));
/// ```
#[inline]
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    scalars(bytes).all(|item| item.is_ok())
}

/// Counts the scalars in `bytes` without materializing them.
pub fn count(bytes: &[u8]) -> Result<usize> {
    let mut n = 0;
    for item in scalars(bytes) {
        item?;
        n += 1;
    }
    Ok(n)
}

/// Returns the `index`-th scalar of `bytes` by a linear scan.
///
/// # Errors
///
/// `Error::StringIndex` if `index` is at or beyond the decoded length, and
/// `Error::Encoding` if a malformed sequence is met before `index` is reached.
pub fn nth(bytes: &[u8], index: usize) -> Result<u32> {
    let mut seen = 0;
    for item in scalars(bytes) {
        let (_, scalar) = item?;
        if seen == index {
            return Ok(scalar);
        }
        seen += 1;
    }
    Err(Error::StringIndex {
        index,
        length: seen,
    })
}

/// Encodes one scalar into `buf`, returning the number of bytes written.
///
/// # Errors
///
/// `Error::Encoding` with `EncodingFault::UnencodableScalar` above
/// [`MAX_ENCODABLE`]; the reported offset is `0`.
///
/// # Examples
///
/// ```rust
/// # use ballast_core::text::codec::encode_scalar;
/// let mut buf = [0u8; 4];
/// assert_eq!(encode_scalar(0x20AC, &mut buf), Ok(3));
/// assert_eq!(&buf[..3], "€".as_bytes());
/// assert!(encode_scalar(0x20_0000, &mut buf).is_err());
/// ```
pub fn encode_scalar(scalar: u32, buf: &mut [u8; 4]) -> Result<usize> {
    let width = match scalar {
        0..=0x7F => {
            buf[0] = scalar as u8;
            return Ok(1);
        }
        0x80..=0x7FF => {
            buf[0] = 0xC0 | (scalar >> 6) as u8;
            2
        }
        0x800..=0xFFFF => {
            buf[0] = 0xE0 | (scalar >> 12) as u8;
            3
        }
        0x1_0000..=MAX_ENCODABLE => {
            buf[0] = 0xF0 | (scalar >> 18) as u8;
            4
        }
        _ => {
            return Err(Error::encoding(
                0,
                EncodingFault::UnencodableScalar(scalar),
            ));
        }
    };
    for (i, slot) in buf[1..width].iter_mut().enumerate() {
        let shift = 6 * (width - 2 - i);
        *slot = 0x80 | ((scalar >> shift) & 0x3F) as u8;
    }
    Ok(width)
}

/// Encodes a scalar sequence into bytes, all or nothing.
///
/// # Errors
///
/// `Error::Encoding` whose offset is the position of the first unencodable
/// scalar in `scalars`.
pub fn encode(scalars: &[u32]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(scalars.len());
    let mut buf = [0u8; 4];
    for (i, &scalar) in scalars.iter().enumerate() {
        let width = encode_scalar(scalar, &mut buf).map_err(|e| match e {
            Error::Encoding { fault, .. } => Error::encoding(i, fault),
            other => other,
        })?;
        out.extend_from_slice(&buf[..width]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_rejects_lone_invalid_leading_byte() {
        assert_eq!(
            decode(&[0xFF]),
            Err(Error::encoding(0, EncodingFault::InvalidLeadingByte(0xFF)))
        );
        assert_eq!(
            decode(&[0x41, 0x80]),
            Err(Error::encoding(1, EncodingFault::InvalidLeadingByte(0x80)))
        );
    }

    #[test]
    fn test_rejects_truncated_sequence() {
        assert_eq!(
            decode(&[0xC0]),
            Err(Error::encoding(
                0,
                EncodingFault::Truncated {
                    expected: 2,
                    available: 1
                }
            ))
        );
        assert_eq!(
            count(&[0x61, 0xF0, 0x90, 0x80]).map_err(|e| e.kind()),
            Err(ErrorKind::Encoding)
        );
    }

    #[test]
    fn test_rejects_bad_continuation() {
        assert_eq!(
            decode(&[0xE0, 0x80, 0x41]),
            Err(Error::encoding(2, EncodingFault::InvalidContinuation(0x41)))
        );
        assert!(!is_valid_utf8(&[0xE0, 0x80, 0x41]));
    }

    #[test]
    fn test_permissive_forms() {
        // Overlong NUL, a lone surrogate and a scalar above U+10FFFF.
        assert_eq!(decode(&[0xC0, 0x80]), Ok(vec![0]));
        assert_eq!(decode(&[0xED, 0xA0, 0x80]), Ok(vec![0xD800]));
        assert_eq!(decode(&[0xF7, 0xBF, 0xBF, 0xBF]), Ok(vec![MAX_ENCODABLE]));
    }

    #[test]
    fn test_agrees_with_std_on_strict_text() {
        let text = "aé€😀 ∑x";
        let expected: Vec<u32> = text.chars().map(u32::from).collect();
        assert_eq!(decode(text.as_bytes()), Ok(expected));
        assert_eq!(count(text.as_bytes()), Ok(text.chars().count()));
        assert_eq!(encode(&decode(text.as_bytes()).unwrap()).unwrap(), text.as_bytes());
    }

    #[test]
    fn test_nth() {
        let bytes = "café".as_bytes();
        assert_eq!(nth(bytes, 0), Ok(u32::from('c')));
        assert_eq!(nth(bytes, 3), Ok(0xE9));
        assert_eq!(
            nth(bytes, 10),
            Err(Error::StringIndex {
                index: 10,
                length: 4
            })
        );
        assert_eq!(nth(&[0x61, 0xFF], 0), Ok(0x61));
        assert_eq!(nth(&[0x61, 0xFF], 1).map_err(|e| e.kind()), Err(ErrorKind::Encoding));
    }

    #[test]
    fn test_scalars_stops_after_error() {
        let mut it = scalars(&[0x61, 0xFF, 0x62]);
        assert_eq!(it.next(), Some(Ok((ByteOffset::new(0), 0x61))));
        assert!(matches!(it.next(), Some(Err(_))));
        assert_eq!(it.next(), None);
        assert_eq!(it.offset(), ByteOffset::new(1));
    }

    #[test]
    fn test_scalars_offset_advances_by_width() {
        let mut it = scalars("a€😀".as_bytes());
        assert_eq!(it.offset(), ByteOffset::ZERO);
        assert_eq!(it.next(), Some(Ok((ByteOffset::new(0), 0x61))));
        assert_eq!(it.offset(), ByteOffset::new(1));
        assert_eq!(it.next(), Some(Ok((ByteOffset::new(1), 0x20AC))));
        assert_eq!(it.offset(), ByteOffset::new(4));
        assert_eq!(it.next(), Some(Ok((ByteOffset::new(4), 0x1F600))));
        assert_eq!(it.offset(), ByteOffset::new(8));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_encode_widths_and_limits() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_scalar(0x7F, &mut buf), Ok(1));
        assert_eq!(encode_scalar(0x80, &mut buf), Ok(2));
        assert_eq!(encode_scalar(0x7FF, &mut buf), Ok(2));
        assert_eq!(encode_scalar(0x800, &mut buf), Ok(3));
        assert_eq!(encode_scalar(0xFFFF, &mut buf), Ok(3));
        assert_eq!(encode_scalar(0x1_0000, &mut buf), Ok(4));
        assert_eq!(encode_scalar(MAX_ENCODABLE, &mut buf), Ok(4));
        assert_eq!(buf, [0xF7, 0xBF, 0xBF, 0xBF]);
        assert_eq!(
            encode(&[0x41, 0x20_0000]),
            Err(Error::encoding(
                1,
                EncodingFault::UnencodableScalar(0x20_0000)
            ))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(b""), Ok(vec![]));
        assert_eq!(count(b""), Ok(0));
        assert!(validate(b"").is_ok());
        assert_eq!(encode(&[]), Ok(vec![]));
    }
}
