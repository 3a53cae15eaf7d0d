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

//! # Characters
//!
//! `Character` is a single codepoint stored as a raw 32-bit scalar. No range
//! invariant is enforced: surrogates and values above U+10FFFF are valid
//! `Character`s, they merely have no `char` or UTF-16 form. Classification is
//! ASCII-only.
//!
//! ```rust
//! use ballast_types::Character;
//!
//! let c = Character::from('7');
//! assert!(c.is_digit() && c.is_alnum());
//! assert_eq!(c.to_digit().unwrap().get(), 7);
//!
//! let surrogate = Character::new(0xD800);
//! assert!(!surrogate.is_scalar_value());
//! assert_eq!(surrogate.encode_utf8().unwrap().as_slice(), &[0xED, 0xA0, 0x80]);
//! ```

use crate::numeric::NumericValue;
use ballast_core::{
    Error, Result,
    error::EncodingFault,
    text::codec::{self, MAX_UNICODE},
};
use smallvec::SmallVec;

/// A single codepoint.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Character {
    scalar: u32,
}

impl Character {
    /// Wraps a raw scalar. Never fails.
    #[inline(always)]
    pub const fn new(scalar: u32) -> Self {
        Self { scalar }
    }

    /// The raw scalar value.
    #[inline(always)]
    pub const fn code_point(self) -> u32 {
        self.scalar
    }

    /// `'0'..='9'`.
    #[inline]
    pub const fn is_digit(self) -> bool {
        matches!(self.scalar, 0x30..=0x39)
    }

    /// `'a'..='z'` or `'A'..='Z'`.
    #[inline]
    pub const fn is_alpha(self) -> bool {
        matches!(self.scalar, 0x41..=0x5A | 0x61..=0x7A)
    }

    #[inline]
    pub const fn is_alnum(self) -> bool {
        self.is_alpha() || self.is_digit()
    }

    /// Space, tab, line feed or carriage return.
    #[inline]
    pub const fn is_whitespace(self) -> bool {
        matches!(self.scalar, 0x20 | 0x09 | 0x0A | 0x0D)
    }

    #[inline]
    pub const fn is_ascii(self) -> bool {
        self.scalar < 0x80
    }

    /// Returns `true` if the value is a Unicode scalar value (not a surrogate
    /// and not above U+10FFFF). Nothing else in this type depends on it.
    #[inline]
    pub const fn is_scalar_value(self) -> bool {
        char::from_u32(self.scalar).is_some()
    }

    /// The numeric value of an ASCII digit.
    ///
    /// # Errors
    ///
    /// `Error::Casting` if the character is not `'0'..='9'`.
    pub fn to_digit(self) -> Result<NumericValue<i32>> {
        if !self.is_digit() {
            tracing::trace!(code_point = self.scalar, "not a decimal digit");
            return Err(Error::Casting {
                from: "character",
                to: "int32",
            });
        }
        Ok(NumericValue::new((self.scalar - 0x30) as i32))
    }

    /// The `char` for this value, if it is a Unicode scalar value.
    #[inline]
    pub const fn to_char(self) -> Option<char> {
        char::from_u32(self.scalar)
    }

    /// The UTF-8 bytes of this character.
    ///
    /// # Errors
    ///
    /// `Error::Encoding` above `0x1FFFFF`.
    pub fn encode_utf8(self) -> Result<SmallVec<[u8; 4]>> {
        let mut buf = [0u8; 4];
        let width = codec::encode_scalar(self.scalar, &mut buf)?;
        Ok(SmallVec::from_slice(&buf[..width]))
    }

    /// The UTF-16 code units of this character.
    ///
    /// # Errors
    ///
    /// `Error::Encoding` above U+10FFFF. Surrogates pass through as a single
    /// unit.
    pub fn encode_utf16(self) -> Result<SmallVec<[u16; 2]>> {
        match self.scalar {
            0..=0xFFFF => Ok(SmallVec::from_slice(&[self.scalar as u16])),
            0x1_0000..=MAX_UNICODE => {
                let v = self.scalar - 0x1_0000;
                let high = 0xD800 | (v >> 10) as u16;
                let low = 0xDC00 | (v & 0x3FF) as u16;
                Ok(SmallVec::from_slice(&[high, low]))
            }
            _ => Err(Error::encoding(
                0,
                EncodingFault::OutsideUtf16(self.scalar),
            )),
        }
    }
}

impl From<char> for Character {
    #[inline]
    fn from(c: char) -> Self {
        Self::new(u32::from(c))
    }
}

impl From<u32> for Character {
    #[inline]
    fn from(scalar: u32) -> Self {
        Self::new(scalar)
    }
}

impl From<Character> for u32 {
    #[inline]
    fn from(c: Character) -> Self {
        c.scalar
    }
}

impl std::fmt::Display for Character {
    /// Non-scalar values render as U+FFFD.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        f.write_char(self.to_char().unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character(U+{:04X})", self.scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_core::ErrorKind;

    #[test]
    fn test_classification() {
        for c in '0'..='9' {
            assert!(Character::from(c).is_digit());
            assert!(!Character::from(c).is_alpha());
        }
        assert!(Character::from('q').is_alpha());
        assert!(Character::from('Z').is_alnum());
        assert!(!Character::from('é').is_alpha());
        assert!(!Character::from('_').is_alnum());
        for c in [' ', '\t', '\n', '\r'] {
            assert!(Character::from(c).is_whitespace());
        }
        assert!(!Character::from('\u{A0}').is_whitespace());
        assert!(Character::from('~').is_ascii());
        assert!(!Character::from('€').is_ascii());
    }

    #[test]
    fn test_to_digit() {
        assert_eq!(Character::from('0').to_digit().map(NumericValue::get), Ok(0));
        assert_eq!(Character::from('9').to_digit().map(NumericValue::get), Ok(9));
        assert_eq!(
            Character::from('a').to_digit().map_err(|e| e.kind()),
            Err(ErrorKind::Casting)
        );
    }

    #[test]
    fn test_permissive_range() {
        let surrogate = Character::new(0xDFFF);
        assert!(!surrogate.is_scalar_value());
        assert_eq!(surrogate.to_char(), None);
        assert_eq!(surrogate.to_string(), "\u{FFFD}");

        let beyond = Character::new(0x11_0000);
        assert_eq!(beyond.encode_utf8().map(|b| b.len()), Ok(4));
        assert_eq!(
            beyond.encode_utf16().map_err(|e| e.kind()),
            Err(ErrorKind::Encoding)
        );
        assert_eq!(
            Character::new(0x20_0000).encode_utf8().map_err(|e| e.kind()),
            Err(ErrorKind::Encoding)
        );
    }

    #[test]
    fn test_encodings_agree_with_std() {
        for c in ['a', 'é', '€', '😀'] {
            let ch = Character::from(c);
            let mut utf8 = [0u8; 4];
            let mut utf16 = [0u16; 2];
            assert_eq!(
                ch.encode_utf8().unwrap().as_slice(),
                c.encode_utf8(&mut utf8).as_bytes()
            );
            assert_eq!(
                ch.encode_utf16().unwrap().as_slice(),
                &*c.encode_utf16(&mut utf16)
            );
        }
    }

    #[test]
    fn test_display_and_debug() {
        assert_eq!(Character::from('ß').to_string(), "ß");
        assert_eq!(format!("{:?}", Character::from('A')), "Character(U+0041)");
        assert_eq!(u32::from(Character::from('A')), 0x41);
        assert!(Character::from('a') > Character::from('A'));
    }
}
