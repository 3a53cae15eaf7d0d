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

//! # Codepoint Strings
//!
//! `CodepointString` owns a byte buffer that is always well-formed
//! (permissive) UTF-8 and indexes it by codepoint rather than by byte.
//!
//! Validity is established once, when bytes enter from outside
//! ([`CodepointString::from_utf8`]) or when scalars are encoded. Operations
//! that provably preserve it (concatenation, splitting and joining at
//! codepoint boundaries) reuse the bytes without re-validating.
//!
//! The byte offset of every codepoint is computed on first use and cached,
//! so after one O(n) scan `length` and `at` are O(1). The cache is a
//! `OnceLock`; shared references can be used from several threads at once.
//!
//! ```rust
//! use ballast_core::ErrorKind;
//! use ballast_types::{Character, CodepointString};
//!
//! let s = CodepointString::from("café");
//! assert_eq!(s.length(), 4);
//! assert_eq!(s.byte_length(), 5);
//! assert_eq!(s.at(3), Ok(Character::from('é')));
//! assert_eq!(s.at(10).map_err(|e| e.kind()), Err(ErrorKind::StringIndex));
//!
//! let parts = CodepointString::from("a,b,,c").split(Character::from(','));
//! assert_eq!(parts, vec!["a", "b", "", "c"]);
//! ```

use crate::character::Character;
use ballast_core::{
    Error, Result,
    text::codec,
    utils::index::{ByteOffset, CodepointIndex},
};
use std::{
    hash::{Hash, Hasher},
    ops::Add,
    sync::OnceLock,
};

/// Validated UTF-8 text indexed by codepoint.
#[derive(Clone, Default)]
pub struct CodepointString {
    bytes: Vec<u8>,
    boundaries: OnceLock<Box<[ByteOffset]>>,
}

impl CodepointString {
    /// Creates an empty string.
    #[inline]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            boundaries: OnceLock::new(),
        }
    }

    /// Wraps bytes that are already known to be well-formed.
    #[inline]
    fn from_validated(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            boundaries: OnceLock::new(),
        }
    }

    /// Takes ownership of external bytes after validating them.
    ///
    /// # Errors
    ///
    /// `Error::Encoding` with the offset of the first malformed byte. Nothing
    /// is stored on failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_types::CodepointString;
    /// assert!(CodepointString::from_utf8(vec![0x68, 0x69]).is_ok());
    /// assert!(CodepointString::from_utf8(vec![0xE0, 0x80, 0x41]).is_err());
    /// ```
    pub fn from_utf8(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        codec::validate(&bytes)?;
        Ok(Self::from_validated(bytes))
    }

    /// Encodes a scalar sequence.
    ///
    /// # Errors
    ///
    /// `Error::Encoding` if a scalar is above `0x1FFFFF`.
    pub fn from_codepoints(scalars: &[u32]) -> Result<Self> {
        codec::encode(scalars).map(Self::from_validated)
    }

    /// Encodes a sequence of characters.
    pub fn from_characters<I>(chars: I) -> Result<Self>
    where
        I: IntoIterator<Item = Character>,
    {
        let mut bytes = Vec::new();
        for c in chars {
            bytes.extend_from_slice(&c.encode_utf8()?);
        }
        Ok(Self::from_validated(bytes))
    }

    fn boundaries(&self) -> &[ByteOffset] {
        self.boundaries.get_or_init(|| {
            let mut out: Vec<ByteOffset> = codec::scalars(&self.bytes)
                .map_while(|item| item.ok())
                .map(|(offset, _)| offset)
                .collect();
            out.push(ByteOffset::new(self.bytes.len()));
            out.into_boxed_slice()
        })
    }

    #[inline]
    fn span(&self, start: ByteOffset, end: ByteOffset) -> &[u8] {
        &self.bytes[start.get()..end.get()]
    }

    /// The number of codepoints.
    #[inline]
    pub fn length(&self) -> usize {
        self.boundaries().len() - 1
    }

    /// The number of bytes.
    #[inline]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the string holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The `index`-th codepoint.
    ///
    /// # Errors
    ///
    /// `Error::StringIndex` if `index >= self.length()`.
    pub fn at(&self, index: usize) -> Result<Character> {
        let boundaries = self.boundaries();
        let length = boundaries.len() - 1;
        if index >= length {
            return Err(Error::StringIndex { index, length });
        }
        let span = self.span(boundaries[index], boundaries[index + 1]);
        codec::nth(span, 0).map(Character::new)
    }

    /// Up to `count` codepoints starting at codepoint `start`.
    ///
    /// `count` is clamped to the codepoints remaining after `start`, so
    /// `start == length()` yields an empty string. The span is decoded and
    /// re-encoded, which normalizes overlong forms to their shortest encoding.
    ///
    /// # Errors
    ///
    /// `Error::StringIndex` if `start > self.length()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_types::CodepointString;
    /// let s = CodepointString::from("naïve");
    /// assert_eq!(s.substring(2, 2).unwrap(), "ïv");
    /// assert_eq!(s.substring(3, 100).unwrap(), "ve");
    /// assert!(s.substring(5, 1).unwrap().is_empty());
    /// assert!(s.substring(6, 0).is_err());
    /// ```
    pub fn substring(&self, start: usize, count: usize) -> Result<Self> {
        let boundaries = self.boundaries();
        let length = boundaries.len() - 1;
        if start > length {
            return Err(Error::StringIndex {
                index: start,
                length,
            });
        }
        let end = start + count.min(length - start);
        let span = self.span(boundaries[start], boundaries[end]);
        let scalars = codec::decode(span)?;
        Self::from_codepoints(&scalars)
    }

    /// Appends `other` after `self`. Never fails.
    pub fn concat(&self, other: &Self) -> Self {
        let mut bytes = Vec::with_capacity(self.bytes.len() + other.bytes.len());
        bytes.extend_from_slice(&self.bytes);
        bytes.extend_from_slice(&other.bytes);
        Self::from_validated(bytes)
    }

    /// Splits at every occurrence of `delimiter`, which is not included in
    /// any piece.
    ///
    /// Adjacent delimiters produce empty pieces, and text without the
    /// delimiter (including the empty string) yields a single piece.
    pub fn split(&self, delimiter: Character) -> Vec<Self> {
        let mut pieces = Vec::new();
        let mut start = ByteOffset::ZERO;
        let mut scalars = codec::scalars(&self.bytes);
        while let Some(Ok((at, scalar))) = scalars.next() {
            if scalar == delimiter.code_point() {
                pieces.push(Self::from_validated(self.span(start, at).to_vec()));
                start = scalars.offset();
            }
        }
        let end = ByteOffset::new(self.bytes.len());
        pieces.push(Self::from_validated(self.span(start, end).to_vec()));
        pieces
    }

    /// Concatenates `parts` with `self` between each pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_types::CodepointString;
    /// let sep = CodepointString::from(", ");
    /// let parts = ["x", "y", "z"].map(CodepointString::from);
    /// assert_eq!(sep.join(&parts), "x, y, z");
    /// assert!(sep.join(&[]).is_empty());
    /// ```
    pub fn join(&self, parts: &[Self]) -> Self {
        let mut bytes = Vec::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                bytes.extend_from_slice(&self.bytes);
            }
            bytes.extend_from_slice(&part.bytes);
        }
        Self::from_validated(bytes)
    }

    fn find_bytes(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        self.bytes
            .windows(needle.len())
            .position(|window| window == needle)
    }

    /// Returns `true` if `needle` occurs in `self`.
    #[inline]
    pub fn contains(&self, needle: &Self) -> bool {
        self.find_bytes(&needle.bytes).is_some()
    }

    /// The codepoint index of the first occurrence of `needle`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_types::CodepointString;
    /// let s = CodepointString::from("größer");
    /// let at = s.find(&CodepointString::from("ße")).unwrap();
    /// assert_eq!(at.get(), 3);
    /// ```
    pub fn find(&self, needle: &Self) -> Option<CodepointIndex> {
        let byte = ByteOffset::new(self.find_bytes(&needle.bytes)?);
        self.boundaries()
            .binary_search(&byte)
            .ok()
            .map(CodepointIndex::new)
    }

    /// Returns `true` if `prefix` is a byte prefix of this string.
    #[inline]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.bytes.starts_with(&prefix.bytes)
    }

    /// Returns `true` if `suffix` is a byte suffix of this string.
    #[inline]
    pub fn ends_with(&self, suffix: &Self) -> bool {
        self.bytes.ends_with(&suffix.bytes)
    }

    /// Iterates over the codepoints.
    pub fn chars(&self) -> impl Iterator<Item = Character> + '_ {
        codec::scalars(&self.bytes)
            .map_while(|item| item.ok())
            .map(|(_, scalar)| Character::new(scalar))
    }

    /// Encodes the text as UTF-16.
    ///
    /// # Errors
    ///
    /// `Error::Encoding` at the byte offset of the first codepoint above
    /// U+10FFFF.
    pub fn to_utf16(&self) -> Result<Vec<u16>> {
        let mut out = Vec::with_capacity(self.bytes.len());
        for (offset, scalar) in codec::scalars(&self.bytes).map_while(|item| item.ok()) {
            let units = Character::new(scalar)
                .encode_utf16()
                .map_err(|e| match e {
                    Error::Encoding { fault, .. } => Error::encoding(offset.get(), fault),
                    other => other,
                })?;
            out.extend_from_slice(&units);
        }
        Ok(out)
    }

    /// The underlying bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the string and returns its UTF-8 bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Borrows the text as `&str` when it is also strict UTF-8 (no
    /// surrogates, overlongs or values above U+10FFFF).
    #[inline]
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

impl From<&str> for CodepointString {
    #[inline]
    fn from(s: &str) -> Self {
        Self::from_validated(s.as_bytes().to_vec())
    }
}

impl From<String> for CodepointString {
    #[inline]
    fn from(s: String) -> Self {
        Self::from_validated(s.into_bytes())
    }
}

impl From<char> for CodepointString {
    #[inline]
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::from_validated(c.encode_utf8(&mut buf).as_bytes().to_vec())
    }
}

impl TryFrom<Character> for CodepointString {
    type Error = Error;

    fn try_from(c: Character) -> Result<Self> {
        Self::from_characters([c])
    }
}

impl PartialEq for CodepointString {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for CodepointString {}

impl PartialEq<str> for CodepointString {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for CodepointString {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialOrd for CodepointString {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CodepointString {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl Hash for CodepointString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl Add<&CodepointString> for &CodepointString {
    type Output = CodepointString;

    #[inline]
    fn add(self, rhs: &CodepointString) -> CodepointString {
        self.concat(rhs)
    }
}

impl Add for CodepointString {
    type Output = CodepointString;

    fn add(mut self, rhs: CodepointString) -> CodepointString {
        self.bytes.extend_from_slice(&rhs.bytes);
        Self::from_validated(self.bytes)
    }
}

impl std::fmt::Display for CodepointString {
    /// Lossy: codepoints without a `char` form render as U+FFFD.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(s) = self.to_str() {
            return f.write_str(s);
        }
        for c in self.chars() {
            std::fmt::Display::fmt(&c, f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for CodepointString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CodepointString")
            .field(&self.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballast_core::ErrorKind;
    use std::sync::Arc;

    fn s(text: &str) -> CodepointString {
        CodepointString::from(text)
    }

    #[test]
    fn test_cafe_lengths_and_indexing() {
        let cafe = s("café");
        assert_eq!(cafe.length(), 4);
        assert_eq!(cafe.byte_length(), 5);
        assert_eq!(cafe.at(0), Ok(Character::from('c')));
        assert_eq!(cafe.at(3), Ok(Character::from('é')));
        assert_eq!(
            cafe.at(10),
            Err(Error::StringIndex {
                index: 10,
                length: 4
            })
        );
        assert_eq!(cafe.at(4).map_err(|e| e.kind()), Err(ErrorKind::StringIndex));
    }

    #[test]
    fn test_empty() {
        let empty = CodepointString::new();
        assert!(empty.is_empty());
        assert_eq!(empty.length(), 0);
        assert_eq!(empty.at(0).map_err(|e| e.kind()), Err(ErrorKind::StringIndex));
        assert_eq!(empty, s(""));
    }

    #[test]
    fn test_from_utf8_validates() {
        assert_eq!(
            CodepointString::from_utf8(vec![0xFF]).map_err(|e| e.kind()),
            Err(ErrorKind::Encoding)
        );
        assert_eq!(
            CodepointString::from_utf8(vec![0xC0]).map_err(|e| e.kind()),
            Err(ErrorKind::Encoding)
        );
        let ok = CodepointString::from_utf8("😀!".as_bytes()).unwrap();
        assert_eq!(ok.length(), 2);
    }

    #[test]
    fn test_permissive_bytes_are_kept() {
        // A lone surrogate decodes but has no `char`.
        let surrogate = CodepointString::from_utf8(vec![0x61, 0xED, 0xA0, 0x80]).unwrap();
        assert_eq!(surrogate.length(), 2);
        assert_eq!(surrogate.at(1), Ok(Character::new(0xD800)));
        assert_eq!(surrogate.to_str(), None);
        assert_eq!(surrogate.to_string(), "a\u{FFFD}");
    }

    #[test]
    fn test_from_codepoints() {
        assert_eq!(CodepointString::from_codepoints(&[0x68, 0xE9]).unwrap(), "hé");
        assert_eq!(
            CodepointString::from_codepoints(&[0x20_0000]).map_err(|e| e.kind()),
            Err(ErrorKind::Encoding)
        );
        assert_eq!(
            CodepointString::try_from(Character::from('x')).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_substring() {
        let text = s("héllo wörld");
        assert_eq!(text.substring(0, 5).unwrap(), "héllo");
        assert_eq!(text.substring(6, 5).unwrap(), "wörld");
        assert_eq!(text.substring(6, 50).unwrap(), "wörld");
        assert!(text.substring(11, 3).unwrap().is_empty());
        assert_eq!(
            text.substring(12, 0).map_err(|e| e.kind()),
            Err(ErrorKind::StringIndex)
        );
    }

    #[test]
    fn test_substring_reencodes_overlong_forms() {
        let overlong = CodepointString::from_utf8(vec![0xC1, 0x81, 0x62]).unwrap();
        assert_eq!(overlong.length(), 2);
        let copy = overlong.substring(0, 2).unwrap();
        assert_eq!(copy.as_bytes(), b"Ab");
    }

    #[test]
    fn test_concat_and_add() {
        let a = s("ab");
        let b = s("ç");
        let joined = a.concat(&b);
        assert_eq!(joined, "abç");
        assert_eq!(joined.length(), 3);
        assert_eq!(&a + &b, joined);
        assert_eq!(a + b, joined);
    }

    #[test]
    fn test_split() {
        let comma = Character::from(',');
        assert_eq!(s("a,b,,c").split(comma), vec!["a", "b", "", "c"]);
        assert_eq!(s("abc").split(comma), vec!["abc"]);
        assert_eq!(s("").split(comma), vec![""]);
        assert_eq!(s(",").split(comma), vec!["", ""]);
        assert_eq!(s("ä→ö→ü").split(Character::from('→')), vec!["ä", "ö", "ü"]);
    }

    #[test]
    fn test_split_skips_the_full_width_of_an_overlong_delimiter() {
        // 0xC0 0xAC is a two-byte overlong ','.
        let text = CodepointString::from_utf8(vec![0x61, 0xC0, 0xAC, 0x62]).unwrap();
        assert_eq!(text.split(Character::from(',')), vec!["a", "b"]);
    }

    #[test]
    fn test_join() {
        let parts = vec![s("a"), s(""), s("c")];
        assert_eq!(s("-").join(&parts), "a--c");
        assert_eq!(s("-").join(&parts[..1]), "a");
    }

    #[test]
    fn test_search() {
        let text = s("año nuevo");
        assert!(text.contains(&s("ño")));
        assert!(!text.contains(&s("nö")));
        assert!(text.contains(&s("")));
        assert!(text.starts_with(&s("añ")));
        assert!(text.ends_with(&s("vo")));
        assert_eq!(text.find(&s("nuevo")).map(|i| i.get()), Some(4));
        assert_eq!(text.find(&s("x")), None);
        assert_eq!(text.find(&s("")).map(|i| i.get()), Some(0));
    }

    #[test]
    fn test_chars_and_utf16() {
        let text = s("a😀");
        let chars: Vec<Character> = text.chars().collect();
        assert_eq!(chars, vec![Character::from('a'), Character::from('😀')]);
        let expected: Vec<u16> = "a😀".encode_utf16().collect();
        assert_eq!(text.to_utf16(), Ok(expected));

        let beyond = CodepointString::from_codepoints(&[0x61, 0x11_0000]).unwrap();
        assert_eq!(
            beyond.to_utf16().map_err(|e| e.kind()),
            Err(ErrorKind::Encoding)
        );
    }

    #[test]
    fn test_structural_equality() {
        // Precomposed and decomposed forms are different strings.
        assert_ne!(s("é"), s("e\u{301}"));
        assert!(s("a") < s("b"));
        assert_eq!(s("x").into_bytes(), b"x".to_vec());
        assert_eq!(CodepointString::from('ß'), "ß");
        assert_eq!(CodepointString::from(String::from("ok")), "ok");
    }

    #[test]
    fn test_shared_reads_across_threads() {
        let text = Arc::new(s("ünïcödé"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let text = Arc::clone(&text);
                std::thread::spawn(move || (text.length(), text.at(i).ok()))
            })
            .collect();
        for handle in handles {
            let (length, c) = handle.join().unwrap();
            assert_eq!(length, 7);
            assert!(c.is_some());
        }
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", s("hi")), "CodepointString(\"hi\")");
    }
}
