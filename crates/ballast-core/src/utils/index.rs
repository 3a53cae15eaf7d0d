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

//! # Byte Offsets and Codepoint Indices
//!
//! UTF-8 text has two index spaces: positions in the byte buffer and
//! positions in the decoded codepoint sequence. They coincide only for ASCII,
//! so mixing them is an easy bug to write and a hard one to spot.
//! `TypedIndex<T>` is a transparent `usize` tagged by the space it belongs to,
//! with `ByteOffset` and `CodepointIndex` as the two instances used by the
//! codec and the text types.
//!
//! ```rust
//! use ballast_core::utils::index::{ByteOffset, CodepointIndex};
//!
//! let mut at = ByteOffset::ZERO;
//! at += 3;
//! assert_eq!(at.get(), 3);
//! assert_eq!(format!("{:?}", CodepointIndex::new(1)), "CodepointIndex(1)");
//! ```

/// Names an index space for `Debug` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// The byte-buffer index space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ByteTag;

impl TypedIndexTag for ByteTag {
    const NAME: &'static str = "ByteOffset";
}

/// The decoded-codepoint index space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CodepointTag;

impl TypedIndexTag for CodepointTag {
    const NAME: &'static str = "CodepointIndex";
}

/// A position in a byte buffer.
pub type ByteOffset = TypedIndex<ByteTag>;

/// A position in a decoded codepoint sequence.
pub type CodepointIndex = TypedIndex<CodepointTag>;

/// A `usize` position tagged with the index space `T` it belongs to.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// The first position.
    pub const ZERO: Self = Self::new(0);

    /// Creates a new position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the raw position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::ops::AddAssign<usize> for TypedIndex<T> {
    /// Advances the position by `rhs` units of its own space.
    #[inline(always)]
    fn add_assign(&mut self, rhs: usize) {
        self.index += rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        assert_eq!(ByteOffset::new(10).get(), 10);
        assert_eq!(CodepointIndex::ZERO.get(), 0);
    }

    #[test]
    fn test_debug_names_the_space() {
        assert_eq!(format!("{:?}", ByteOffset::new(7)), "ByteOffset(7)");
        assert_eq!(format!("{:?}", CodepointIndex::new(7)), "CodepointIndex(7)");
    }

    #[test]
    fn test_advance() {
        let mut at = ByteOffset::ZERO;
        at += 3;
        at += 4;
        assert_eq!(at, ByteOffset::new(7));
    }

    #[test]
    fn test_ordering_follows_position() {
        let offsets = [0, 1, 3, 6].map(ByteOffset::new);
        assert_eq!(offsets.binary_search(&ByteOffset::new(3)), Ok(2));
        assert!(offsets.binary_search(&ByteOffset::new(2)).is_err());
    }
}
