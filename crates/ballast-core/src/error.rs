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

//! # Error Taxonomy
//!
//! Every fallible operation in Ballast reports one `Error`. The variants carry
//! structured context (the failing operation, byte offsets, indices, the
//! representations involved), while `Error::kind` collapses them onto the
//! flat `ErrorKind` vocabulary that callers match on.
//!
//! ```rust
//! use ballast_core::error::{Error, ErrorKind, Operation};
//!
//! let err = Error::Overflow(Operation::Mul);
//! assert_eq!(err.kind(), ErrorKind::Overflow);
//! assert_eq!(err.to_string(), "arithmetic overflow in multiplication");
//! ```

use thiserror::Error;

/// A convenience alias used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The flat classification of every error Ballast can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A result or conversion is outside the representable range.
    Overflow,
    /// A division had a zero divisor.
    DivisionByZero,
    /// A modulo had a zero divisor.
    ModuloByZero,
    /// Bytes are not well-formed UTF-8, or a scalar has no UTF-8 form.
    Encoding,
    /// A codepoint index is at or beyond the decoded length.
    StringIndex,
    /// A conversion has no valid interpretation at all.
    Casting,
    /// A floating-point function was evaluated outside its domain.
    Domain,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Overflow => "OverflowError",
            Self::DivisionByZero => "DivisionByZeroError",
            Self::ModuloByZero => "ModuloByZeroError",
            Self::Encoding => "EncodingError",
            Self::StringIndex => "StringIndexError",
            Self::Casting => "CastingError",
            Self::Domain => "DomainError",
        };
        f.write_str(name)
    }
}

/// The arithmetic or conversion step that overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Abs,
    /// Left shift by the given (rejected) amount.
    ShiftLeft(i64),
    /// Right shift by the given (rejected) amount.
    ShiftRight(i64),
    /// A conversion between two representations, named by their descriptors.
    Conversion {
        from: &'static str,
        to: &'static str,
    },
    /// A textual literal did not fit the target representation.
    Parse { to: &'static str },
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "addition"),
            Self::Sub => write!(f, "subtraction"),
            Self::Mul => write!(f, "multiplication"),
            Self::Div => write!(f, "division"),
            Self::Neg => write!(f, "negation"),
            Self::Abs => write!(f, "absolute value"),
            Self::ShiftLeft(n) => write!(f, "left shift by {n}"),
            Self::ShiftRight(n) => write!(f, "right shift by {n}"),
            Self::Conversion { from, to } => write!(f, "conversion from {from} to {to}"),
            Self::Parse { to } => write!(f, "parsing a {to} literal"),
        }
    }
}

/// The specific way a byte sequence failed to be UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingFault {
    /// The byte cannot start a sequence (`10xxxxxx` or `11111xxx`).
    InvalidLeadingByte(u8),
    /// The buffer ended before the sequence was complete.
    Truncated { expected: usize, available: usize },
    /// A byte inside the sequence did not match `10xxxxxx`.
    InvalidContinuation(u8),
    /// The scalar does not fit the four-byte form.
    UnencodableScalar(u32),
    /// The scalar is above U+10FFFF and cannot be expressed in UTF-16.
    OutsideUtf16(u32),
}

impl std::fmt::Display for EncodingFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLeadingByte(b) => write!(f, "invalid leading byte 0x{b:02X}"),
            Self::Truncated {
                expected,
                available,
            } => write!(
                f,
                "truncated sequence: expected {expected} bytes, found {available}"
            ),
            Self::InvalidContinuation(b) => write!(f, "invalid continuation byte 0x{b:02X}"),
            Self::UnencodableScalar(v) => write!(f, "scalar 0x{v:X} has no UTF-8 form"),
            Self::OutsideUtf16(v) => write!(f, "scalar 0x{v:X} has no UTF-16 form"),
        }
    }
}

/// A floating-point function evaluated outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainFault {
    NegativeSqrt,
    NonPositiveLog,
}

impl std::fmt::Display for DomainFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeSqrt => write!(f, "square root of a negative number"),
            Self::NonPositiveLog => write!(f, "logarithm of a non-positive number"),
        }
    }
}

/// The error type for every fallible Ballast operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("arithmetic overflow in {0}")]
    Overflow(Operation),

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("invalid UTF-8 at byte {offset}: {fault}")]
    Encoding { offset: usize, fault: EncodingFault },

    #[error("codepoint index {index} out of range for length {length}")]
    StringIndex { index: usize, length: usize },

    #[error("cannot cast {from} to {to}")]
    Casting {
        from: &'static str,
        to: &'static str,
    },

    #[error("domain error: {0}")]
    Domain(DomainFault),
}

impl Error {
    /// Returns the taxonomy entry for this error.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::ModuloByZero => ErrorKind::ModuloByZero,
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::StringIndex { .. } => ErrorKind::StringIndex,
            Self::Casting { .. } => ErrorKind::Casting,
            Self::Domain(_) => ErrorKind::Domain,
        }
    }

    /// Shorthand for an encoding error at `offset`.
    #[inline]
    pub const fn encoding(offset: usize, fault: EncodingFault) -> Self {
        Self::Encoding { offset, fault }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::Overflow(Operation::Add).kind(), ErrorKind::Overflow);
        assert_eq!(Error::DivisionByZero.kind(), ErrorKind::DivisionByZero);
        assert_eq!(Error::ModuloByZero.kind(), ErrorKind::ModuloByZero);
        assert_eq!(
            Error::encoding(0, EncodingFault::InvalidLeadingByte(0xFF)).kind(),
            ErrorKind::Encoding
        );
        assert_eq!(
            Error::StringIndex {
                index: 4,
                length: 4
            }
            .kind(),
            ErrorKind::StringIndex
        );
        assert_eq!(
            Error::Casting {
                from: "float64",
                to: "int32"
            }
            .kind(),
            ErrorKind::Casting
        );
        assert_eq!(
            Error::Domain(DomainFault::NegativeSqrt).kind(),
            ErrorKind::Domain
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::Overflow(Operation::Conversion {
                from: "int16",
                to: "uint8"
            })
            .to_string(),
            "arithmetic overflow in conversion from int16 to uint8"
        );
        assert_eq!(
            Error::encoding(
                2,
                EncodingFault::Truncated {
                    expected: 3,
                    available: 1
                }
            )
            .to_string(),
            "invalid UTF-8 at byte 2: truncated sequence: expected 3 bytes, found 1"
        );
        assert_eq!(
            Error::Overflow(Operation::ShiftLeft(-1)).to_string(),
            "arithmetic overflow in left shift by -1"
        );
        assert_eq!(ErrorKind::StringIndex.to_string(), "StringIndexError");
    }
}
