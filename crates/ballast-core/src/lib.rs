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

//! # Ballast Core
//!
//! Foundations for Ballast's checked value types: the error taxonomy,
//! representation descriptors, overflow detection, checked arithmetic,
//! bounds-checked casts and a permissive UTF-8 codec. Everything here is
//! generic over the primitive representation; the value types themselves
//! live in `ballast-types`.
//!
//! ## Modules
//!
//! - `error`: `Error`, its flat `ErrorKind` classification and the `Result`
//!   alias used across the workspace.
//! - `num`: `ReprDescriptor` and the `Representation` traits, overflow
//!   predicates, `CheckedArithmetic`/`CheckedShift`, and the cast policy.
//! - `text`: the UTF-8 codec (decode, validate, count, index, encode).
//! - `utils`: `ByteOffset` and `CodepointIndex`, tagged positions for the two
//!   index spaces of UTF-8 text.
//!
//! ```rust
//! use ballast_core::num::ops::checked_arithmetic::CheckedArithmetic;
//! use ballast_core::{ErrorKind, num::cast::convert};
//!
//! assert_eq!(i8::MIN.checked_neg_val().map_err(|e| e.kind()), Err(ErrorKind::Overflow));
//! assert_eq!(convert::<u32, i8>(42), Ok(42i8));
//! ```

pub mod error;
pub mod num;
pub mod text;
pub mod utils;

pub use error::{Error, ErrorKind, Result};
