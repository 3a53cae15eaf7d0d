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

//! # Ballast Types
//!
//! The value types built on `ballast-core`:
//!
//! - `numeric`: `NumericValue<T>`, a fixed-width number whose arithmetic
//!   fails instead of wrapping, with operators across representations.
//! - `fixed`: `Fixed<B, FRAC>`, a binary fixed-point number with the same
//!   checked semantics, in 16.16 and 32.32 layouts.
//! - `character`: `Character`, one codepoint with ASCII classification.
//! - `string`: `CodepointString`, validated UTF-8 indexed by codepoint.
//! - `value`: the closed unions `AnyNumeric` and `Value` for mixed
//!   collections.
//!
//! ```rust
//! use ballast_types::{CodepointString, Int32, UInt8};
//!
//! let total = (Int32::new(40) + UInt8::new(2)).unwrap();
//! assert_eq!(total.to_string(), "42");
//!
//! let greeting = CodepointString::from("¡hola!");
//! assert_eq!(greeting.length(), 6);
//! assert_eq!(greeting.byte_length(), 7);
//! ```

pub mod character;
pub mod fixed;
pub mod numeric;
pub mod string;
pub mod value;

pub use character::Character;
pub use fixed::Fixed;
pub use numeric::NumericValue;
pub use string::CodepointString;
pub use value::{AnyNumeric, Value};

pub type Int8 = NumericValue<i8>;
pub type Int16 = NumericValue<i16>;
pub type Int32 = NumericValue<i32>;
pub type Int64 = NumericValue<i64>;
pub type Int128 = NumericValue<i128>;
pub type ISize = NumericValue<isize>;
pub type UInt8 = NumericValue<u8>;
pub type UInt16 = NumericValue<u16>;
pub type UInt32 = NumericValue<u32>;
pub type UInt64 = NumericValue<u64>;
pub type UInt128 = NumericValue<u128>;
pub type USize = NumericValue<usize>;
pub type Float32 = NumericValue<f32>;
pub type Float64 = NumericValue<f64>;
pub type Fixed16_16 = Fixed<i32, 16>;
pub type Fixed32_32 = Fixed<i64, 32>;
pub type UFixed16_16 = Fixed<u32, 16>;
pub type UFixed32_32 = Fixed<u64, 32>;
