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

//! # Heterogeneous Values
//!
//! Closed sum types for code that holds values of mixed kinds in one
//! collection. `AnyNumeric` has one variant per representation and
//! `Value` adds booleans, characters and text. Every access is an
//! exhaustive `match`; a kind mismatch is an `Error::Casting`, never a panic.
//!
//! ```rust
//! use ballast_types::{AnyNumeric, Float64, Int8, Value};
//!
//! let items = vec![
//!     Value::from(true),
//!     Value::from(AnyNumeric::from(Int8::new(-3))),
//!     Value::from('x'),
//!     Value::from("text"),
//! ];
//! let names: Vec<&str> = items.iter().map(Value::type_name).collect();
//! assert_eq!(names, ["bool", "int8", "character", "string"]);
//!
//! let n = items[1].as_numeric().unwrap();
//! let sum = n.checked_add(AnyNumeric::from(Float64::new(10.0))).unwrap();
//! assert_eq!(sum, AnyNumeric::from(Int8::new(7)));
//! assert!(items[2].as_numeric().is_err());
//! ```

use crate::{
    character::Character,
    fixed::{Fixed, FixedBase},
    numeric::NumericValue,
    string::CodepointString,
};
use ballast_core::{
    Error, Result,
    num::{
        exact::ExactKey,
        repr::{ReprDescriptor, Representation},
    },
};
use std::cmp::Ordering;

/// A numeric value of any supported representation.
#[derive(Clone, Copy, Debug)]
pub enum AnyNumeric {
    Int8(NumericValue<i8>),
    Int16(NumericValue<i16>),
    Int32(NumericValue<i32>),
    Int64(NumericValue<i64>),
    Int128(NumericValue<i128>),
    ISize(NumericValue<isize>),
    UInt8(NumericValue<u8>),
    UInt16(NumericValue<u16>),
    UInt32(NumericValue<u32>),
    UInt64(NumericValue<u64>),
    UInt128(NumericValue<u128>),
    USize(NumericValue<usize>),
    Float32(NumericValue<f32>),
    Float64(NumericValue<f64>),
    Fixed16_16(Fixed<i32, 16>),
    Fixed32_32(Fixed<i64, 32>),
    UFixed16_16(Fixed<u32, 16>),
    UFixed32_32(Fixed<u64, 32>),
}

/// Binds `$v` to the wrapped value of whichever variant `$value` is.
macro_rules! dispatch {
    ($value:expr, $v:ident => $body:expr) => {
        match $value {
            AnyNumeric::Int8($v) => $body,
            AnyNumeric::Int16($v) => $body,
            AnyNumeric::Int32($v) => $body,
            AnyNumeric::Int64($v) => $body,
            AnyNumeric::Int128($v) => $body,
            AnyNumeric::ISize($v) => $body,
            AnyNumeric::UInt8($v) => $body,
            AnyNumeric::UInt16($v) => $body,
            AnyNumeric::UInt32($v) => $body,
            AnyNumeric::UInt64($v) => $body,
            AnyNumeric::UInt128($v) => $body,
            AnyNumeric::USize($v) => $body,
            AnyNumeric::Float32($v) => $body,
            AnyNumeric::Float64($v) => $body,
            AnyNumeric::Fixed16_16($v) => $body,
            AnyNumeric::Fixed32_32($v) => $body,
            AnyNumeric::UFixed16_16($v) => $body,
            AnyNumeric::UFixed32_32($v) => $body,
        }
    };
}

macro_rules! impl_any_numeric_from {
    ($($variant:ident => $t:ty),* $(,)?) => {
        $(
            impl From<NumericValue<$t>> for AnyNumeric {
                #[inline]
                fn from(v: NumericValue<$t>) -> Self {
                    AnyNumeric::$variant(v)
                }
            }

            impl From<$t> for AnyNumeric {
                #[inline]
                fn from(raw: $t) -> Self {
                    AnyNumeric::$variant(NumericValue::new(raw))
                }
            }
        )*
    };
}

impl_any_numeric_from!(
    Int8 => i8,
    Int16 => i16,
    Int32 => i32,
    Int64 => i64,
    Int128 => i128,
    ISize => isize,
    UInt8 => u8,
    UInt16 => u16,
    UInt32 => u32,
    UInt64 => u64,
    UInt128 => u128,
    USize => usize,
    Float32 => f32,
    Float64 => f64,
);

macro_rules! impl_any_numeric_from_fixed {
    ($($variant:ident => $base:ty, $frac:literal),* $(,)?) => {
        $(
            impl From<Fixed<$base, $frac>> for AnyNumeric {
                #[inline]
                fn from(v: Fixed<$base, $frac>) -> Self {
                    AnyNumeric::$variant(v)
                }
            }
        )*
    };
}

impl_any_numeric_from_fixed!(
    Fixed16_16 => i32, 16,
    Fixed32_32 => i64, 32,
    UFixed16_16 => u32, 16,
    UFixed32_32 => u64, 32,
);

/// What every variant's payload provides to the union.
trait Member: Copy + Into<AnyNumeric> {
    /// Converts any union member into `Self` under the cast policy.
    fn from_any(any: AnyNumeric) -> Result<Self>;

    /// The exact position on the real line; `None` for NaN.
    fn exact_key(self) -> Option<ExactKey>;

    /// The value as `f64` if `Self` is a float representation.
    fn as_float(self) -> Option<f64>;
}

impl<T> Member for NumericValue<T>
where
    T: Representation,
    AnyNumeric: From<NumericValue<T>>,
{
    #[inline]
    fn from_any(any: AnyNumeric) -> Result<Self> {
        any.convert::<T>()
    }

    #[inline]
    fn exact_key(self) -> Option<ExactKey> {
        ExactKey::of(self.get())
    }

    #[inline]
    fn as_float(self) -> Option<f64> {
        (!T::DESCRIPTOR.kind().is_integral()).then(|| self.get().to_f64_lossy())
    }
}

impl<B, const FRAC: u32> Member for Fixed<B, FRAC>
where
    B: FixedBase,
    AnyNumeric: From<Fixed<B, FRAC>>,
{
    fn from_any(any: AnyNumeric) -> Result<Self> {
        match any {
            AnyNumeric::Fixed16_16(v) => Self::rescale(v),
            AnyNumeric::Fixed32_32(v) => Self::rescale(v),
            AnyNumeric::UFixed16_16(v) => Self::rescale(v),
            AnyNumeric::UFixed32_32(v) => Self::rescale(v),
            AnyNumeric::Int8(v) => Self::from_numeric(v),
            AnyNumeric::Int16(v) => Self::from_numeric(v),
            AnyNumeric::Int32(v) => Self::from_numeric(v),
            AnyNumeric::Int64(v) => Self::from_numeric(v),
            AnyNumeric::Int128(v) => Self::from_numeric(v),
            AnyNumeric::ISize(v) => Self::from_numeric(v),
            AnyNumeric::UInt8(v) => Self::from_numeric(v),
            AnyNumeric::UInt16(v) => Self::from_numeric(v),
            AnyNumeric::UInt32(v) => Self::from_numeric(v),
            AnyNumeric::UInt64(v) => Self::from_numeric(v),
            AnyNumeric::UInt128(v) => Self::from_numeric(v),
            AnyNumeric::USize(v) => Self::from_numeric(v),
            AnyNumeric::Float32(v) => Self::from_numeric(v),
            AnyNumeric::Float64(v) => Self::from_numeric(v),
        }
    }

    #[inline]
    fn exact_key(self) -> Option<ExactKey> {
        Fixed::exact_key(self)
    }

    #[inline]
    fn as_float(self) -> Option<f64> {
        None
    }
}

/// Applies `op` in `lhs`'s representation after converting `rhs` into it.
fn combine<M: Member>(lhs: M, rhs: AnyNumeric, op: fn(M, M) -> Result<M>) -> Result<AnyNumeric> {
    op(lhs, M::from_any(rhs)?).map(Into::into)
}

impl AnyNumeric {
    /// The descriptor of the wrapped representation.
    pub fn descriptor(self) -> ReprDescriptor {
        dispatch!(self, v => v.descriptor())
    }

    /// Converts into representation `T` under the cast policy; fixed-point
    /// values truncate toward zero into integral targets.
    pub fn convert<T: Representation>(self) -> Result<NumericValue<T>> {
        dispatch!(self, v => v.convert_to::<T>())
    }

    /// Checked addition in the receiver's representation.
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        dispatch!(self, v => combine(v, rhs, |a, b| a.checked_add(b)))
    }

    /// Checked subtraction in the receiver's representation.
    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        dispatch!(self, v => combine(v, rhs, |a, b| a.checked_sub(b)))
    }

    /// Checked multiplication in the receiver's representation.
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        dispatch!(self, v => combine(v, rhs, |a, b| a.checked_mul(b)))
    }

    /// Checked division in the receiver's representation.
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        dispatch!(self, v => combine(v, rhs, |a, b| a.checked_div(b)))
    }

    /// Checked remainder in the receiver's representation.
    pub fn checked_rem(self, rhs: Self) -> Result<Self> {
        dispatch!(self, v => combine(v, rhs, |a, b| a.checked_rem(b)))
    }

    /// Checked negation.
    pub fn checked_neg(self) -> Result<Self> {
        dispatch!(self, v => v.checked_neg().map(AnyNumeric::from))
    }

    /// Returns `true` for zero in any representation.
    pub fn is_zero(self) -> bool {
        dispatch!(self, v => v.is_zero())
    }

    fn exact_key(self) -> Option<ExactKey> {
        dispatch!(self, v => Member::exact_key(v))
    }

    fn as_float(self) -> Option<f64> {
        dispatch!(self, v => v.as_float())
    }
}

impl PartialEq for AnyNumeric {
    /// Compares mathematical values, so `Int8(3) == Float64(3.0)`.
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for AnyNumeric {
    /// Two floats compare with IEEE semantics; every other pair compares
    /// exactly, without rounding through `f64`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.as_float(), other.as_float()) {
            return a.partial_cmp(&b);
        }
        Some(self.exact_key()?.cmp(&other.exact_key()?))
    }
}

impl std::fmt::Display for AnyNumeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, v => std::fmt::Display::fmt(v, f))
    }
}

/// A value of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Numeric(AnyNumeric),
    Char(Character),
    Text(CodepointString),
}

impl Value {
    /// The kind name: `bool`, a representation name such as `int32`,
    /// `character` or `string`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Numeric(n) => n.descriptor().name(),
            Value::Char(_) => "character",
            Value::Text(_) => "string",
        }
    }

    fn mismatch(&self, to: &'static str) -> Error {
        tracing::trace!(from = self.type_name(), to, "value kind mismatch");
        Error::Casting {
            from: self.type_name(),
            to,
        }
    }

    /// The boolean, or `Error::Casting` for any other kind.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch("bool")),
        }
    }

    /// The numeric union, or `Error::Casting` for any other kind.
    pub fn as_numeric(&self) -> Result<AnyNumeric> {
        match self {
            Value::Numeric(n) => Ok(*n),
            _ => Err(self.mismatch("numeric")),
        }
    }

    /// The character, or `Error::Casting` for any other kind.
    pub fn as_char(&self) -> Result<Character> {
        match self {
            Value::Char(c) => Ok(*c),
            _ => Err(self.mismatch("character")),
        }
    }

    /// The string by reference, or `Error::Casting` for any other kind.
    pub fn as_text(&self) -> Result<&CodepointString> {
        match self {
            Value::Text(s) => Ok(s),
            _ => Err(self.mismatch("string")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<AnyNumeric> for Value {
    fn from(n: AnyNumeric) -> Self {
        Value::Numeric(n)
    }
}

impl<T> From<NumericValue<T>> for Value
where
    T: Representation,
    AnyNumeric: From<NumericValue<T>>,
{
    fn from(n: NumericValue<T>) -> Self {
        Value::Numeric(AnyNumeric::from(n))
    }
}

impl<B, const FRAC: u32> From<Fixed<B, FRAC>> for Value
where
    B: FixedBase,
    AnyNumeric: From<Fixed<B, FRAC>>,
{
    fn from(n: Fixed<B, FRAC>) -> Self {
        Value::Numeric(AnyNumeric::from(n))
    }
}

impl From<Character> for Value {
    fn from(c: Character) -> Self {
        Value::Char(c)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(Character::from(c))
    }
}

impl From<CodepointString> for Value {
    fn from(s: CodepointString) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(CodepointString::from(s))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Numeric(n) => write!(f, "{n}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}
