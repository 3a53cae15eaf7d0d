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

//! # Checked Numeric Values
//!
//! `NumericValue<T>` wraps one primitive representation and routes every
//! operation through checked arithmetic: a result is either fully computed
//! and in range, or the operation fails with an `Error` and the operands are
//! untouched.
//!
//! ## Operators
//!
//! The arithmetic operators return `Result<NumericValue<T>>`:
//!
//! - `NumericValue<T> op NumericValue<U>` converts the right operand into `T`
//!   first (the receiver's representation wins), then applies `T`'s rules.
//! - `NumericValue<T> op p` for a primitive `p` does the same with `p`.
//! - `p op NumericValue<T>` converts `p` into `T` and keeps the operand
//!   order, so `10 - v` is `NumericValue::<T>::new(10) - v`, never `v - 10`.
//!
//! Bitwise operators are available for integral representations only and
//! never fail. Comparisons across representations compare mathematical
//! values exactly, so equality stays transitive even where `f64` rounds:
//! `u64::MAX` and `u64::MAX - 1` are both below the float `2^64`. Two floats
//! compare with IEEE semantics.
//!
//! ```rust
//! use ballast_core::ErrorKind;
//! use ballast_types::{Int8, Int32, Int64, NumericValue};
//!
//! let a = Int8::new(100);
//! assert_eq!((a * Int8::new(3)).map_err(|e| e.kind()), Err(ErrorKind::Overflow));
//!
//! let b = Int32::new(7);
//! assert_eq!((b / Int32::new(0)).map_err(|e| e.kind()), Err(ErrorKind::DivisionByZero));
//!
//! // Mixed representations: the receiver's representation wins.
//! let c = (Int64::new(5) + Int8::new(-7)).unwrap();
//! assert_eq!(c.get(), -2i64);
//!
//! // Reversed forms keep the operand order.
//! assert_eq!((10i32 - Int32::new(3)).unwrap().get(), 7);
//!
//! // Comparisons work across representations.
//! assert!(NumericValue::new(3u8) > NumericValue::new(-1.5f64));
//! ```

use ballast_core::{
    Error, Result,
    error::DomainFault,
    num::{
        cast,
        exact::exact_cmp,
        repr::{Float, Integral, ReprDescriptor, Representation},
    },
};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub},
    str::FromStr,
};

/// A value of representation `T` with checked arithmetic.
#[repr(transparent)]
#[derive(Clone, Copy, Default)]
pub struct NumericValue<T> {
    raw: T,
}

impl<T: Representation> NumericValue<T> {
    /// The smallest finite value of `T`.
    pub const MIN: Self = Self::new(T::MIN);
    /// The largest finite value of `T`.
    pub const MAX: Self = Self::new(T::MAX);
    /// Zero.
    pub const ZERO: Self = Self::new(T::ZERO);
    /// One.
    pub const ONE: Self = Self::new(T::ONE);

    /// Wraps a raw value. Never fails.
    #[inline(always)]
    pub const fn new(raw: T) -> Self {
        Self { raw }
    }

    /// Returns the raw value.
    #[inline(always)]
    pub fn get(self) -> T {
        self.raw
    }

    /// The descriptor of `T`.
    #[inline(always)]
    pub fn descriptor(self) -> ReprDescriptor {
        T::DESCRIPTOR
    }

    /// Checked addition.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.raw.checked_add_val(rhs.raw).map(Self::new)
    }

    /// Checked subtraction.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        self.raw.checked_sub_val(rhs.raw).map(Self::new)
    }

    /// Checked multiplication.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        self.raw.checked_mul_val(rhs.raw).map(Self::new)
    }

    /// Checked division.
    ///
    /// Fails with `Error::DivisionByZero` for a zero divisor in every
    /// representation, and with `Error::Overflow` for `MIN / -1`.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        self.raw.checked_div_val(rhs.raw).map(Self::new)
    }

    /// Checked remainder.
    ///
    /// Fails with `Error::ModuloByZero` for a zero divisor. Unlike division,
    /// `MIN % -1` succeeds with `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_types::Int16;
    /// assert!(Int16::MIN.checked_div(Int16::new(-1)).is_err());
    /// assert_eq!(Int16::MIN.checked_rem(Int16::new(-1)).unwrap().get(), 0);
    /// ```
    #[inline]
    pub fn checked_rem(self, rhs: Self) -> Result<Self> {
        self.raw.checked_rem_val(rhs.raw).map(Self::new)
    }

    /// Checked negation. Fails for signed `MIN` and for non-zero unsigned values.
    #[inline]
    pub fn checked_neg(self) -> Result<Self> {
        self.raw.checked_neg_val().map(Self::new)
    }

    /// Checked absolute value. Fails for signed `MIN`.
    #[inline]
    pub fn checked_abs(self) -> Result<Self> {
        self.raw.checked_abs_val().map(Self::new)
    }

    /// Adds one.
    #[inline]
    pub fn checked_increment(self) -> Result<Self> {
        self.checked_add(Self::ONE)
    }

    /// Subtracts one.
    #[inline]
    pub fn checked_decrement(self) -> Result<Self> {
        self.checked_sub(Self::ONE)
    }

    /// Adds `rhs` in place; `self` is unchanged if the addition fails.
    #[inline]
    pub fn checked_add_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.checked_add(rhs)?;
        Ok(())
    }

    /// Subtracts `rhs` in place; `self` is unchanged if the subtraction fails.
    #[inline]
    pub fn checked_sub_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.checked_sub(rhs)?;
        Ok(())
    }

    /// Multiplies by `rhs` in place; `self` is unchanged on failure.
    #[inline]
    pub fn checked_mul_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.checked_mul(rhs)?;
        Ok(())
    }

    /// Divides by `rhs` in place; `self` is unchanged on failure.
    #[inline]
    pub fn checked_div_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.checked_div(rhs)?;
        Ok(())
    }

    /// Replaces `self` with `self % rhs`; `self` is unchanged on failure.
    #[inline]
    pub fn checked_rem_assign(&mut self, rhs: Self) -> Result<()> {
        *self = self.checked_rem(rhs)?;
        Ok(())
    }

    /// Returns `-1`, `0` or `1` by sign. NaN stays NaN and `-0.0` maps to zero.
    pub fn signum(self) -> Self {
        if self.raw.is_nan_value() {
            self
        } else if self.raw.below_zero() {
            Self::new(T::from_f64_lossy(-1.0))
        } else if self.is_zero() {
            Self::ZERO
        } else {
            Self::ONE
        }
    }

    /// Returns `true` for zero (including `-0.0`).
    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw == T::ZERO
    }

    /// Truthiness: everything except zero is `true`, NaN included.
    #[inline]
    pub fn to_bool(self) -> bool {
        !self.is_zero()
    }

    /// Total order over `T`: native order for integers and IEEE-754
    /// `totalOrder` for floats, so NaN and signed zeros are ordered.
    ///
    /// The `<`/`==` operators keep the native partial semantics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use std::cmp::Ordering;
    /// # use ballast_types::Float64;
    /// let nan = Float64::new(f64::NAN);
    /// assert_eq!(nan.partial_cmp(&nan), None);
    /// assert_eq!(nan.compare(&Float64::new(f64::INFINITY)), Ordering::Greater);
    /// assert_eq!(Float64::new(-0.0).compare(&Float64::new(0.0)), Ordering::Less);
    /// ```
    #[inline]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.raw.total_order(&other.raw)
    }

    /// Converts into representation `U` under the cast policy.
    ///
    /// # Errors
    ///
    /// `Error::Overflow` if the value is outside `U`'s range or negative with
    /// `U` unsigned, `Error::Casting` for NaN into an integral `U`.
    #[inline]
    pub fn convert_to<U: Representation>(self) -> Result<NumericValue<U>> {
        cast::convert::<T, U>(self.raw).map(NumericValue::new)
    }

    /// Returns `true` if [`Self::convert_to`] would succeed.
    #[inline]
    pub fn can_convert_to<U: Representation>(self) -> bool {
        cast::can_convert::<T, U>(self.raw)
    }

    /// Converts a primitive of any representation into `T`.
    #[inline]
    pub fn try_from_primitive<P: Representation>(value: P) -> Result<Self> {
        cast::convert::<P, T>(value).map(Self::new)
    }
}

impl<T: Integral> NumericValue<T> {
    /// Checked left shift; the amount must lie in `0..bits`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_types::UInt8;
    /// assert_eq!(UInt8::new(0b1000_0001).checked_shl(1).unwrap().get(), 0b0000_0010);
    /// assert!(UInt8::new(1).checked_shl(8).is_err());
    /// assert!(UInt8::new(1).checked_shl(-1).is_err());
    /// ```
    #[inline]
    pub fn checked_shl(self, amount: i64) -> Result<Self> {
        self.raw.checked_shl_val(amount).map(Self::new)
    }

    /// Checked right shift; arithmetic for signed representations.
    #[inline]
    pub fn checked_shr(self, amount: i64) -> Result<Self> {
        self.raw.checked_shr_val(amount).map(Self::new)
    }

    /// The number of set bits.
    #[inline]
    pub fn count_ones(self) -> u32 {
        self.raw.count_ones()
    }
}

impl<T: Float> NumericValue<T> {
    /// Not a number.
    #[inline]
    pub fn nan() -> Self {
        Self::new(T::nan())
    }

    /// Positive infinity.
    #[inline]
    pub fn infinity() -> Self {
        Self::new(T::infinity())
    }

    /// Negative infinity.
    #[inline]
    pub fn neg_infinity() -> Self {
        Self::new(T::neg_infinity())
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.raw.is_nan()
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self.raw.is_infinite()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.raw.is_finite()
    }

    /// Absolute value; never fails for floats.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.raw.abs())
    }

    /// Square root.
    ///
    /// # Errors
    ///
    /// `Error::Domain` for negative input. NaN propagates.
    pub fn sqrt(self) -> Result<Self> {
        if self.raw < T::ZERO {
            return Err(Error::Domain(DomainFault::NegativeSqrt));
        }
        Ok(Self::new(self.raw.sqrt()))
    }

    /// Natural logarithm; `Error::Domain` for input `<= 0`.
    pub fn ln(self) -> Result<Self> {
        self.check_log_domain()?;
        Ok(Self::new(self.raw.ln()))
    }

    /// Base-10 logarithm; `Error::Domain` for input `<= 0`.
    pub fn log10(self) -> Result<Self> {
        self.check_log_domain()?;
        Ok(Self::new(self.raw.log10()))
    }

    fn check_log_domain(self) -> Result<()> {
        if self.raw <= T::ZERO {
            return Err(Error::Domain(DomainFault::NonPositiveLog));
        }
        Ok(())
    }

    #[inline]
    pub fn exp(self) -> Self {
        Self::new(self.raw.exp())
    }

    #[inline]
    pub fn sin(self) -> Self {
        Self::new(self.raw.sin())
    }

    #[inline]
    pub fn cos(self) -> Self {
        Self::new(self.raw.cos())
    }

    #[inline]
    pub fn tan(self) -> Self {
        Self::new(self.raw.tan())
    }

    /// Raises to a floating power.
    #[inline]
    pub fn powf(self, exponent: Self) -> Self {
        Self::new(self.raw.powf(exponent.raw))
    }
}

impl<T: Representation> From<T> for NumericValue<T> {
    #[inline]
    fn from(raw: T) -> Self {
        Self::new(raw)
    }
}

impl<T: Representation> FromStr for NumericValue<T> {
    type Err = Error;

    /// Parses a decimal literal of `T`.
    fn from_str(s: &str) -> Result<Self> {
        T::parse_literal(s).map(Self::new)
    }
}

impl<T: Representation> std::fmt::Display for NumericValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.raw, f)
    }
}

impl<T: Representation> std::fmt::Debug for NumericValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", T::DESCRIPTOR.name(), self.raw)
    }
}

// ----------------------------------------------------------------------------
// Comparisons
// ----------------------------------------------------------------------------

impl<T, U> PartialEq<NumericValue<U>> for NumericValue<T>
where
    T: Representation,
    U: Representation,
{
    #[inline]
    fn eq(&self, other: &NumericValue<U>) -> bool {
        exact_cmp(self.raw, other.raw) == Some(Ordering::Equal)
    }
}

impl<T, U> PartialOrd<NumericValue<U>> for NumericValue<T>
where
    T: Representation,
    U: Representation,
{
    #[inline]
    fn partial_cmp(&self, other: &NumericValue<U>) -> Option<Ordering> {
        exact_cmp(self.raw, other.raw)
    }
}

impl<T: Integral> Eq for NumericValue<T> {}

impl<T: Integral> Ord for NumericValue<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T: Integral> Hash for NumericValue<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

macro_rules! impl_primitive_cmp {
    ($($p:ty),* $(,)?) => {
        $(
            impl<T: Representation> PartialEq<$p> for NumericValue<T> {
                #[inline]
                fn eq(&self, other: &$p) -> bool {
                    exact_cmp(self.raw, *other) == Some(Ordering::Equal)
                }
            }

            impl<T: Representation> PartialOrd<$p> for NumericValue<T> {
                #[inline]
                fn partial_cmp(&self, other: &$p) -> Option<Ordering> {
                    exact_cmp(self.raw, *other)
                }
            }

            impl<T: Representation> PartialEq<NumericValue<T>> for $p {
                #[inline]
                fn eq(&self, other: &NumericValue<T>) -> bool {
                    exact_cmp(*self, other.raw) == Some(Ordering::Equal)
                }
            }

            impl<T: Representation> PartialOrd<NumericValue<T>> for $p {
                #[inline]
                fn partial_cmp(&self, other: &NumericValue<T>) -> Option<Ordering> {
                    exact_cmp(*self, other.raw)
                }
            }
        )*
    };
}

impl_primitive_cmp!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

// ----------------------------------------------------------------------------
// Arithmetic operators
// ----------------------------------------------------------------------------

macro_rules! impl_arith_op {
    ($trait_name:ident, $method:ident, $checked:ident) => {
        impl<T, U> $trait_name<NumericValue<U>> for NumericValue<T>
        where
            T: Representation,
            U: Representation,
        {
            type Output = Result<NumericValue<T>>;

            #[inline]
            fn $method(self, rhs: NumericValue<U>) -> Self::Output {
                self.$checked(rhs.convert_to::<T>()?)
            }
        }

        impl_arith_op!(@primitives $trait_name, $method, $checked,
            i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
    };
    (@primitives $trait_name:ident, $method:ident, $checked:ident, $($p:ty),*) => {
        $(
            impl<T: Representation> $trait_name<$p> for NumericValue<T> {
                type Output = Result<NumericValue<T>>;

                #[inline]
                fn $method(self, rhs: $p) -> Self::Output {
                    self.$checked(NumericValue::try_from_primitive(rhs)?)
                }
            }

            impl<T: Representation> $trait_name<NumericValue<T>> for $p {
                type Output = Result<NumericValue<T>>;

                #[inline]
                fn $method(self, rhs: NumericValue<T>) -> Self::Output {
                    NumericValue::<T>::try_from_primitive(self)?.$checked(rhs)
                }
            }
        )*
    };
}

impl_arith_op!(Add, add, checked_add);
impl_arith_op!(Sub, sub, checked_sub);
impl_arith_op!(Mul, mul, checked_mul);
impl_arith_op!(Div, div, checked_div);
impl_arith_op!(Rem, rem, checked_rem);

impl<T: Representation> Neg for NumericValue<T> {
    type Output = Result<Self>;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg()
    }
}

macro_rules! impl_shift_op {
    ($($p:ty),* $(,)?) => {
        $(
            impl<T: Integral> Shl<$p> for NumericValue<T> {
                type Output = Result<Self>;

                #[inline]
                fn shl(self, amount: $p) -> Self::Output {
                    self.checked_shl(i64::from(amount))
                }
            }

            impl<T: Integral> Shr<$p> for NumericValue<T> {
                type Output = Result<Self>;

                #[inline]
                fn shr(self, amount: $p) -> Self::Output {
                    self.checked_shr(i64::from(amount))
                }
            }
        )*
    };
}

impl_shift_op!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_bit_op {
    ($trait_name:ident, $method:ident, $op:tt) => {
        impl<T: Integral> $trait_name for NumericValue<T> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self::new(self.raw $op rhs.raw)
            }
        }
    };
}

impl_bit_op!(BitAnd, bitand, &);
impl_bit_op!(BitOr, bitor, |);
impl_bit_op!(BitXor, bitxor, ^);

impl<T: Integral> Not for NumericValue<T> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::new(!self.raw)
    }
}
