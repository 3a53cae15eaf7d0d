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

//! # Checked Arithmetic
//!
//! By-value checked operations returning `Result` for every supported
//! representation. Each operation has exactly one integral algorithm and one
//! floating algorithm, both generic; the macros at the bottom of this module
//! only bind the primitives to them.
//!
//! Integral algorithms ask the predicates in [`crate::num::overflow`] first
//! and compute the raw result only once it is known to fit, so a failed
//! operation never produces a partially wrapped value. Floating algorithms use
//! raw IEEE-754 arithmetic; only a zero divisor is rejected.
//!
//! ```rust
//! use ballast_core::error::{Error, Operation};
//! use ballast_core::num::ops::checked_arithmetic::{CheckedArithmetic, CheckedShift};
//!
//! assert_eq!(100i8.checked_mul_val(3), Err(Error::Overflow(Operation::Mul)));
//! assert_eq!(i32::MIN.checked_rem_val(-1), Ok(0));
//! assert_eq!(1u8.checked_shl_val(8), Err(Error::Overflow(Operation::ShiftLeft(8))));
//! assert!(f64::MAX.checked_mul_val(2.0).is_ok_and(f64::is_infinite));
//! ```

use crate::{
    error::{Error, Operation, Result},
    num::overflow,
};
use num_traits::PrimInt;

/// Checked binary and unary arithmetic by value.
pub trait CheckedArithmetic: Sized + Copy {
    /// Checked addition. Integral overflow fails with `Error::Overflow`.
    fn checked_add_val(self, v: Self) -> Result<Self>;

    /// Checked subtraction. Integral overflow fails with `Error::Overflow`.
    fn checked_sub_val(self, v: Self) -> Result<Self>;

    /// Checked multiplication. Integral overflow fails with `Error::Overflow`.
    fn checked_mul_val(self, v: Self) -> Result<Self>;

    /// Checked division.
    ///
    /// Fails with `Error::DivisionByZero` for a zero divisor (including `±0.0`)
    /// and with `Error::Overflow` for `MIN / -1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_core::error::Error;
    /// # use ballast_core::num::ops::checked_arithmetic::CheckedArithmetic;
    /// assert_eq!(7i32.checked_div_val(0), Err(Error::DivisionByZero));
    /// assert_eq!(1.0f32.checked_div_val(-0.0), Err(Error::DivisionByZero));
    /// assert_eq!(7u16.checked_div_val(2), Ok(3));
    /// ```
    fn checked_div_val(self, v: Self) -> Result<Self>;

    /// Checked remainder.
    ///
    /// Fails with `Error::ModuloByZero` for a zero divisor. `MIN % -1` is `0`.
    fn checked_rem_val(self, v: Self) -> Result<Self>;

    /// Checked negation.
    ///
    /// Signed `MIN` fails. For unsigned types only `0` can be negated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_core::num::ops::checked_arithmetic::CheckedArithmetic;
    /// assert!(i8::MIN.checked_neg_val().is_err());
    /// assert_eq!(0u32.checked_neg_val(), Ok(0));
    /// assert!(5u32.checked_neg_val().is_err());
    /// ```
    fn checked_neg_val(self) -> Result<Self>;

    /// Checked absolute value. Signed `MIN` fails.
    fn checked_abs_val(self) -> Result<Self>;
}

/// Checked shifts by a signed amount.
///
/// The amount must lie in `0..bits`; bits shifted out are discarded. Right
/// shifts of signed values are arithmetic.
pub trait CheckedShift: Sized + Copy {
    /// Checked left shift.
    fn checked_shl_val(self, amount: i64) -> Result<Self>;

    /// Checked right shift.
    fn checked_shr_val(self, amount: i64) -> Result<Self>;
}

#[cold]
fn overflow(op: Operation) -> Error {
    tracing::trace!(operation = %op, "checked arithmetic overflowed");
    Error::Overflow(op)
}

#[inline]
fn bits_of<T: PrimInt>() -> u32 {
    T::zero().count_zeros()
}

/// Integral addition.
#[inline]
pub fn integral_add<T: PrimInt>(a: T, b: T) -> Result<T> {
    if overflow::add_overflows(a, b) {
        return Err(overflow(Operation::Add));
    }
    Ok(a + b)
}

/// Integral subtraction.
#[inline]
pub fn integral_sub<T: PrimInt>(a: T, b: T) -> Result<T> {
    if overflow::sub_overflows(a, b) {
        return Err(overflow(Operation::Sub));
    }
    Ok(a - b)
}

/// Integral multiplication.
#[inline]
pub fn integral_mul<T: PrimInt>(a: T, b: T) -> Result<T> {
    if overflow::mul_overflows(a, b) {
        return Err(overflow(Operation::Mul));
    }
    Ok(a * b)
}

/// Integral division, truncating toward zero.
#[inline]
pub fn integral_div<T: PrimInt>(a: T, b: T) -> Result<T> {
    if b.is_zero() {
        tracing::trace!("integral division by zero");
        return Err(Error::DivisionByZero);
    }
    if overflow::div_overflows(a, b) {
        return Err(overflow(Operation::Div));
    }
    Ok(a / b)
}

/// Integral remainder; the sign follows the dividend.
#[inline]
pub fn integral_rem<T: PrimInt>(a: T, b: T) -> Result<T> {
    if b.is_zero() {
        tracing::trace!("integral modulo by zero");
        return Err(Error::ModuloByZero);
    }
    // Any value modulo -1 is 0; computing MIN % -1 directly would trap.
    if overflow::is_minus_one(b) {
        return Ok(T::zero());
    }
    Ok(a % b)
}

/// Integral negation.
#[inline]
pub fn integral_neg<T: PrimInt>(a: T) -> Result<T> {
    if overflow::neg_overflows(a) {
        return Err(overflow(Operation::Neg));
    }
    Ok(T::zero() - a)
}

/// Integral absolute value.
#[inline]
pub fn integral_abs<T: PrimInt>(a: T) -> Result<T> {
    if overflow::abs_overflows(a) {
        return Err(overflow(Operation::Abs));
    }
    if a < T::zero() { Ok(T::zero() - a) } else { Ok(a) }
}

/// Integral left shift by a checked amount.
#[inline]
pub fn integral_shl<T: PrimInt>(a: T, amount: i64) -> Result<T> {
    if overflow::shift_out_of_range(amount, bits_of::<T>()) {
        return Err(overflow(Operation::ShiftLeft(amount)));
    }
    Ok(a << amount as usize)
}

/// Integral right shift by a checked amount.
#[inline]
pub fn integral_shr<T: PrimInt>(a: T, amount: i64) -> Result<T> {
    if overflow::shift_out_of_range(amount, bits_of::<T>()) {
        return Err(overflow(Operation::ShiftRight(amount)));
    }
    Ok(a >> amount as usize)
}

/// Floating division; only a zero divisor is rejected.
#[inline]
pub fn float_div<F: num_traits::Float>(a: F, b: F) -> Result<F> {
    if b.is_zero() {
        tracing::trace!("floating division by zero");
        return Err(Error::DivisionByZero);
    }
    Ok(a / b)
}

/// Floating remainder; only a zero divisor is rejected.
#[inline]
pub fn float_rem<F: num_traits::Float>(a: F, b: F) -> Result<F> {
    if b.is_zero() {
        tracing::trace!("floating modulo by zero");
        return Err(Error::ModuloByZero);
    }
    Ok(a % b)
}

macro_rules! checked_impl_integral {
    ($($t:ty),* $(,)?) => {
        $(
            impl CheckedArithmetic for $t {
                #[inline(always)]
                fn checked_add_val(self, v: $t) -> Result<$t> {
                    integral_add(self, v)
                }

                #[inline(always)]
                fn checked_sub_val(self, v: $t) -> Result<$t> {
                    integral_sub(self, v)
                }

                #[inline(always)]
                fn checked_mul_val(self, v: $t) -> Result<$t> {
                    integral_mul(self, v)
                }

                #[inline(always)]
                fn checked_div_val(self, v: $t) -> Result<$t> {
                    integral_div(self, v)
                }

                #[inline(always)]
                fn checked_rem_val(self, v: $t) -> Result<$t> {
                    integral_rem(self, v)
                }

                #[inline(always)]
                fn checked_neg_val(self) -> Result<$t> {
                    integral_neg(self)
                }

                #[inline(always)]
                fn checked_abs_val(self) -> Result<$t> {
                    integral_abs(self)
                }
            }

            impl CheckedShift for $t {
                #[inline(always)]
                fn checked_shl_val(self, amount: i64) -> Result<$t> {
                    integral_shl(self, amount)
                }

                #[inline(always)]
                fn checked_shr_val(self, amount: i64) -> Result<$t> {
                    integral_shr(self, amount)
                }
            }
        )*
    };
}

macro_rules! checked_impl_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl CheckedArithmetic for $t {
                #[inline(always)]
                fn checked_add_val(self, v: $t) -> Result<$t> {
                    Ok(self + v)
                }

                #[inline(always)]
                fn checked_sub_val(self, v: $t) -> Result<$t> {
                    Ok(self - v)
                }

                #[inline(always)]
                fn checked_mul_val(self, v: $t) -> Result<$t> {
                    Ok(self * v)
                }

                #[inline(always)]
                fn checked_div_val(self, v: $t) -> Result<$t> {
                    float_div(self, v)
                }

                #[inline(always)]
                fn checked_rem_val(self, v: $t) -> Result<$t> {
                    float_rem(self, v)
                }

                #[inline(always)]
                fn checked_neg_val(self) -> Result<$t> {
                    Ok(-self)
                }

                #[inline(always)]
                fn checked_abs_val(self) -> Result<$t> {
                    Ok(self.abs())
                }
            }
        )*
    };
}

checked_impl_integral!(u8, u16, u32, u64, u128, usize);
checked_impl_integral!(i8, i16, i32, i64, i128, isize);
checked_impl_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind<T>(r: Result<T>) -> Option<ErrorKind> {
        r.err().map(|e| e.kind())
    }

    #[test]
    fn test_add_sub_boundaries() {
        assert_eq!(i8::MAX.checked_add_val(0), Ok(i8::MAX));
        assert_eq!(kind(i8::MAX.checked_add_val(1)), Some(ErrorKind::Overflow));
        assert_eq!(kind(i8::MIN.checked_sub_val(1)), Some(ErrorKind::Overflow));
        assert_eq!(kind(0u64.checked_sub_val(1)), Some(ErrorKind::Overflow));
        assert_eq!(u64::MAX.checked_sub_val(u64::MAX), Ok(0));
        assert_eq!((-5i128).checked_add_val(5), Ok(0));
    }

    #[test]
    fn test_mul() {
        assert_eq!(
            100i8.checked_mul_val(3),
            Err(Error::Overflow(Operation::Mul))
        );
        assert_eq!((-64i8).checked_mul_val(2), Ok(-128));
        assert_eq!(kind(i64::MIN.checked_mul_val(-1)), Some(ErrorKind::Overflow));
        assert_eq!(0usize.checked_mul_val(usize::MAX), Ok(0));
    }

    #[test]
    fn test_div_and_rem() {
        assert_eq!(7i32.checked_div_val(0), Err(Error::DivisionByZero));
        assert_eq!(7i32.checked_rem_val(0), Err(Error::ModuloByZero));
        assert_eq!(
            i32::MIN.checked_div_val(-1),
            Err(Error::Overflow(Operation::Div))
        );
        assert_eq!(i32::MIN.checked_rem_val(-1), Ok(0));
        assert_eq!((-7i32).checked_div_val(2), Ok(-3));
        assert_eq!((-7i32).checked_rem_val(2), Ok(-1));
        assert_eq!(u8::MAX.checked_rem_val(u8::MAX), Ok(0));
    }

    #[test]
    fn test_neg_and_abs() {
        assert_eq!(kind(i16::MIN.checked_neg_val()), Some(ErrorKind::Overflow));
        assert_eq!(i16::MAX.checked_neg_val(), Ok(-i16::MAX));
        assert_eq!(0u8.checked_neg_val(), Ok(0));
        assert_eq!(kind(1u8.checked_neg_val()), Some(ErrorKind::Overflow));
        assert_eq!(kind(i32::MIN.checked_abs_val()), Some(ErrorKind::Overflow));
        assert_eq!((-9i32).checked_abs_val(), Ok(9));
        assert_eq!(u32::MAX.checked_abs_val(), Ok(u32::MAX));
    }

    #[test]
    fn test_shifts() {
        assert_eq!(1u8.checked_shl_val(7), Ok(128));
        assert_eq!(0xFFu8.checked_shl_val(4), Ok(0xF0));
        assert_eq!(
            1u8.checked_shl_val(8),
            Err(Error::Overflow(Operation::ShiftLeft(8)))
        );
        assert_eq!(
            1i64.checked_shl_val(-1),
            Err(Error::Overflow(Operation::ShiftLeft(-1)))
        );
        assert_eq!((-16i32).checked_shr_val(2), Ok(-4));
        assert_eq!(0x80u8.checked_shr_val(7), Ok(1));
        assert_eq!(kind(1u128.checked_shr_val(128)), Some(ErrorKind::Overflow));
        assert_eq!(1u128.checked_shl_val(127), Ok(1u128 << 127));
    }

    #[test]
    fn test_float_paths() {
        assert_eq!(f64::MAX.checked_add_val(f64::MAX), Ok(f64::INFINITY));
        assert!(
            f64::INFINITY
                .checked_sub_val(f64::INFINITY)
                .is_ok_and(f64::is_nan)
        );
        assert_eq!(1.0f64.checked_div_val(0.0), Err(Error::DivisionByZero));
        assert_eq!(1.0f64.checked_div_val(-0.0), Err(Error::DivisionByZero));
        assert_eq!(5.5f32.checked_rem_val(0.0), Err(Error::ModuloByZero));
        assert_eq!(5.5f32.checked_rem_val(2.0), Ok(1.5));
        assert_eq!((-2.5f64).checked_neg_val(), Ok(2.5));
        assert_eq!((-2.5f64).checked_abs_val(), Ok(2.5));
    }
}
