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

//! # Overflow Detection
//!
//! Pure range-check predicates over any primitive integer. Each predicate
//! answers "would this operation leave the representable range?" using only
//! operations that are themselves guaranteed not to overflow, so callers can
//! test first and commit the raw result afterwards.
//!
//! The predicates are written once against `num_traits::PrimInt` and work for
//! every signed and unsigned width; for unsigned types the negative-operand
//! branches are simply never taken.
//!
//! ```rust
//! use ballast_core::num::overflow::{add_overflows, div_overflows, mul_overflows};
//!
//! assert!(add_overflows(120i8, 10i8));
//! assert!(!add_overflows(-120i8, 10i8));
//! assert!(mul_overflows(100i8, 3i8));
//! assert!(div_overflows(i32::MIN, -1));
//! ```

use num_traits::PrimInt;

/// Returns `true` if `T` is a signed integer type.
#[inline(always)]
pub fn is_signed<T: PrimInt>() -> bool {
    T::min_value() < T::zero()
}

/// Returns `true` if `value` equals `-1` in `T` (always `false` for unsigned types).
#[inline(always)]
pub fn is_minus_one<T: PrimInt>(value: T) -> bool {
    is_signed::<T>() && value == T::zero() - T::one()
}

/// Returns `true` if `a + b` is not representable in `T`.
///
/// Overflows iff `(b > 0 && a > MAX - b) || (b < 0 && a < MIN - b)`.
///
/// # Examples
///
/// ```rust
/// # use ballast_core::num::overflow::add_overflows;
/// assert!(add_overflows(200u8, 100u8));
/// assert!(!add_overflows(200u8, 55u8));
/// assert!(add_overflows(i64::MIN, -1i64));
/// ```
#[inline]
pub fn add_overflows<T: PrimInt>(a: T, b: T) -> bool {
    let zero = T::zero();
    (b > zero && a > T::max_value() - b) || (b < zero && a < T::min_value() - b)
}

/// Returns `true` if `a - b` is not representable in `T`.
///
/// The mirror of [`add_overflows`]:
/// `(b < 0 && a > MAX + b) || (b > 0 && a < MIN + b)`.
///
/// # Examples
///
/// ```rust
/// # use ballast_core::num::overflow::sub_overflows;
/// assert!(sub_overflows(0u8, 1u8));
/// assert!(sub_overflows(127i8, -1i8));
/// assert!(!sub_overflows(-1i8, 127i8));
/// ```
#[inline]
pub fn sub_overflows<T: PrimInt>(a: T, b: T) -> bool {
    let zero = T::zero();
    (b < zero && a > T::max_value() + b) || (b > zero && a < T::min_value() + b)
}

/// Returns `true` if `a * b` is not representable in `T`.
///
/// Uses sign-based range division: for each sign combination, the bound is
/// divided by one operand (never by zero and never as `MIN / -1`) and
/// compared with the other.
///
/// # Examples
///
/// ```rust
/// # use ballast_core::num::overflow::mul_overflows;
/// assert!(mul_overflows(16u8, 16u8));
/// assert!(!mul_overflows(15u8, 17u8));
/// assert!(mul_overflows(-128i8, -1i8));
/// assert!(!mul_overflows(-64i8, 2i8));
/// ```
#[inline]
pub fn mul_overflows<T: PrimInt>(a: T, b: T) -> bool {
    let zero = T::zero();
    if a > zero {
        if b > zero {
            a > T::max_value() / b
        } else if b < zero {
            b < T::min_value() / a
        } else {
            false
        }
    } else if a < zero {
        if b > zero {
            a < T::min_value() / b
        } else if b < zero {
            a < T::max_value() / b
        } else {
            false
        }
    } else {
        false
    }
}

/// Returns `true` if `a / b` is not representable in `T` for a non-zero `b`.
///
/// The only such pair is `(MIN, -1)` of a signed type.
#[inline]
pub fn div_overflows<T: PrimInt>(a: T, b: T) -> bool {
    a == T::min_value() && is_minus_one(b)
}

/// Returns `true` if `-a` is not representable in `T`.
///
/// For signed types this is exactly `a == MIN`. For unsigned types every
/// value except zero has a negative (unrepresentable) negation.
///
/// # Examples
///
/// ```rust
/// # use ballast_core::num::overflow::neg_overflows;
/// assert!(neg_overflows(i16::MIN));
/// assert!(!neg_overflows(i16::MAX));
/// assert!(!neg_overflows(0u32));
/// assert!(neg_overflows(1u32));
/// ```
#[inline]
pub fn neg_overflows<T: PrimInt>(a: T) -> bool {
    if is_signed::<T>() {
        a == T::min_value()
    } else {
        a != T::zero()
    }
}

/// Returns `true` if `|a|` is not representable in `T`.
#[inline]
pub fn abs_overflows<T: PrimInt>(a: T) -> bool {
    is_signed::<T>() && a == T::min_value()
}

/// Returns `true` if shifting a `bits`-wide value by `amount` is rejected.
///
/// Valid amounts are `0..bits`; negative amounts and amounts of the full
/// width or more are out of range.
///
/// # Examples
///
/// ```rust
/// # use ballast_core::num::overflow::shift_out_of_range;
/// assert!(shift_out_of_range(-1, 8));
/// assert!(shift_out_of_range(8, 8));
/// assert!(!shift_out_of_range(7, 8));
/// ```
#[inline(always)]
pub fn shift_out_of_range(amount: i64, bits: u32) -> bool {
    amount < 0 || amount >= i64::from(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference check: evaluate in i128 and compare against the bounds.
    fn exceeds_i8(v: i128) -> bool {
        v < i128::from(i8::MIN) || v > i128::from(i8::MAX)
    }

    fn exceeds_u8(v: i128) -> bool {
        v < 0 || v > i128::from(u8::MAX)
    }

    #[test]
    fn test_add_sub_mul_exhaustive_i8() {
        for a in i8::MIN..=i8::MAX {
            for b in i8::MIN..=i8::MAX {
                let (wa, wb) = (i128::from(a), i128::from(b));
                assert_eq!(add_overflows(a, b), exceeds_i8(wa + wb), "{a} + {b}");
                assert_eq!(sub_overflows(a, b), exceeds_i8(wa - wb), "{a} - {b}");
                assert_eq!(mul_overflows(a, b), exceeds_i8(wa * wb), "{a} * {b}");
            }
        }
    }

    #[test]
    fn test_add_sub_mul_exhaustive_u8() {
        for a in u8::MIN..=u8::MAX {
            for b in u8::MIN..=u8::MAX {
                let (wa, wb) = (i128::from(a), i128::from(b));
                assert_eq!(add_overflows(a, b), exceeds_u8(wa + wb), "{a} + {b}");
                assert_eq!(sub_overflows(a, b), exceeds_u8(wa - wb), "{a} - {b}");
                assert_eq!(mul_overflows(a, b), exceeds_u8(wa * wb), "{a} * {b}");
            }
        }
    }

    #[test]
    fn test_div_overflows_only_min_by_minus_one() {
        assert!(div_overflows(i8::MIN, -1i8));
        assert!(div_overflows(i128::MIN, -1i128));
        assert!(!div_overflows(i8::MIN, 1i8));
        assert!(!div_overflows(i8::MIN + 1, -1i8));
        assert!(!div_overflows(u8::MIN, u8::MAX));
    }

    #[test]
    fn test_is_minus_one() {
        assert!(is_minus_one(-1i32));
        assert!(!is_minus_one(1i32));
        // u32::MAX shares the bit pattern of -1 but is not minus one.
        assert!(!is_minus_one(u32::MAX));
    }

    #[test]
    fn test_neg_and_abs() {
        assert!(neg_overflows(i8::MIN));
        assert!(!neg_overflows(-127i8));
        assert!(!neg_overflows(0u8));
        assert!(neg_overflows(u8::MAX));
        assert!(abs_overflows(i64::MIN));
        assert!(!abs_overflows(i64::MIN + 1));
        assert!(!abs_overflows(u64::MAX));
    }

    #[test]
    fn test_shift_bounds() {
        for bits in [8u32, 16, 32, 64, 128] {
            assert!(shift_out_of_range(-1, bits));
            assert!(shift_out_of_range(i64::from(bits), bits));
            assert!(!shift_out_of_range(0, bits));
            assert!(!shift_out_of_range(i64::from(bits) - 1, bits));
        }
    }

    #[test]
    fn test_wide_boundaries() {
        assert!(add_overflows(i128::MAX, 1));
        assert!(sub_overflows(i128::MIN, 1));
        assert!(mul_overflows(u128::MAX, 2));
        assert!(!mul_overflows(u128::MAX, 1));
        assert!(mul_overflows(i64::MIN, -1));
        assert!(!mul_overflows(i64::MIN, 1));
        assert!(mul_overflows(i64::MAX, -2));
    }
}
