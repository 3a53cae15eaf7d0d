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

//! # Exact Ordering Across Representations
//!
//! Rounding every operand to `f64` makes equality intransitive once integers
//! grow past 2^53: `u64::MAX` and `u64::MAX - 1` would both equal `2^64` as a
//! float. `ExactKey` instead places an integer, a finite float or a binary
//! fixed-point value on the real line without rounding, as an integer part
//! plus the leading 64 bits of the fraction and a sticky bit for anything
//! beyond them.
//!
//! Floats outside `[-2^127, 2^128)` (infinities included) collapse into two
//! outer buckets, which is exact as long as at most one side is a float.
//! [`exact_cmp`] compares two floats directly for that reason.
//!
//! ```rust
//! use ballast_core::num::exact::exact_cmp;
//! use std::cmp::Ordering;
//!
//! assert_eq!(exact_cmp(u64::MAX, 18446744073709551616.0f64), Some(Ordering::Less));
//! assert_eq!(exact_cmp(u64::MAX - 1, u64::MAX), Some(Ordering::Less));
//! assert_eq!(exact_cmp(-1i8, -1.0f32), Some(Ordering::Equal));
//! assert_eq!(exact_cmp(3u8, f64::NAN), None);
//! ```

use crate::num::repr::Representation;
use std::cmp::Ordering;

const TWO_64: f64 = 18_446_744_073_709_551_616.0;
const TWO_127: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
const TWO_128: f64 = 340_282_366_920_938_463_463_374_607_431_768_211_456.0;

/// The integer part, bucketed so every integral and fixed-point value has
/// an exact position. Declaration order is numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Whole {
    /// Below `-2^127`.
    Below,
    Signed(i128),
    /// Above `i128::MAX` and below `2^128`.
    Unsigned(u128),
    /// At or above `2^128`.
    Above,
}

/// A totally ordered position on the real line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExactKey {
    whole: Whole,
    /// The leading 64 bits of the fraction in `[0, 1)`.
    fraction: u64,
    /// Set when the fraction has non-zero bits past the leading 64.
    sticky: bool,
}

impl ExactKey {
    #[inline]
    const fn integer(whole: Whole) -> Self {
        Self {
            whole,
            fraction: 0,
            sticky: false,
        }
    }

    /// The key of a signed integer.
    #[inline]
    pub const fn from_i128(value: i128) -> Self {
        Self::integer(Whole::Signed(value))
    }

    /// The key of an unsigned integer.
    #[inline]
    pub const fn from_u128(value: u128) -> Self {
        if value > i128::MAX as u128 {
            Self::integer(Whole::Unsigned(value))
        } else {
            Self::integer(Whole::Signed(value as i128))
        }
    }

    /// The key of the fixed-point value `raw / 2^fraction_bits`.
    ///
    /// `fraction_bits` must be below 64.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_core::num::exact::ExactKey;
    /// // -1.5 in a 16.16 layout.
    /// let raw = -(3i128 << 15);
    /// assert_eq!(ExactKey::from_fixed(raw, 16), ExactKey::from_f64(-1.5).unwrap());
    /// ```
    pub fn from_fixed(raw: i128, fraction_bits: u32) -> Self {
        debug_assert!(fraction_bits < 64);
        if fraction_bits == 0 {
            return Self::from_i128(raw);
        }
        let below_point = raw & ((1i128 << fraction_bits) - 1);
        Self {
            whole: Whole::Signed(raw >> fraction_bits),
            fraction: (below_point as u64) << (64 - fraction_bits),
            sticky: false,
        }
    }

    /// The key of a float, or `None` for NaN.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        if value < -TWO_127 {
            return Some(Self::integer(Whole::Below));
        }
        if value >= TWO_128 {
            return Some(Self::integer(Whole::Above));
        }
        if value >= TWO_127 {
            return Some(Self::integer(Whole::Unsigned(value as u128)));
        }

        // Both steps are exact: `rest` keeps a subset of `value`'s bits and
        // scaling by a power of two only moves the exponent.
        let whole = value.trunc();
        let rest = value - whole;
        if rest == 0.0 {
            return Some(Self::from_i128(whole as i128));
        }
        let scaled = rest * TWO_64;
        let truncated = scaled.trunc();
        let sticky = scaled != truncated;

        if rest > 0.0 {
            Some(Self {
                whole: Whole::Signed(whole as i128),
                fraction: truncated as u64,
                sticky,
            })
        } else {
            // value = (whole - 1) + (1 + rest), and the leading fraction bits
            // of 1 + rest are 2^64 + floor(scaled).
            let floor = if sticky { truncated - 1.0 } else { truncated };
            Some(Self {
                whole: Whole::Signed(whole as i128 - 1),
                fraction: (floor as i128 + (1i128 << 64)) as u64,
                sticky,
            })
        }
    }

    /// The key of any primitive representation, or `None` for NaN.
    pub fn of<T: Representation>(value: T) -> Option<Self> {
        if !T::DESCRIPTOR.kind().is_integral() {
            return Self::from_f64(value.to_f64_lossy());
        }
        if value.below_zero() {
            value.to_i128().map(Self::from_i128)
        } else {
            value.to_u128().map(Self::from_u128)
        }
    }
}

/// Compares two values of possibly different representations exactly.
///
/// Two floats compare with IEEE semantics (`-0.0 == 0.0`, NaN unordered);
/// every other pair compares by [`ExactKey`].
pub fn exact_cmp<A, B>(a: A, b: B) -> Option<Ordering>
where
    A: Representation,
    B: Representation,
{
    if !A::DESCRIPTOR.kind().is_integral() && !B::DESCRIPTOR.kind().is_integral() {
        return a.to_f64_lossy().partial_cmp(&b.to_f64_lossy());
    }
    Some(ExactKey::of(a)?.cmp(&ExactKey::of(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_integers_do_not_collapse_onto_a_float() {
        let two_64 = 18_446_744_073_709_551_616.0f64;
        assert_eq!(exact_cmp(u64::MAX, two_64), Some(Ordering::Less));
        assert_eq!(exact_cmp(u64::MAX - 1, two_64), Some(Ordering::Less));
        assert_eq!(exact_cmp(u64::MAX - 1, u64::MAX), Some(Ordering::Less));
        assert_eq!(exact_cmp(i64::MAX, 9.223372036854775807e18f64), Some(Ordering::Less));
        assert_eq!(exact_cmp(1u64 << 53, 9007199254740992.0f64), Some(Ordering::Equal));
        assert_eq!(exact_cmp((1u64 << 53) + 1, 9007199254740992.0f64), Some(Ordering::Greater));
    }

    #[test]
    fn test_fractions_against_integers() {
        assert_eq!(exact_cmp(2i32, 2.5f64), Some(Ordering::Less));
        assert_eq!(exact_cmp(3i32, 2.5f64), Some(Ordering::Greater));
        assert_eq!(exact_cmp(-2i32, -1.5f64), Some(Ordering::Less));
        assert_eq!(exact_cmp(-1i32, -1.5f64), Some(Ordering::Greater));
        assert_eq!(exact_cmp(0u8, -0.0f64), Some(Ordering::Equal));
        assert_eq!(exact_cmp(0u8, -f64::MIN_POSITIVE), Some(Ordering::Greater));
        assert_eq!(exact_cmp(0u8, 5e-324f64), Some(Ordering::Less));
    }

    #[test]
    fn test_extremes() {
        assert_eq!(exact_cmp(u128::MAX, f64::INFINITY), Some(Ordering::Less));
        assert_eq!(exact_cmp(u128::MAX, 3.4e38f64), Some(Ordering::Greater));
        assert_eq!(exact_cmp(u128::MAX, 3.5e38f64), Some(Ordering::Less));
        assert_eq!(exact_cmp(i128::MIN, -1.7014118346046923e38f64), Some(Ordering::Equal));
        assert_eq!(exact_cmp(i128::MIN, f64::NEG_INFINITY), Some(Ordering::Greater));
        assert_eq!(exact_cmp(i128::MIN, u128::MAX), Some(Ordering::Less));
    }

    #[test]
    fn test_float_pairs_keep_ieee_semantics() {
        assert_eq!(exact_cmp(0.1f32, 0.1f64), Some(Ordering::Greater));
        assert_eq!(exact_cmp(-0.0f64, 0.0f32), Some(Ordering::Equal));
        assert_eq!(exact_cmp(f64::NAN, f64::NAN), None);
        assert_eq!(exact_cmp(f64::NEG_INFINITY, f32::MIN), Some(Ordering::Less));
    }

    #[test]
    fn test_fixed_keys() {
        // 16.16 raw values.
        let half = ExactKey::from_fixed(1 << 15, 16);
        let minus_quarter = ExactKey::from_fixed(-(1 << 14), 16);
        assert_eq!(Some(half), ExactKey::from_f64(0.5));
        assert_eq!(Some(minus_quarter), ExactKey::from_f64(-0.25));
        assert!(minus_quarter < ExactKey::from_i128(0));
        assert!(minus_quarter > ExactKey::from_i128(-1));
        assert_eq!(ExactKey::from_fixed(7, 0), ExactKey::from_i128(7));

        // A float with bits past the 64th fraction bit sits strictly between
        // its truncations.
        let tiny = 2f64.powi(-70);
        let above = ExactKey::from_f64(2f64.powi(-20) + tiny).unwrap();
        let lower = ExactKey::from_f64(2f64.powi(-20)).unwrap();
        assert!(lower < above);
        assert!(above < ExactKey::from_fixed(1 << 44, 63));
        let below = ExactKey::from_f64(-tiny).unwrap();
        assert!(below < ExactKey::from_i128(0));
        assert!(below > ExactKey::from_fixed(-1, 63));
    }
}
