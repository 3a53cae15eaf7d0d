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

//! # Fixed-Point Values
//!
//! `Fixed<B, FRAC>` is a binary fixed-point number: an integer `B` read as
//! `raw / 2^FRAC`. Addition, subtraction and remainder work on the raw
//! integers directly. Multiplication and division go through a wider
//! integer so the intermediate product or scaled dividend cannot wrap, and
//! only the final narrowing back into `B` can overflow.
//!
//! Every operation is checked like `NumericValue`: it either returns an
//! in-range result or fails with an `Error`.
//!
//! ```rust
//! use ballast_core::ErrorKind;
//! use ballast_types::{Fixed16_16, Int32};
//!
//! let a = Fixed16_16::from_f64(1.5).unwrap();
//! let b = Fixed16_16::from_f64(2.25).unwrap();
//! assert_eq!((a * b).unwrap().to_f64(), 3.375);
//! assert_eq!((a / Fixed16_16::ZERO).map_err(|e| e.kind()), Err(ErrorKind::DivisionByZero));
//!
//! let big = Fixed16_16::from_f64(200.0).unwrap();
//! assert_eq!((big * big).map_err(|e| e.kind()), Err(ErrorKind::Overflow));
//!
//! assert!(a > Int32::new(1));
//! assert_eq!(a.round().unwrap().to_f64(), 2.0);
//! ```

use crate::numeric::NumericValue;
use ballast_core::{
    Error, ErrorKind, Result,
    error::Operation,
    num::{
        cast,
        exact::ExactKey,
        ops::checked_arithmetic::{
            integral_abs, integral_add, integral_div, integral_mul, integral_neg, integral_rem,
            integral_shr, integral_sub,
        },
        repr::{Integral, ReprDescriptor, ReprKind, Representation},
    },
};
use std::{
    cmp::Ordering,
    ops::{Add, Div, Mul, Neg, Rem, Sub},
    str::FromStr,
};

/// An integer representation that can store a fixed-point value.
///
/// Implemented for the integers up to 64 bits, each paired with a 128-bit
/// integer of the same signedness for intermediate results.
pub trait FixedBase: Integral {
    /// Holds the full product of any two `Self` values.
    type Wide: Integral;
}

macro_rules! impl_fixed_base {
    ($($t:ty => $wide:ty),* $(,)?) => {
        $(
            impl FixedBase for $t {
                type Wide = $wide;
            }
        )*
    };
}

impl_fixed_base!(
    i8 => i128,
    i16 => i128,
    i32 => i128,
    i64 => i128,
    u8 => u128,
    u16 => u128,
    u32 => u128,
    u64 => u128,
);

/// A fixed-point number stored as `B` with `FRAC` fraction bits.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed<B, const FRAC: u32> {
    raw: B,
}

impl<B: FixedBase, const FRAC: u32> Fixed<B, FRAC> {
    const LAYOUT: () = assert!(
        FRAC < B::DESCRIPTOR.bits(),
        "a fixed-point layout needs fewer fraction bits than its base width"
    );

    /// Describes the layout; the name is `fixed` or `ufixed`.
    pub const DESCRIPTOR: ReprDescriptor = ReprDescriptor::new(
        if B::DESCRIPTOR.kind().is_signed() {
            "fixed"
        } else {
            "ufixed"
        },
        B::DESCRIPTOR.bits(),
        ReprKind::Fixed {
            signed: B::DESCRIPTOR.kind().is_signed(),
            fraction_bits: FRAC,
        },
    );

    /// Zero.
    pub const ZERO: Self = Self::from_raw(B::ZERO);
    /// The smallest representable value.
    pub const MIN: Self = Self::from_raw(B::MIN);
    /// The largest representable value.
    pub const MAX: Self = Self::from_raw(B::MAX);
    /// The smallest positive step, `2^-FRAC`.
    pub const EPSILON: Self = Self::from_raw(B::ONE);

    /// Wraps a raw scaled integer. Never fails.
    #[inline(always)]
    pub const fn from_raw(raw: B) -> Self {
        let () = Self::LAYOUT;
        Self { raw }
    }

    /// The raw scaled integer.
    #[inline(always)]
    pub fn raw(self) -> B {
        self.raw
    }

    /// The descriptor of this layout.
    #[inline(always)]
    pub fn descriptor(self) -> ReprDescriptor {
        Self::DESCRIPTOR
    }

    #[inline]
    fn scale() -> B::Wide {
        <B::Wide as Representation>::ONE << FRAC as usize
    }

    #[inline]
    fn widen(self) -> Result<B::Wide> {
        cast::convert::<B, B::Wide>(self.raw)
    }

    /// Narrows an intermediate back into `B`, reporting `op` on overflow.
    fn narrow(wide: B::Wide, op: Operation) -> Result<Self> {
        cast::convert::<B::Wide, B>(wide)
            .map(Self::from_raw)
            .map_err(|_| Error::Overflow(op))
    }

    fn conversion_from(from: &'static str) -> Operation {
        Operation::Conversion {
            from,
            to: Self::DESCRIPTOR.name(),
        }
    }

    /// Converts a float, truncating toward zero below `2^-FRAC`.
    ///
    /// # Errors
    ///
    /// `Error::Casting` for NaN and `Error::Overflow` for infinities or values
    /// outside the layout's range.
    pub fn from_f64(value: f64) -> Result<Self> {
        let scaled = value * 2f64.powi(FRAC as i32);
        cast::convert::<f64, B>(scaled)
            .map(Self::from_raw)
            .map_err(|e| match e.kind() {
                ErrorKind::Casting => Error::Casting {
                    from: f64::DESCRIPTOR.name(),
                    to: Self::DESCRIPTOR.name(),
                },
                _ => Error::Overflow(Self::conversion_from(f64::DESCRIPTOR.name())),
            })
    }

    /// Converts a value of any primitive representation.
    ///
    /// Integers convert exactly or fail with `Error::Overflow`; floats follow
    /// [`Fixed::from_f64`].
    pub fn from_numeric<T: Representation>(value: NumericValue<T>) -> Result<Self> {
        if !T::DESCRIPTOR.kind().is_integral() {
            return Self::from_f64(value.get().to_f64_lossy());
        }
        let overflow = || Error::Overflow(Self::conversion_from(T::DESCRIPTOR.name()));
        let whole = cast::convert::<T, B::Wide>(value.get()).map_err(|_| overflow())?;
        let raw = integral_mul(whole, Self::scale()).map_err(|_| overflow())?;
        cast::convert::<B::Wide, B>(raw)
            .map(Self::from_raw)
            .map_err(|_| overflow())
    }

    /// Converts from another fixed-point layout. Extra fraction bits are
    /// truncated toward zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_types::{Fixed16_16, Fixed32_32};
    /// let wide = Fixed32_32::from_f64(-1.75).unwrap();
    /// assert_eq!(Fixed16_16::rescale(wide).unwrap().to_f64(), -1.75);
    /// assert!(Fixed16_16::rescale(Fixed32_32::from_f64(1e6).unwrap()).is_err());
    /// ```
    pub fn rescale<C: FixedBase, const G: u32>(other: Fixed<C, G>) -> Result<Self> {
        let overflow = || Error::Overflow(Self::conversion_from(Fixed::<C, G>::DESCRIPTOR.name()));
        let raw = other.raw.to_i128().ok_or_else(overflow)?;
        let factor = 1i128 << FRAC.abs_diff(G);
        let rescaled = if FRAC >= G {
            integral_mul(raw, factor)
        } else {
            integral_div(raw, factor)
        }
        .map_err(|_| overflow())?;
        cast::convert::<i128, B>(rescaled)
            .map(Self::from_raw)
            .map_err(|_| overflow())
    }

    /// The nearest `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.raw.to_f64_lossy() / 2f64.powi(FRAC as i32)
    }

    /// Converts into representation `T`; integral targets truncate toward
    /// zero.
    ///
    /// # Errors
    ///
    /// `Error::Overflow` when the integer part does not fit `T`.
    pub fn convert_to<T: Representation>(self) -> Result<NumericValue<T>> {
        let overflow = || {
            Error::Overflow(Operation::Conversion {
                from: Self::DESCRIPTOR.name(),
                to: T::DESCRIPTOR.name(),
            })
        };
        if T::DESCRIPTOR.kind().is_integral() {
            let whole = integral_div(self.widen()?, Self::scale())?;
            cast::convert::<B::Wide, T>(whole)
                .map(NumericValue::new)
                .map_err(|_| overflow())
        } else {
            cast::convert::<f64, T>(self.to_f64())
                .map(NumericValue::new)
                .map_err(|_| overflow())
        }
    }

    /// The exact position on the real line, for comparisons across layouts
    /// and representations.
    #[inline]
    pub fn exact_key(self) -> Option<ExactKey> {
        self.raw
            .to_i128()
            .map(|raw| ExactKey::from_fixed(raw, FRAC))
    }

    /// Returns `true` for zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw == B::ZERO
    }

    /// Checked addition of the raw values.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        integral_add(self.raw, rhs.raw).map(Self::from_raw)
    }

    /// Checked subtraction of the raw values.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        integral_sub(self.raw, rhs.raw).map(Self::from_raw)
    }

    /// Checked multiplication. The full product is formed in `B::Wide` and
    /// shifted back by `FRAC`, which floors.
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        let product = integral_mul(self.widen()?, rhs.widen()?)?;
        let shifted = integral_shr(product, i64::from(FRAC))?;
        Self::narrow(shifted, Operation::Mul)
    }

    /// Checked division, truncating toward zero.
    ///
    /// # Errors
    ///
    /// `Error::DivisionByZero` for a zero divisor, `Error::Overflow` when the
    /// quotient does not fit.
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        let dividend = integral_mul(self.widen()?, Self::scale())?;
        let quotient = integral_div(dividend, rhs.widen()?)?;
        Self::narrow(quotient, Operation::Div)
    }

    /// Checked remainder. Both operands share the scale, so this is the
    /// remainder of the raw values.
    #[inline]
    pub fn checked_rem(self, rhs: Self) -> Result<Self> {
        integral_rem(self.raw, rhs.raw).map(Self::from_raw)
    }

    /// Checked negation.
    #[inline]
    pub fn checked_neg(self) -> Result<Self> {
        integral_neg(self.raw).map(Self::from_raw)
    }

    /// Checked absolute value.
    #[inline]
    pub fn checked_abs(self) -> Result<Self> {
        integral_abs(self.raw).map(Self::from_raw)
    }

    /// Rounds to the nearest integer; ties round up.
    ///
    /// # Errors
    ///
    /// `Error::Overflow` if the rounded value does not fit, which can only
    /// happen within half a unit of `MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_types::Fixed16_16;
    /// let round = |v: f64| Fixed16_16::from_f64(v).unwrap().round().unwrap().to_f64();
    /// assert_eq!(round(1.5), 2.0);
    /// assert_eq!(round(1.25), 1.0);
    /// assert_eq!(round(-1.5), -1.0);
    /// assert_eq!(round(-1.75), -2.0);
    /// ```
    pub fn round(self) -> Result<Self> {
        let scale = Self::scale();
        let half = scale >> 1;
        let mask = !(scale - <B::Wide as Representation>::ONE);
        let rounded = integral_add(self.widen()?, half)? & mask;
        Self::narrow(rounded, Operation::Add)
    }
}

impl<B: FixedBase, const FRAC: u32> FromStr for Fixed<B, FRAC> {
    type Err = Error;

    /// Parses a decimal literal through `f64`.
    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().parse::<f64>().map_err(|_| Error::Casting {
            from: "text",
            to: Self::DESCRIPTOR.name(),
        })?;
        Self::from_f64(value)
    }
}

impl<B: FixedBase, const FRAC: u32> std::fmt::Display for Fixed<B, FRAC> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl<B: FixedBase, const FRAC: u32> std::fmt::Debug for Fixed<B, FRAC> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", Self::DESCRIPTOR, self.to_f64())
    }
}

macro_rules! impl_fixed_op {
    ($($trait_name:ident, $method:ident, $checked:ident);* $(;)?) => {
        $(
            impl<B: FixedBase, const FRAC: u32> $trait_name for Fixed<B, FRAC> {
                type Output = Result<Self>;

                #[inline]
                fn $method(self, rhs: Self) -> Self::Output {
                    self.$checked(rhs)
                }
            }
        )*
    };
}

impl_fixed_op!(
    Add, add, checked_add;
    Sub, sub, checked_sub;
    Mul, mul, checked_mul;
    Div, div, checked_div;
    Rem, rem, checked_rem;
);

impl<B: FixedBase, const FRAC: u32> Neg for Fixed<B, FRAC> {
    type Output = Result<Self>;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg()
    }
}

fn key_cmp<B, const FRAC: u32, T>(a: Fixed<B, FRAC>, b: NumericValue<T>) -> Option<Ordering>
where
    B: FixedBase,
    T: Representation,
{
    Some(a.exact_key()?.cmp(&ExactKey::of(b.get())?))
}

impl<B, const FRAC: u32, T> PartialEq<NumericValue<T>> for Fixed<B, FRAC>
where
    B: FixedBase,
    T: Representation,
{
    fn eq(&self, other: &NumericValue<T>) -> bool {
        key_cmp(*self, *other) == Some(Ordering::Equal)
    }
}

impl<B, const FRAC: u32, T> PartialOrd<NumericValue<T>> for Fixed<B, FRAC>
where
    B: FixedBase,
    T: Representation,
{
    fn partial_cmp(&self, other: &NumericValue<T>) -> Option<Ordering> {
        key_cmp(*self, *other)
    }
}

impl<B, const FRAC: u32, T> PartialEq<Fixed<B, FRAC>> for NumericValue<T>
where
    B: FixedBase,
    T: Representation,
{
    fn eq(&self, other: &Fixed<B, FRAC>) -> bool {
        key_cmp(*other, *self) == Some(Ordering::Equal)
    }
}

impl<B, const FRAC: u32, T> PartialOrd<Fixed<B, FRAC>> for NumericValue<T>
where
    B: FixedBase,
    T: Representation,
{
    fn partial_cmp(&self, other: &Fixed<B, FRAC>) -> Option<Ordering> {
        key_cmp(*other, *self).map(Ordering::reverse)
    }
}
