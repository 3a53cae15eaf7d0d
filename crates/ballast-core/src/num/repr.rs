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

//! # Representation Descriptors
//!
//! A representation is the concrete primitive backing a numeric value: its
//! bit width and whether it is a signed integer, an unsigned integer, an
//! IEEE-754 float, or a binary fixed-point number stored in an integer.
//! `ReprDescriptor` captures exactly that, and the `Representation` trait
//! binds one descriptor to each supported primitive.
//!
//! All checked arithmetic and conversion logic is written once against these
//! traits. The macros at the bottom of this module only attach descriptors and
//! literal parsing to the primitives; they contain no arithmetic.
//!
//! ```rust
//! use ballast_core::num::repr::{ReprKind, Representation};
//!
//! assert_eq!(i8::DESCRIPTOR.bits(), 8);
//! assert_eq!(u64::DESCRIPTOR.kind(), ReprKind::Unsigned);
//! assert_eq!(f32::DESCRIPTOR.name(), "float32");
//! ```

use crate::{
    error::{Error, Operation, Result},
    num::ops::checked_arithmetic::{CheckedArithmetic, CheckedShift},
};
use num_traits::{NumCast, PrimInt};
use std::{cmp::Ordering, hash::Hash, num::IntErrorKind};

/// The family a representation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReprKind {
    Signed,
    Unsigned,
    Float,
    /// An integer scaled by `2^fraction_bits`.
    Fixed { signed: bool, fraction_bits: u32 },
}

impl ReprKind {
    /// Returns `true` for signed and unsigned integers.
    #[inline]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Signed | Self::Unsigned)
    }

    /// Returns `true` if the representation can hold negative values.
    #[inline]
    pub const fn is_signed(self) -> bool {
        match self {
            Self::Signed | Self::Float => true,
            Self::Unsigned => false,
            Self::Fixed { signed, .. } => signed,
        }
    }
}

/// A compile-time description of a numeric representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReprDescriptor {
    name: &'static str,
    bits: u32,
    kind: ReprKind,
}

impl ReprDescriptor {
    /// Creates a new descriptor.
    #[inline]
    pub const fn new(name: &'static str, bits: u32, kind: ReprKind) -> Self {
        Self { name, bits, kind }
    }

    /// The human-readable name, e.g. `int32`, `float64` or `fixed`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The width in bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// The representation family.
    #[inline]
    pub const fn kind(&self) -> ReprKind {
        self.kind
    }

    /// The bits available for the integer part: the full width for
    /// integers, the width minus the fraction for fixed-point.
    #[inline]
    pub const fn integer_bits(&self) -> u32 {
        match self.kind {
            ReprKind::Fixed { fraction_bits, .. } => self.bits - fraction_bits,
            _ => self.bits,
        }
    }

    /// Returns `true` if converting any value of `self` into `target` always succeeds.
    ///
    /// Fractions are truncated by integral and fixed-point targets, so only
    /// the integer part has to fit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ballast_core::num::repr::{ReprDescriptor, ReprKind, Representation};
    /// assert!(u8::DESCRIPTOR.widens_to(&i16::DESCRIPTOR));
    /// assert!(!i8::DESCRIPTOR.widens_to(&u64::DESCRIPTOR));
    /// assert!(i64::DESCRIPTOR.widens_to(&f32::DESCRIPTOR));
    /// assert!(!f64::DESCRIPTOR.widens_to(&f32::DESCRIPTOR));
    ///
    /// let q16_16 = ReprDescriptor::new(
    ///     "fixed",
    ///     32,
    ///     ReprKind::Fixed { signed: true, fraction_bits: 16 },
    /// );
    /// assert!(i16::DESCRIPTOR.widens_to(&q16_16));
    /// assert!(!i32::DESCRIPTOR.widens_to(&q16_16));
    /// assert!(q16_16.widens_to(&i16::DESCRIPTOR));
    /// ```
    pub const fn widens_to(&self, target: &Self) -> bool {
        match (self.kind, target.kind) {
            (ReprKind::Float, ReprKind::Float) => self.bits <= target.bits,
            (ReprKind::Float, _) => false,
            (_, ReprKind::Float) => true,
            (source, sink) => match (source.is_signed(), sink.is_signed()) {
                (true, false) => false,
                (false, true) => self.integer_bits() < target.integer_bits(),
                _ => self.integer_bits() <= target.integer_bits(),
            },
        }
    }
}

impl std::fmt::Display for ReprDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ReprKind::Fixed { fraction_bits, .. } => {
                write!(f, "{}{}_{}", self.name, self.integer_bits(), fraction_bits)
            }
            _ => f.write_str(self.name),
        }
    }
}

/// A primitive numeric type that can back a checked numeric value.
///
/// Implemented for `i8`–`i128`, `isize`, `u8`–`u128`, `usize`, `f32` and `f64`.
pub trait Representation:
    Copy
    + PartialEq
    + PartialOrd
    + Default
    + std::fmt::Debug
    + std::fmt::Display
    + NumCast
    + CheckedArithmetic
    + Send
    + Sync
    + 'static
{
    /// The descriptor binding this primitive's width and family.
    const DESCRIPTOR: ReprDescriptor;
    /// The smallest finite value.
    const MIN: Self;
    /// The largest finite value.
    const MAX: Self;
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;

    /// Total order: native order for integers, IEEE-754 `totalOrder` for floats.
    fn total_order(&self, other: &Self) -> Ordering;

    /// Returns `true` if the value is strictly below zero.
    fn below_zero(self) -> bool;

    /// Returns `true` for NaN (always `false` for integers).
    fn is_nan_value(self) -> bool;

    /// Converts to `f64`, rounding to the nearest representable value.
    fn to_f64_lossy(self) -> f64;

    /// Converts from `f64` with primitive `as` semantics.
    fn from_f64_lossy(value: f64) -> Self;

    /// Parses a decimal literal.
    ///
    /// Integer literals outside the range fail with `Error::Overflow`, anything
    /// else that does not parse fails with `Error::Casting`.
    fn parse_literal(text: &str) -> Result<Self>;
}

/// A primitive integer representation (shifts and bitwise operations apply).
pub trait Integral: Representation + PrimInt + Ord + Hash + CheckedShift {}

/// A primitive IEEE-754 representation.
pub trait Float: Representation + num_traits::Float {}

fn literal_error(name: &'static str) -> Error {
    Error::Casting { from: "text", to: name }
}

macro_rules! impl_integral_repr {
    ($t:ty, $name:expr, $kind:expr) => {
        impl Representation for $t {
            const DESCRIPTOR: ReprDescriptor = ReprDescriptor::new($name, <$t>::BITS, $kind);
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)]
            fn total_order(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            #[inline(always)]
            fn below_zero(self) -> bool {
                self < <$t as num_traits::Zero>::zero()
            }

            #[inline(always)]
            fn is_nan_value(self) -> bool {
                false
            }

            #[inline(always)]
            fn to_f64_lossy(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn from_f64_lossy(value: f64) -> Self {
                value as $t
            }

            fn parse_literal(text: &str) -> Result<Self> {
                let text = text.trim();
                text.parse::<$t>().or_else(|e| match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        Err(Error::Overflow(Operation::Parse { to: $name }))
                    }
                    IntErrorKind::InvalidDigit if !Self::DESCRIPTOR.kind().is_signed() => {
                        // Unsigned parsers reject the sign before looking at the digits.
                        match text.strip_prefix('-') {
                            Some(digits)
                                if !digits.is_empty()
                                    && digits.bytes().all(|b| b.is_ascii_digit()) =>
                            {
                                if digits.bytes().all(|b| b == b'0') {
                                    Ok(0)
                                } else {
                                    Err(Error::Overflow(Operation::Parse { to: $name }))
                                }
                            }
                            _ => Err(literal_error($name)),
                        }
                    }
                    _ => Err(literal_error($name)),
                })
            }
        }

        impl Integral for $t {}
    };
}

macro_rules! impl_float_repr {
    ($t:ty, $name:expr, $bits:expr) => {
        impl Representation for $t {
            const DESCRIPTOR: ReprDescriptor = ReprDescriptor::new($name, $bits, ReprKind::Float);
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline(always)]
            fn total_order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            #[inline(always)]
            fn below_zero(self) -> bool {
                self < 0.0
            }

            #[inline(always)]
            fn is_nan_value(self) -> bool {
                self.is_nan()
            }

            #[inline(always)]
            fn to_f64_lossy(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn from_f64_lossy(value: f64) -> Self {
                value as $t
            }

            fn parse_literal(text: &str) -> Result<Self> {
                text.trim().parse::<$t>().map_err(|_| literal_error($name))
            }
        }

        impl Float for $t {}
    };
}

impl_integral_repr!(i8, "int8", ReprKind::Signed);
impl_integral_repr!(i16, "int16", ReprKind::Signed);
impl_integral_repr!(i32, "int32", ReprKind::Signed);
impl_integral_repr!(i64, "int64", ReprKind::Signed);
impl_integral_repr!(i128, "int128", ReprKind::Signed);
impl_integral_repr!(isize, "isize", ReprKind::Signed);

impl_integral_repr!(u8, "uint8", ReprKind::Unsigned);
impl_integral_repr!(u16, "uint16", ReprKind::Unsigned);
impl_integral_repr!(u32, "uint32", ReprKind::Unsigned);
impl_integral_repr!(u64, "uint64", ReprKind::Unsigned);
impl_integral_repr!(u128, "uint128", ReprKind::Unsigned);
impl_integral_repr!(usize, "usize", ReprKind::Unsigned);

impl_float_repr!(f32, "float32", 32);
impl_float_repr!(f64, "float64", 64);
