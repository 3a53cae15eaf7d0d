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

//! # Cast Policy
//!
//! Bounds-checked conversion between any two representations.
//!
//! | Source → Target        | Rule                                                    |
//! |------------------------|---------------------------------------------------------|
//! | integral → integral    | exact range check, negative → unsigned overflows        |
//! | integral → floating    | nearest representable value                             |
//! | floating → integral    | NaN is a casting error, ±Inf or out of range overflows, |
//! |                        | otherwise truncation toward zero                        |
//! | floating → floating    | finite values beyond the target range overflow,         |
//! |                        | NaN and ±Inf are preserved                              |
//!
//! ```rust
//! use ballast_core::error::ErrorKind;
//! use ballast_core::num::cast::{can_convert, convert};
//!
//! assert_eq!(convert::<i16, u8>(255), Ok(255u8));
//! assert_eq!(convert::<i16, u8>(-1).map_err(|e| e.kind()), Err(ErrorKind::Overflow));
//! assert_eq!(convert::<f64, i32>(-7.9), Ok(-7));
//! assert_eq!(convert::<f64, i32>(f64::NAN).map_err(|e| e.kind()), Err(ErrorKind::Casting));
//! assert!(!can_convert::<f64, f32>(1e300));
//! ```

use crate::{
    error::{Error, Operation, Result},
    num::repr::{ReprKind, Representation},
};
use num_traits::NumCast;

#[cold]
fn conversion_overflow<S: Representation, T: Representation>(value: S) -> Error {
    tracing::trace!(
        from = S::DESCRIPTOR.name(),
        to = T::DESCRIPTOR.name(),
        %value,
        "conversion out of range"
    );
    Error::Overflow(Operation::Conversion {
        from: S::DESCRIPTOR.name(),
        to: T::DESCRIPTOR.name(),
    })
}

/// Converts `value` from representation `S` into representation `T`.
///
/// # Errors
///
/// `Error::Overflow` when the value lies outside `T`'s range (including any
/// negative value into an unsigned target), `Error::Casting` for NaN into an
/// integral target.
pub fn convert<S, T>(value: S) -> Result<T>
where
    S: Representation,
    T: Representation,
{
    let source = S::DESCRIPTOR.kind();
    let target = T::DESCRIPTOR.kind();

    if source == ReprKind::Float && target.is_integral() {
        if value.is_nan_value() {
            tracing::trace!(to = T::DESCRIPTOR.name(), "NaN has no integral value");
            return Err(Error::Casting {
                from: S::DESCRIPTOR.name(),
                to: T::DESCRIPTOR.name(),
            });
        }
        if value.to_f64_lossy().is_infinite() {
            return Err(conversion_overflow::<S, T>(value));
        }
    }

    if target == ReprKind::Unsigned && value.below_zero() {
        return Err(conversion_overflow::<S, T>(value));
    }

    if source == ReprKind::Float && target == ReprKind::Float {
        let wide = value.to_f64_lossy();
        if wide.is_finite() && (wide > T::MAX.to_f64_lossy() || wide < T::MIN.to_f64_lossy()) {
            return Err(conversion_overflow::<S, T>(value));
        }
        return Ok(T::from_f64_lossy(wide));
    }

    <T as NumCast>::from(value).ok_or_else(|| conversion_overflow::<S, T>(value))
}

/// Returns `true` if [`convert`] would succeed for `value`.
#[inline]
pub fn can_convert<S, T>(value: S) -> bool
where
    S: Representation,
    T: Representation,
{
    convert::<S, T>(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind<T>(r: Result<T>) -> Option<ErrorKind> {
        r.err().map(|e| e.kind())
    }

    #[test]
    fn test_integral_to_integral() {
        assert_eq!(convert::<i32, i8>(127), Ok(127i8));
        assert_eq!(convert::<i32, i8>(-128), Ok(-128i8));
        assert_eq!(kind(convert::<i32, i8>(128)), Some(ErrorKind::Overflow));
        assert_eq!(kind(convert::<i32, i8>(-129)), Some(ErrorKind::Overflow));
        assert_eq!(kind(convert::<i8, u64>(-1)), Some(ErrorKind::Overflow));
        assert_eq!(convert::<u64, i128>(u64::MAX), Ok(<i128 as From<u64>>::from(u64::MAX)));
        assert_eq!(kind(convert::<u128, i128>(u128::MAX)), Some(ErrorKind::Overflow));
        assert_eq!(convert::<usize, u16>(65535), Ok(u16::MAX));
    }

    #[test]
    fn test_conversion_error_names_both_sides() {
        assert_eq!(
            convert::<i16, u8>(300),
            Err(Error::Overflow(Operation::Conversion {
                from: "int16",
                to: "uint8"
            }))
        );
    }

    #[test]
    fn test_integral_to_float() {
        assert_eq!(convert::<i64, f64>(-3), Ok(-3.0));
        assert_eq!(convert::<u8, f32>(255), Ok(255.0));
        assert_eq!(convert::<i64, f64>(i64::MAX), Ok(i64::MAX as f64));
    }

    #[test]
    fn test_float_to_integral() {
        assert_eq!(convert::<f64, i32>(7.9), Ok(7));
        assert_eq!(convert::<f64, i32>(-7.9), Ok(-7));
        assert_eq!(convert::<f32, u8>(255.0), Ok(255));
        assert_eq!(kind(convert::<f32, u8>(256.0)), Some(ErrorKind::Overflow));
        assert_eq!(kind(convert::<f64, u8>(-0.5)), Some(ErrorKind::Overflow));
        assert_eq!(convert::<f64, u8>(-0.0), Ok(0));
        assert_eq!(kind(convert::<f64, i64>(f64::INFINITY)), Some(ErrorKind::Overflow));
        assert_eq!(
            kind(convert::<f64, i64>(f64::NEG_INFINITY)),
            Some(ErrorKind::Overflow)
        );
        assert_eq!(kind(convert::<f64, i64>(f64::NAN)), Some(ErrorKind::Casting));
        assert_eq!(kind(convert::<f64, i64>(9.3e18)), Some(ErrorKind::Overflow));
    }

    #[test]
    fn test_float_to_float() {
        assert_eq!(convert::<f32, f64>(1.5), Ok(1.5));
        assert_eq!(convert::<f64, f32>(0.5), Ok(0.5));
        assert_eq!(kind(convert::<f64, f32>(1e300)), Some(ErrorKind::Overflow));
        assert_eq!(kind(convert::<f64, f32>(-1e300)), Some(ErrorKind::Overflow));
        assert_eq!(convert::<f64, f32>(f64::INFINITY), Ok(f32::INFINITY));
        assert!(convert::<f64, f32>(f64::NAN).is_ok_and(f32::is_nan));
    }

    #[test]
    fn test_can_convert_agrees() {
        assert!(can_convert::<i16, u8>(200));
        assert!(!can_convert::<i16, u8>(-200));
        assert!(!can_convert::<f32, i8>(f32::NAN));
        assert!(can_convert::<f32, f64>(f32::NAN));
    }
}
