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

//! Property tests for overflow detection, checked arithmetic, casts and the
//! UTF-8 codec.

use ballast_core::{
    ErrorKind,
    num::{cast::convert, ops::checked_arithmetic::CheckedArithmetic, overflow},
    text::codec,
};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Scalars the codec can encode, biased toward each width class.
fn encodable_scalar() -> impl Strategy<Value = u32> {
    prop_oneof![
        0u32..=0x7F,
        0x80u32..=0x7FF,
        0x800u32..=0xFFFF,
        0x1_0000u32..=codec::MAX_ENCODABLE,
    ]
}

// ============================================================================
// ARITHMETIC PROPERTIES
// ============================================================================

proptest! {
    /// The predicates agree with a wider reference computation.
    #[test]
    fn prop_i32_predicates_match_i64_reference(a in any::<i32>(), b in any::<i32>()) {
        let fits = |v: i64| v >= i64::from(i32::MIN) && v <= i64::from(i32::MAX);
        let (wa, wb) = (i64::from(a), i64::from(b));
        prop_assert_eq!(overflow::add_overflows(a, b), !fits(wa + wb));
        prop_assert_eq!(overflow::sub_overflows(a, b), !fits(wa - wb));
        prop_assert_eq!(overflow::mul_overflows(a, b), !fits(wa * wb));
    }

    /// Checked results agree with std's checked arithmetic.
    #[test]
    fn prop_checked_matches_std(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(a.checked_add_val(b).ok(), a.checked_add(b));
        prop_assert_eq!(a.checked_sub_val(b).ok(), a.checked_sub(b));
        prop_assert_eq!(a.checked_mul_val(b).ok(), a.checked_mul(b));
        prop_assert_eq!(a.checked_div_val(b).ok(), a.checked_div(b));
    }

    /// `(a + b) - b == a` whenever the addition succeeds.
    #[test]
    fn prop_add_then_sub_restores(a in any::<u16>(), b in any::<u16>()) {
        if let Ok(sum) = a.checked_add_val(b) {
            prop_assert_eq!(sum.checked_sub_val(b), Ok(a));
        } else {
            prop_assert!(u32::from(a) + u32::from(b) > u32::from(u16::MAX));
        }
    }

    /// Double negation is the identity except at the minimum.
    #[test]
    fn prop_double_negation(a in any::<i16>()) {
        match a.checked_neg_val() {
            Ok(n) => prop_assert_eq!(n.checked_neg_val(), Ok(a)),
            Err(e) => {
                prop_assert_eq!(a, i16::MIN);
                prop_assert_eq!(e.kind(), ErrorKind::Overflow);
            }
        }
    }

    /// Any value modulo -1 is zero, including the minimum.
    #[test]
    fn prop_rem_minus_one_is_zero(a in any::<i128>()) {
        prop_assert_eq!(a.checked_rem_val(-1), Ok(0));
    }

    /// A successful narrowing cast preserves the value.
    #[test]
    fn prop_narrowing_cast_round_trips(a in any::<i64>()) {
        match convert::<i64, i16>(a) {
            Ok(n) => prop_assert_eq!(i64::from(n), a),
            Err(e) => {
                prop_assert_eq!(e.kind(), ErrorKind::Overflow);
                prop_assert!(i16::try_from(a).is_err());
            }
        }
    }
}

// ============================================================================
// CODEC PROPERTIES
// ============================================================================

proptest! {
    /// Encoding then decoding returns the input scalars.
    #[test]
    fn prop_encode_decode_round_trip(scalars in prop::collection::vec(encodable_scalar(), 0..64)) {
        let bytes = codec::encode(&scalars).unwrap();
        prop_assert!(codec::is_valid_utf8(&bytes));
        prop_assert_eq!(codec::count(&bytes), Ok(scalars.len()));
        prop_assert_eq!(codec::decode(&bytes), Ok(scalars));
    }

    /// The codec accepts everything std accepts and decodes it identically.
    #[test]
    fn prop_strict_text_is_accepted(text in any::<String>()) {
        let expected: Vec<u32> = text.chars().map(u32::from).collect();
        prop_assert_eq!(codec::decode(text.as_bytes()), Ok(expected));
    }

    /// Validation, decoding and counting agree on arbitrary bytes.
    #[test]
    fn prop_validators_agree(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
        let valid = codec::is_valid_utf8(&bytes);
        prop_assert_eq!(codec::validate(&bytes).is_ok(), valid);
        prop_assert_eq!(codec::decode(&bytes).is_ok(), valid);
        prop_assert_eq!(codec::count(&bytes).is_ok(), valid);
        if let Err(e) = codec::decode(&bytes) {
            prop_assert_eq!(e.kind(), ErrorKind::Encoding);
        }
    }

    /// Indexed access matches the decoded sequence.
    #[test]
    fn prop_nth_matches_decode(text in "\\PC{0,16}", index in 0usize..20) {
        let decoded = codec::decode(text.as_bytes()).unwrap();
        match decoded.get(index) {
            Some(&scalar) => prop_assert_eq!(codec::nth(text.as_bytes(), index), Ok(scalar)),
            None => prop_assert_eq!(
                codec::nth(text.as_bytes(), index).map_err(|e| e.kind()),
                Err(ErrorKind::StringIndex)
            ),
        }
    }
}
