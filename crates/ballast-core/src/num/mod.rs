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

//! # Numeric Foundations
//!
//! Representation-generic building blocks for checked numeric values.
//!
//! ## Submodules
//!
//! - `repr`: `ReprDescriptor` and the `Representation`, `Integral` and `Float`
//!   traits binding each primitive to its width and family.
//! - `overflow`: pure range-check predicates for add, sub, mul, div, negate
//!   and shift over any primitive integer.
//! - `ops`: checked arithmetic by value, returning `Result` with the failing
//!   operation recorded in the error.
//! - `cast`: bounds-checked conversion between any two representations.
//! - `exact`: rounding-free ordering of integers, floats and fixed-point
//!   values against each other.

pub mod cast;
pub mod exact;
pub mod ops;
pub mod overflow;
pub mod repr;
