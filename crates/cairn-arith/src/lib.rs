//! # cairn-arith
//!
//! Exact arbitrary-precision arithmetic for the cairn interning substrate.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`)
//!
//! Both types carry exactly the operations the caching layer consumes:
//! ring arithmetic, gcd/lcm, sign handling, and hashing. Parsing and
//! numeric conversions beyond `i64` are deliberately out of scope.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::Rational;
