//! # cairn-poly
//!
//! Sparse multivariate polynomials over exact rationals.
//!
//! This crate provides only the polynomial surface the interning and
//! caching layers consume: structural equality and hashing, ring
//! arithmetic, degree queries, and the sign/content normalization that
//! decides what counts as equal cached content. General polynomial
//! algebra (division, factorization, Groebner machinery) lives elsewhere.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod monomial;
pub mod poly;

#[cfg(test)]
mod proptests;

pub use monomial::Monomial;
pub use poly::Polynomial;
