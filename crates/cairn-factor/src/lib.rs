//! # cairn-factor
//!
//! The factorized-polynomial cache: polynomials interned together with
//! lazily discovered irreducible factorizations.
//!
//! This crate provides:
//! - `FactorizationCache`: a specialization of the generic intern pool
//!   whose entries memoize a factor list computed by an external oracle
//! - `FactorizedPoly`: a lightweight handle (scalar, cache entry) with
//!   shared-ownership semantics via explicit reference counting
//! - `common_divisor` / `gcd`: a maximal common divisor computed by
//!   merging interned factor lists with O(1) identity comparisons
//!
//! Factorization itself is an external capability: the cache consumes a
//! `FactorizationOracle` and pays its cost at most once per distinct
//! canonical polynomial.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod divisor;
pub mod factorized;
pub mod oracle;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testing;

pub use cache::{FactorEntry, FactorList, FactorizationCache};
pub use divisor::{common_divisor, gcd};
pub use factorized::FactorizedPoly;
pub use oracle::{FactorizationOracle, IrreducibleOracle};
