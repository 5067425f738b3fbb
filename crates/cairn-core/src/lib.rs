//! # cairn-core
//!
//! Content-addressed interning for the cairn symbolic-computation stack.
//!
//! This crate provides:
//! - A generic reference-counted intern pool (`Pool`) mapping normalized
//!   content to stable integer ids
//! - Opaque entry handles (`EntryId`) with O(1) identity equality
//! - The normalization-policy seam (`Canonicalize`)
//! - Concrete pool clients: fresh variables, uninterpreted-function
//!   instances, and bitvector term nodes
//!
//! ## Design Principles
//!
//! - **Content addressing**: at most one live entry per distinct content
//! - **Explicit reference counts**: eviction is deterministic, not traced
//! - **Index-based arena**: handles are ids into a slot table, not pointers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bv;
pub mod canonical;
pub mod pool;
pub mod uf;
pub mod variable;

pub use bv::{BvBinaryOp, BvTerm, BvTermPool, BvUnaryOp, BvVariable};
pub use canonical::Canonicalize;
pub use pool::{EntryId, Pool};
pub use uf::{UfFunction, UfInstance, UfPool};
pub use variable::{Variable, VariablePool};
