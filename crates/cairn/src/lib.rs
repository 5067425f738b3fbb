//! # Cairn
//!
//! A content-addressed interning substrate for symbolic solver cores.
//!
//! Cairn stores canonical polynomial content in reference-counted intern
//! pools so that structural equality is an integer comparison, and
//! memoizes expensive factorizations next to the interned content so
//! each distinct polynomial pays the factorization cost at most once.
//!
//! ## Quick Start
//!
//! ```rust
//! use cairn::prelude::*;
//!
//! let mut vars = VariablePool::new();
//! let x = vars.fresh("x");
//! let y = vars.fresh("y");
//!
//! let mut cache = FactorizationCache::new(IrreducibleOracle);
//! let a = cache.construct(&Polynomial::var(x) * &Polynomial::var(y));
//! let b = cache.construct(Polynomial::var(y) * Polynomial::var(x));
//! assert_eq!(a.entry(), b.entry());
//!
//! let g = gcd(&mut cache, &a, &b);
//! assert_eq!(g.to_polynomial(&cache), a.to_polynomial(&cache));
//!
//! cache.release(a);
//! cache.release(b);
//! cache.release(g);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use cairn_arith as arith;
pub use cairn_core as core;
pub use cairn_factor as factor;
pub use cairn_poly as poly;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use cairn_arith::{Integer, Rational};
    pub use cairn_core::{
        BvTermPool, Canonicalize, EntryId, Pool, UfPool, Variable, VariablePool,
    };
    pub use cairn_factor::{
        common_divisor, gcd, FactorizationCache, FactorizationOracle, FactorizedPoly,
        IrreducibleOracle,
    };
    pub use cairn_poly::{Monomial, Polynomial};
}
