//! Shared fixtures for the in-crate tests.

use cairn_core::{Variable, VariablePool};
use cairn_poly::Polynomial;
use num_traits::One;
use rustc_hash::FxHashMap;

use crate::oracle::FactorizationOracle;

/// Three fresh variables `x`, `y`, `z` (indices 0, 1, 2).
pub(crate) fn vars3() -> (Variable, Variable, Variable) {
    let mut pool = VariablePool::new();
    let x = pool.fresh("x");
    let y = pool.fresh("y");
    let z = pool.fresh("z");
    (x, y, z)
}

/// A deterministic oracle for tests.
///
/// Looks the polynomial up in a registered table first; failing that,
/// splits a single-term polynomial into its per-variable powers; any
/// other polynomial is reported irreducible. Registered entries must
/// honor the real oracle contract (the product of the factors must
/// reconstruct the input).
pub(crate) struct SplitOracle {
    table: FxHashMap<Polynomial, Vec<(Polynomial, u32)>>,
}

impl SplitOracle {
    pub(crate) fn new() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }

    pub(crate) fn register(&mut self, poly: &Polynomial, factors: Vec<(Polynomial, u32)>) {
        self.table.insert(poly.clone(), factors);
    }
}

impl FactorizationOracle for SplitOracle {
    fn factorize(&self, poly: &Polynomial) -> Vec<(Polynomial, u32)> {
        if let Some(factors) = self.table.get(poly) {
            return factors.clone();
        }
        if poly.terms().len() == 1 {
            let (monomial, coeff) = &poly.terms()[0];
            let mut factors: Vec<(Polynomial, u32)> = monomial
                .exponents()
                .iter()
                .map(|&(v, e)| (Polynomial::var(v), e))
                .collect();
            if !coeff.is_one() {
                factors.push((Polynomial::constant(coeff.clone()), 1));
            }
            return factors;
        }
        vec![(poly.clone(), 1)]
    }
}
