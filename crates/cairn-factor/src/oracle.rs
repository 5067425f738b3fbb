//! The external factorization capability.

use cairn_poly::Polynomial;

/// An oracle producing irreducible factorizations.
///
/// The cache hands the oracle canonical content: a non-constant
/// polynomial with coprime integer coefficients and a positive leading
/// coefficient.
///
/// # Contract
///
/// The returned `(factor, exponent)` multiset must multiply out to the
/// input exactly, every factor must be irreducible and non-constant, and
/// an irreducible input must come back as `[(input, 1)]`. The cache
/// treats a violated contract as a caller bug, checked in debug builds.
pub trait FactorizationOracle {
    /// Factors a canonical polynomial into irreducibles.
    fn factorize(&self, poly: &Polynomial) -> Vec<(Polynomial, u32)>;
}

/// The degenerate oracle: declares every input irreducible.
///
/// Useful as a time-bounded fallback: treating content as atomic makes
/// every common divisor collapse to the scalar part, which is always
/// sound, just not maximal.
#[derive(Debug, Clone, Copy, Default)]
pub struct IrreducibleOracle;

impl FactorizationOracle for IrreducibleOracle {
    fn factorize(&self, poly: &Polynomial) -> Vec<(Polynomial, u32)> {
        vec![(poly.clone(), 1)]
    }
}
