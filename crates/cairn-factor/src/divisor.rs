//! Maximal common divisors over shared factorizations.
//!
//! Once both operands' entries are factorized, the divisor is computed
//! by merging two id-sorted factor lists: factors are interned, so
//! "same irreducible" is an id comparison, and the merge is linear.

use cairn_poly::Polynomial;
use std::cmp::Ordering;

use crate::cache::{FactorList, FactorizationCache};
use crate::factorized::FactorizedPoly;
use crate::oracle::FactorizationOracle;

/// Computes a maximal common divisor `D` of `a` and `b` together with
/// the cofactors, returning `(D, rest_a, rest_b)` such that
/// `a == D * rest_a` and `b == D * rest_b`.
///
/// `D` contains every irreducible factor common to both operands raised
/// to the minimum of the two exponents, scaled by the rational gcd of
/// the two scalar coefficients. It is returned as plain content, so
/// wrapping (and thereby caching) it stays the caller's explicit step,
/// while the cofactors are constructed through the cache and therefore
/// deduplicated against existing entries.
///
/// Factorization of both entries is forced here; that is the single
/// point where the oracle cost is paid, at most once per distinct entry.
///
/// Degenerate operands are defined branches: with `a` zero,
/// `D = b`, `rest_a = 0`, `rest_b = 1` (symmetrically for `b`); with
/// both zero, `D = 0` and both cofactors are 1. A constant operand makes
/// the other operand its own cofactor. If both handles reference the
/// same entry, `D` is that entry scaled by the scalar gcd and no
/// factorization is forced.
///
/// # Panics
///
/// Panics if a handle is not live in `cache`.
pub fn common_divisor<O: FactorizationOracle>(
    cache: &mut FactorizationCache<O>,
    a: &FactorizedPoly,
    b: &FactorizedPoly,
) -> (Polynomial, FactorizedPoly, FactorizedPoly) {
    if a.is_zero() && b.is_zero() {
        let rest_a = cache.construct(Polynomial::one());
        let rest_b = cache.construct(Polynomial::one());
        return (Polynomial::zero(), rest_a, rest_b);
    }
    if a.is_zero() {
        let divisor = b.to_polynomial(cache);
        let rest_a = cache.construct(Polynomial::zero());
        let rest_b = cache.construct(Polynomial::one());
        return (divisor, rest_a, rest_b);
    }
    if b.is_zero() {
        let divisor = a.to_polynomial(cache);
        let rest_a = cache.construct(Polynomial::one());
        let rest_b = cache.construct(Polynomial::zero());
        return (divisor, rest_a, rest_b);
    }

    let scalar_gcd = a.scalar().gcd(b.scalar());
    let scalar_a = a.scalar().clone() / scalar_gcd.clone();
    let scalar_b = b.scalar().clone() / scalar_gcd.clone();

    if a.entry() == b.entry() {
        let divisor = cache.content(a).scale(&scalar_gcd);
        let rest_a = cache.construct(Polynomial::constant(scalar_a));
        let rest_b = cache.construct(Polynomial::constant(scalar_b));
        return (divisor, rest_a, rest_b);
    }

    // a constant operand: the other is entirely its own cofactor and the
    // non-numeric part of the divisor is 1
    if cache.content(a).is_one() {
        let rest_a = cache.construct(Polynomial::constant(scalar_a));
        let rest_b = cache.adopt(scalar_b, b.entry());
        return (Polynomial::constant(scalar_gcd), rest_a, rest_b);
    }
    if cache.content(b).is_one() {
        let rest_a = cache.adopt(scalar_a, a.entry());
        let rest_b = cache.construct(Polynomial::constant(scalar_b));
        return (Polynomial::constant(scalar_gcd), rest_a, rest_b);
    }

    cache.ensure_factorized(a.entry());
    cache.ensure_factorized(b.entry());
    let fa = cache.factor_view(a.entry());
    let fb = cache.factor_view(b.entry());

    let mut common = FactorList::new();
    let mut only_a = FactorList::new();
    let mut only_b = FactorList::new();
    let (mut i, mut j) = (0, 0);
    while i < fa.len() && j < fb.len() {
        match fa[i].0.cmp(&fb[j].0) {
            Ordering::Less => {
                only_a.push(fa[i]);
                i += 1;
            }
            Ordering::Greater => {
                only_b.push(fb[j]);
                j += 1;
            }
            Ordering::Equal => {
                let (id, exp_a) = fa[i];
                let exp_b = fb[j].1;
                let shared = exp_a.min(exp_b);
                common.push((id, shared));
                if exp_a > shared {
                    only_a.push((id, exp_a - shared));
                }
                if exp_b > shared {
                    only_b.push((id, exp_b - shared));
                }
                i += 1;
                j += 1;
            }
        }
    }
    only_a.extend_from_slice(&fa[i..]);
    only_b.extend_from_slice(&fb[j..]);

    let divisor = cache.expand(&common).scale(&scalar_gcd);
    let rest_a = cache.construct_from_factors(scalar_a, only_a);
    let rest_b = cache.construct_from_factors(scalar_b, only_b);
    (divisor, rest_a, rest_b)
}

/// Computes the greatest common divisor of two handles.
///
/// A convenience wrapper over [`common_divisor`] that releases the
/// cofactors and interns the divisor. `gcd(0, 0)` is the zero handle.
pub fn gcd<O: FactorizationOracle>(
    cache: &mut FactorizationCache<O>,
    a: &FactorizedPoly,
    b: &FactorizedPoly,
) -> FactorizedPoly {
    let (divisor, rest_a, rest_b) = common_divisor(cache, a, b);
    rest_a.release(cache);
    rest_b.release(cache);
    cache.construct(divisor)
}
