//! Property-based tests for the cache and the divisor algorithm.
//!
//! Operands are random monomials so the fallback oracle factorizes them
//! exactly; on that class the maximal common divisor has a closed form
//! to check against.

#[cfg(test)]
mod tests {
    use cairn_arith::Rational;
    use cairn_poly::{Monomial, Polynomial};
    use proptest::prelude::*;

    use crate::testing::{vars3, SplitOracle};
    use crate::{common_divisor, FactorizationCache};

    // scalar * x^a * y^b * z^c with a non-zero scalar
    fn monomial_poly() -> impl Strategy<Value = (Rational, [u32; 3])> {
        (
            prop_oneof![(-20i64..=-1i64), (1i64..=20i64)],
            1i64..6,
            proptest::collection::vec(0u32..4, 3),
        )
            .prop_map(|(n, d, exps)| {
                (Rational::from_i64(n, d), [exps[0], exps[1], exps[2]])
            })
    }

    fn build(scalar: &Rational, exps: &[u32; 3]) -> Polynomial {
        let (x, y, z) = vars3();
        let m = Monomial::from_exponents([(x, exps[0]), (y, exps[1]), (z, exps[2])]);
        Polynomial::from_terms(vec![(m, scalar.clone())])
    }

    proptest! {
        #[test]
        fn construct_round_trips((s, e) in monomial_poly()) {
            let mut cache = FactorizationCache::new(SplitOracle::new());
            let p = build(&s, &e);

            let h = cache.construct(p.clone());
            prop_assert_eq!(h.to_polynomial(&cache), p);

            cache.release(h);
            prop_assert!(cache.is_empty());
        }

        #[test]
        fn divisor_and_cofactors_reconstruct(
            (sa, ea) in monomial_poly(),
            (sb, eb) in monomial_poly(),
        ) {
            let mut cache = FactorizationCache::new(SplitOracle::new());
            let pa = build(&sa, &ea);
            let pb = build(&sb, &eb);

            let a = cache.construct(pa.clone());
            let b = cache.construct(pb.clone());
            let (divisor, rest_a, rest_b) = common_divisor(&mut cache, &a, &b);

            prop_assert_eq!(&divisor * &rest_a.to_polynomial(&cache), pa);
            prop_assert_eq!(&divisor * &rest_b.to_polynomial(&cache), pb);

            cache.release(a);
            cache.release(b);
            cache.release(rest_a);
            cache.release(rest_b);
            prop_assert!(cache.is_empty());
        }

        #[test]
        fn divisor_is_maximal(
            (sa, ea) in monomial_poly(),
            (sb, eb) in monomial_poly(),
        ) {
            let mut cache = FactorizationCache::new(SplitOracle::new());
            let a = cache.construct(build(&sa, &ea));
            let b = cache.construct(build(&sb, &eb));

            let (divisor, rest_a, rest_b) = common_divisor(&mut cache, &a, &b);

            // for monomials the maximal divisor is the scalar gcd times
            // the per-variable minimum exponents
            let min = [
                ea[0].min(eb[0]),
                ea[1].min(eb[1]),
                ea[2].min(eb[2]),
            ];
            let expected = build(&sa.gcd(&sb), &min);
            prop_assert_eq!(divisor, expected);

            cache.release(a);
            cache.release(b);
            cache.release(rest_a);
            cache.release(rest_b);
            prop_assert!(cache.is_empty());
        }

        #[test]
        fn interning_is_stable_across_scaling(
            (s, e) in monomial_poly(),
            (t, _) in monomial_poly(),
        ) {
            let mut cache = FactorizationCache::new(SplitOracle::new());
            let p = build(&s, &e);

            let a = cache.construct(p.clone());
            let b = cache.construct(p.scale(&t));
            prop_assert_eq!(a.entry(), b.entry());

            cache.release(a);
            cache.release(b);
            prop_assert!(cache.is_empty());
        }
    }
}
