//! Property-based tests for polynomial normalization.

#[cfg(test)]
mod tests {
    use cairn_arith::Rational;
    use cairn_core::{Canonicalize, VariablePool};
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Monomial, Polynomial};

    // A small random polynomial in up to three variables.
    fn poly() -> impl Strategy<Value = Polynomial> {
        let term = (
            proptest::collection::vec(0u32..4, 3),
            -20i64..20,
            1i64..6,
        );
        proptest::collection::vec(term, 0..5).prop_map(|raw| {
            let mut vars = VariablePool::new();
            let vs = [vars.fresh("x"), vars.fresh("y"), vars.fresh("z")];
            let terms = raw
                .into_iter()
                .map(|(exps, num, den)| {
                    let m = Monomial::from_exponents(
                        vs.iter().copied().zip(exps.iter().copied()),
                    );
                    (m, Rational::from_i64(num, den))
                })
                .collect();
            Polynomial::from_terms(terms)
        })
    }

    fn non_zero_scalar() -> impl Strategy<Value = Rational> {
        (
            prop_oneof![(-50i64..=-1i64), (1i64..=50i64)],
            1i64..10,
        )
            .prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    proptest! {
        #[test]
        fn canonical_content_is_one(p in poly()) {
            let (unit, content) = p.canonicalize();
            if unit.is_zero() {
                prop_assert!(content.is_one());
            } else {
                prop_assert!(content.content().is_one());
            }
        }

        #[test]
        fn canonicalize_reconstructs(p in poly()) {
            let (unit, content) = p.clone().canonicalize();
            prop_assert_eq!(content.scale(&unit), p);
        }

        #[test]
        fn scaling_preserves_canonical_content(p in poly(), s in non_zero_scalar()) {
            prop_assume!(!p.is_zero());
            let (_, content) = p.clone().canonicalize();
            let (_, scaled_content) = p.scale(&s).canonicalize();
            prop_assert_eq!(content, scaled_content);
        }

        #[test]
        fn mul_degree_is_additive(a in poly(), b in poly()) {
            prop_assume!(!a.is_zero() && !b.is_zero());
            let product = &a * &b;
            prop_assert_eq!(
                product.total_degree(),
                a.total_degree() + b.total_degree()
            );
        }

        #[test]
        fn add_commutes(a in poly(), b in poly()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }
    }
}
