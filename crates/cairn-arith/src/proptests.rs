//! Property-based tests for the exact arithmetic layer.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d))
    }

    proptest! {
        #[test]
        fn integer_gcd_divides_both(a in small_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);
            prop_assert!(!g.is_zero());
            prop_assert!(!g.is_negative());
        }

        #[test]
        fn integer_gcd_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(a.gcd(&b), b.gcd(&a));
        }

        #[test]
        fn rational_gcd_yields_integer_quotients(a in rational(), b in rational()) {
            let g = a.gcd(&b);
            if a.is_zero() && b.is_zero() {
                prop_assert!(g.is_zero());
            } else {
                prop_assert!(!g.is_negative());
                if !a.is_zero() {
                    prop_assert!((a.clone() / g.clone()).is_integer());
                }
                if !b.is_zero() {
                    prop_assert!((b / g).is_integer());
                }
            }
        }

        #[test]
        fn rational_gcd_quotients_coprime(a in rational(), b in rational()) {
            prop_assume!(!a.is_zero() && !b.is_zero());
            let g = a.gcd(&b);
            let qa = (a / g.clone()).numerator();
            let qb = (b / g).numerator();
            prop_assert!(qa.gcd(&qb).is_one());
        }

        #[test]
        fn rational_mul_recip_is_one(a in rational()) {
            prop_assume!(!a.is_zero());
            prop_assert!((a.clone() * a.recip()).is_one());
        }
    }
}
