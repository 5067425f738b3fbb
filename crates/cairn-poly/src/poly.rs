//! Sparse multivariate polynomials over exact rationals.
//!
//! Terms are kept sorted in descending graded-lex order with no zero
//! coefficients, so structural equality and hashing see one canonical
//! term sequence per polynomial.

use cairn_arith::{Integer, Rational};
use cairn_core::{Canonicalize, Variable};
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::monomial::Monomial;

/// A sparse multivariate polynomial with rational coefficients.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Polynomial {
    /// Terms in descending monomial order, coefficients non-zero.
    terms: Vec<(Monomial, Rational)>,
}

impl Polynomial {
    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self::constant(Rational::one())
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        if c.is_zero() {
            Self::zero()
        } else {
            Self {
                terms: vec![(Monomial::one(), c)],
            }
        }
    }

    /// Creates the polynomial `v`.
    #[must_use]
    pub fn var(v: Variable) -> Self {
        Self {
            terms: vec![(Monomial::var(v), Rational::one())],
        }
    }

    /// Creates a polynomial from terms.
    ///
    /// Terms are sorted, like terms combined, zero coefficients dropped.
    #[must_use]
    pub fn from_terms(terms: Vec<(Monomial, Rational)>) -> Self {
        let mut poly = Self { terms };
        poly.normalize();
        poly
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if this polynomial is a constant (including zero).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        match self.terms.first() {
            None => true,
            Some((m, _)) => m.is_one(),
        }
    }

    /// Returns true if this is the constant polynomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self.terms.as_slice(), [(m, c)] if m.is_one() && c.is_one())
    }

    /// Returns the constant value if this polynomial is constant.
    #[must_use]
    pub fn constant_value(&self) -> Option<Rational> {
        match self.terms.as_slice() {
            [] => Some(Rational::zero()),
            [(m, c)] if m.is_one() => Some(c.clone()),
            _ => None,
        }
    }

    /// Returns the terms in descending monomial order.
    #[must_use]
    pub fn terms(&self) -> &[(Monomial, Rational)] {
        &self.terms
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&Rational> {
        self.terms.first().map(|(_, c)| c)
    }

    /// Returns the total degree (0 for constants and zero).
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.terms
            .first()
            .map_or(0, |(m, _)| m.total_degree())
    }

    /// Multiplies every coefficient by a scalar.
    #[must_use]
    pub fn scale(&self, s: &Rational) -> Self {
        if s.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), c * s))
                .collect(),
        }
    }

    /// Computes self^n by binary powering.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            base = &base * &base;
            exp >>= 1;
        }

        result
    }

    /// Computes the signed content: the rational `c` with `self = c * p`
    /// where `p` has coprime integer coefficients and a positive leading
    /// coefficient. The content of zero is zero.
    #[must_use]
    pub fn content(&self) -> Rational {
        if self.is_zero() {
            return Rational::zero();
        }
        let mut num = Integer::zero();
        let mut den = Integer::one();
        for (_, c) in &self.terms {
            num = num.gcd(&c.numerator());
            den = den.lcm(&c.denominator());
        }
        let content = Rational::new(num, den);
        if self.terms[0].1.is_negative() {
            -content
        } else {
            content
        }
    }

    /// Sorts terms, combines like terms, drops zero coefficients.
    fn normalize(&mut self) {
        self.terms.sort_by(|a, b| b.0.cmp(&a.0));

        let mut i = 0;
        while i < self.terms.len() {
            let mut j = i + 1;
            while j < self.terms.len() && self.terms[i].0 == self.terms[j].0 {
                let c = self.terms.remove(j).1;
                self.terms[i].1 = self.terms[i].1.clone() + c;
            }
            if self.terms[i].1.is_zero() {
                self.terms.remove(i);
            } else {
                i += 1;
            }
        }
    }
}

/// Normalization policy for polynomials: the signed rational content is
/// the unit, the primitive positive-leading-coefficient part is the
/// interned content. Zero normalizes to scalar 0 over the content 1, so
/// zero values intern like any other constant.
impl Canonicalize for Polynomial {
    type Unit = Rational;
    type Content = Polynomial;

    fn canonicalize(self) -> (Rational, Polynomial) {
        if self.is_zero() {
            return (Rational::zero(), Polynomial::one());
        }
        let content = self.content();
        let primitive = self.scale(&content.recip());
        (content, primitive)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Self::Output {
        let mut terms = self.terms.clone();
        terms.extend(rhs.terms.iter().cloned());
        Polynomial::from_terms(terms)
    }
}

impl Add for Polynomial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Self::Output {
        self + &-rhs
    }
}

impl Sub for Polynomial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut terms = Vec::with_capacity(self.terms.len() * rhs.terms.len());
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                terms.push((ma.mul(mb), ca * cb));
            }
        }
        Polynomial::from_terms(terms)
    }
}

impl Mul for Polynomial {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        Polynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), -c))
                .collect(),
        }
    }
}

impl Neg for Polynomial {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (m, c)) in self.terms.iter().enumerate() {
            let abs = c.abs();
            if i == 0 {
                if c.is_negative() {
                    write!(f, "-")?;
                }
            } else if c.is_negative() {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            if m.is_one() {
                write!(f, "{abs}")?;
            } else if abs.is_one() {
                write!(f, "{m}")?;
            } else {
                write!(f, "{abs}*{m}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::VariablePool;

    fn xy() -> (Variable, Variable) {
        let mut pool = VariablePool::new();
        (pool.fresh("x"), pool.fresh("y"))
    }

    #[test]
    fn test_like_terms_combine() {
        let (x, _) = xy();
        let p = &Polynomial::var(x) + &Polynomial::var(x);
        assert_eq!(p, Polynomial::var(x).scale(&Rational::from(2)));

        let q = &p - &p;
        assert!(q.is_zero());
    }

    #[test]
    fn test_mul() {
        let (x, y) = xy();
        // (x + y)(x - y) = x^2 - y^2
        let sum = &Polynomial::var(x) + &Polynomial::var(y);
        let diff = &Polynomial::var(x) - &Polynomial::var(y);
        let expected = &Polynomial::var(x).pow(2) - &Polynomial::var(y).pow(2);
        assert_eq!(&sum * &diff, expected);
    }

    #[test]
    fn test_content_strips_sign_and_scale() {
        let (x, y) = xy();
        // -4x - 6y has content -2
        let p = &Polynomial::var(x).scale(&Rational::from(-4))
            + &Polynomial::var(y).scale(&Rational::from(-6));
        assert_eq!(p.content(), Rational::from(-2));

        let (unit, primitive) = p.clone().canonicalize();
        assert_eq!(unit, Rational::from(-2));
        assert_eq!(primitive.content(), Rational::one());
        assert_eq!(primitive.scale(&unit), p);
    }

    #[test]
    fn test_fractional_content() {
        let (x, _) = xy();
        // (3/2)x: content 3/2, primitive x
        let p = Polynomial::var(x).scale(&Rational::from_i64(3, 2));
        assert_eq!(p.content(), Rational::from_i64(3, 2));
        let (unit, primitive) = p.canonicalize();
        assert_eq!(unit, Rational::from_i64(3, 2));
        assert_eq!(primitive, Polynomial::var(x));
    }

    #[test]
    fn test_zero_canonicalizes_to_unit_content() {
        let (unit, content) = Polynomial::zero().canonicalize();
        assert!(unit.is_zero());
        assert!(content.is_one());
    }

    #[test]
    fn test_constant_queries() {
        let (x, _) = xy();
        assert!(Polynomial::zero().is_constant());
        assert!(Polynomial::constant(Rational::from(5)).is_constant());
        assert!(!Polynomial::var(x).is_constant());
        assert_eq!(
            Polynomial::constant(Rational::from(5)).constant_value(),
            Some(Rational::from(5))
        );
        assert_eq!(Polynomial::var(x).constant_value(), None);
        assert_eq!(Polynomial::var(x).pow(3).total_degree(), 3);
    }

    #[test]
    fn test_display() {
        let (x, y) = xy();
        let p = &Polynomial::var(x).pow(2).scale(&Rational::from(3))
            - &Polynomial::var(y).scale(&Rational::from_i64(1, 2));
        assert_eq!(p.to_string(), "3*v0^2 - 1/2*v1");
    }
}
