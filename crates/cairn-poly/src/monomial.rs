//! Power products of variables.
//!
//! Monomials store sparse (variable, exponent) pairs sorted by variable,
//! which keeps equality, hashing and multiplication cheap for the small
//! exponent vectors typical of solver workloads.

use cairn_core::Variable;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// A power product of variables with positive exponents.
///
/// The empty product is the monomial `1`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Monomial {
    /// Pairs sorted by variable; exponents are always >= 1.
    exps: SmallVec<[(Variable, u32); 4]>,
}

impl Monomial {
    /// Creates the monomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self::default()
    }

    /// Creates the monomial `v`.
    #[must_use]
    pub fn var(v: Variable) -> Self {
        Self {
            exps: smallvec::smallvec![(v, 1)],
        }
    }

    /// Creates a monomial from (variable, exponent) pairs.
    ///
    /// Pairs are sorted, duplicates combined, zero exponents dropped.
    #[must_use]
    pub fn from_exponents(pairs: impl IntoIterator<Item = (Variable, u32)>) -> Self {
        let mut exps: SmallVec<[(Variable, u32); 4]> =
            pairs.into_iter().filter(|&(_, e)| e > 0).collect();
        exps.sort_unstable_by_key(|&(v, _)| v);
        let mut merged: SmallVec<[(Variable, u32); 4]> = SmallVec::new();
        for (v, e) in exps {
            match merged.last_mut() {
                Some((last, acc)) if *last == v => *acc += e,
                _ => merged.push((v, e)),
            }
        }
        Self { exps: merged }
    }

    /// Returns true if this is the monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.exps.is_empty()
    }

    /// Returns the exponent of a variable (0 if absent).
    #[must_use]
    pub fn exponent(&self, v: Variable) -> u32 {
        self.exps
            .iter()
            .find(|&&(var, _)| var == v)
            .map_or(0, |&(_, e)| e)
    }

    /// Returns the sorted (variable, exponent) pairs.
    #[must_use]
    pub fn exponents(&self) -> &[(Variable, u32)] {
        &self.exps
    }

    /// Multiplies two monomials by adding exponents.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut out: SmallVec<[(Variable, u32); 4]> = SmallVec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.exps.len() && j < other.exps.len() {
            let (va, ea) = self.exps[i];
            let (vb, eb) = other.exps[j];
            match va.cmp(&vb) {
                Ordering::Less => {
                    out.push((va, ea));
                    i += 1;
                }
                Ordering::Greater => {
                    out.push((vb, eb));
                    j += 1;
                }
                Ordering::Equal => {
                    out.push((va, ea + eb));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&self.exps[i..]);
        out.extend_from_slice(&other.exps[j..]);
        Self { exps: out }
    }

    /// Divides by another monomial if every exponent allows it.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        let mut out: SmallVec<[(Variable, u32); 4]> = SmallVec::new();
        let mut rest = other.exps.iter().peekable();
        for &(v, e) in &self.exps {
            match rest.peek() {
                Some(&&(vo, eo)) if vo == v => {
                    rest.next();
                    if eo > e {
                        return None;
                    }
                    if e > eo {
                        out.push((v, e - eo));
                    }
                }
                _ => out.push((v, e)),
            }
        }
        if rest.peek().is_some() {
            // divisor mentions a variable the dividend lacks
            return None;
        }
        Some(Self { exps: out })
    }

    /// Computes the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.exps.iter().map(|&(_, e)| e).sum()
    }
}

/// Graded lexicographic order: total degree first, then lexicographic
/// with lower-indexed variables ranking higher.
impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.total_degree().cmp(&other.total_degree()) {
            Ordering::Equal => {}
            ord => return ord,
        }
        let mut a = self.exps.iter();
        let mut b = other.exps.iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some(&(va, ea)), Some(&(vb, eb))) => {
                    if va != vb {
                        // the smaller variable index ranks higher
                        return vb.cmp(&va);
                    }
                    if ea != eb {
                        return ea.cmp(&eb);
                    }
                }
            }
        }
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (i, &(v, e)) in self.exps.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            if e == 1 {
                write!(f, "{v}")?;
            } else {
                write!(f, "{v}^{e}")?;
            }
        }
        Ok(())
    }
}
