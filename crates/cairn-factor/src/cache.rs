//! The factorization cache.
//!
//! Specializes the generic intern pool for polynomials: each entry keys
//! on canonical (sign- and content-free) polynomial content and carries
//! a lazily populated factor list. Factors are interned into the same
//! cache, so factors of factors are shared automatically and comparing
//! two irreducible factors is an id comparison.

use cairn_arith::Rational;
use cairn_core::{Canonicalize, EntryId, Pool};
use cairn_poly::Polynomial;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

use crate::factorized::FactorizedPoly;
use crate::oracle::FactorizationOracle;

/// An id-sorted list of (factor entry, exponent) pairs.
pub type FactorList = SmallVec<[(EntryId, u32); 4]>;

/// Per-entry payload: the memoized factorization.
///
/// `factors` is `None` until the first factorization request. A
/// populated *empty* list means the content has no proper factors: it is
/// either the unit polynomial 1 or an irreducible.
#[derive(Clone, Debug, Default)]
pub struct FactorEntry {
    factors: Option<FactorList>,
    fully_factored: bool,
}

impl FactorEntry {
    /// Returns the factor list, if already computed.
    #[must_use]
    pub fn factors(&self) -> Option<&[(EntryId, u32)]> {
        self.factors.as_deref()
    }

    /// Returns true once every factor in the list is irreducible.
    #[must_use]
    pub fn is_fully_factored(&self) -> bool {
        self.fully_factored
    }
}

/// A pool of polynomials with memoized factorizations.
///
/// The cache is a caller-owned context object: every handle is bound to
/// the cache that created it, and using a handle against a different
/// cache instance is a contract violation the data model does not guard
/// against beyond id comparison.
#[derive(Debug)]
pub struct FactorizationCache<O> {
    pool: Pool<Polynomial, FactorEntry>,
    oracle: O,
}

impl<O> FactorizationCache<O> {
    /// Creates an empty cache around a factorization oracle.
    pub fn new(oracle: O) -> Self {
        Self {
            pool: Pool::new(),
            oracle,
        }
    }

    /// Constructs a handle from a raw polynomial.
    ///
    /// The polynomial is normalized into (scalar, canonical content) and
    /// the content is interned; the returned handle owns one reference
    /// to the entry. Structurally equal content, including `p`, `-p`, and
    /// `c*p` for any non-zero scalar `c`, always yields the same entry.
    pub fn construct(&mut self, poly: Polynomial) -> FactorizedPoly {
        let (scalar, content) = poly.canonicalize();
        let entry = self.pool.create(content, FactorEntry::default());
        FactorizedPoly::new(scalar, entry)
    }

    /// Clones a handle, incrementing its entry's reference count.
    pub fn acquire(&mut self, handle: &FactorizedPoly) -> FactorizedPoly {
        self.adopt(handle.scalar().clone(), handle.entry())
    }

    /// Wraps an existing entry in a new handle, taking a reference.
    pub(crate) fn adopt(&mut self, scalar: Rational, entry: EntryId) -> FactorizedPoly {
        self.pool.acquire(entry);
        FactorizedPoly::new(scalar, entry)
    }

    /// Releases a handle's reference, cascading through factor lists.
    ///
    /// When an entry's count reaches zero it is evicted and the
    /// references its factor list holds to child entries are released in
    /// turn.
    ///
    /// # Panics
    ///
    /// Panics if the handle's entry is not live in this cache.
    pub fn release(&mut self, handle: FactorizedPoly) {
        let mut stack = vec![handle.entry()];
        while let Some(id) = stack.pop() {
            if let Some((_, payload)) = self.pool.release(id) {
                if let Some(factors) = payload.factors {
                    stack.extend(factors.iter().map(|&(child, _)| child));
                }
            }
        }
    }

    /// Returns the canonical content of a handle's entry.
    ///
    /// # Panics
    ///
    /// Panics if the handle's entry is not live in this cache.
    #[must_use]
    pub fn content(&self, handle: &FactorizedPoly) -> &Polynomial {
        self.pool.get(handle.entry())
    }

    /// Returns the memoized factor list of a handle's entry, if any.
    #[must_use]
    pub fn factors(&self, handle: &FactorizedPoly) -> Option<&[(EntryId, u32)]> {
        self.pool.payload(handle.entry()).factors()
    }

    /// Returns the canonical polynomial stored under an entry id.
    ///
    /// # Panics
    ///
    /// Panics if the id is not live in this cache.
    #[must_use]
    pub fn entry_content(&self, id: EntryId) -> &Polynomial {
        self.pool.get(id)
    }

    /// Returns the reference count of a handle's entry.
    #[must_use]
    pub fn refs(&self, handle: &FactorizedPoly) -> u32 {
        self.pool.refs(handle.entry())
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// The factor list as the divisor algorithm sees it: an entry with
    /// no proper factors counts as its own sole factor, keeping the
    /// factor DAG free of self-edges. The unit content contributes
    /// nothing.
    ///
    /// # Panics
    ///
    /// Panics if the entry has not been factorized yet.
    pub(crate) fn factor_view(&self, id: EntryId) -> FactorList {
        let payload = self.pool.payload(id);
        let factors = payload
            .factors
            .as_ref()
            .expect("factor_view on an unfactorized entry");
        if factors.is_empty() && !self.pool.get(id).is_one() {
            smallvec::smallvec![(id, 1)]
        } else {
            factors.clone()
        }
    }

    /// Multiplies out a factor list into a polynomial.
    pub(crate) fn expand(&self, factors: &[(EntryId, u32)]) -> Polynomial {
        factors.iter().fold(Polynomial::one(), |acc, &(id, e)| {
            &acc * &self.pool.get(id).pow(e)
        })
    }

    /// Builds a handle for `scalar * product(factors)`, re-entering the
    /// interning path so an identical combination already present in the
    /// cache is shared rather than duplicated. A freshly created entry
    /// gets the known factor list installed up front, so it never pays
    /// the oracle.
    pub(crate) fn construct_from_factors(
        &mut self,
        scalar: Rational,
        factors: FactorList,
    ) -> FactorizedPoly {
        if factors.is_empty() {
            return self.construct(Polynomial::constant(scalar));
        }
        if factors.len() == 1 && factors[0].1 == 1 {
            return self.adopt(scalar, factors[0].0);
        }

        debug_assert!(factors.windows(2).all(|w| w[0].0 < w[1].0));

        let content = self.expand(&factors);
        let entry = self.pool.create(content, FactorEntry::default());
        if self.pool.payload(entry).factors.is_none() {
            for &(child, _) in &factors {
                self.pool.acquire(child);
            }
            let payload = self.pool.payload_mut(entry);
            payload.factors = Some(factors);
            payload.fully_factored = true;
        }
        FactorizedPoly::new(scalar, entry)
    }
}

impl<O: FactorizationOracle> FactorizationCache<O> {
    /// Forces the factorization of an entry, memoizing the result.
    ///
    /// The first call pays the oracle; later calls are no-ops. Every
    /// normalized factor is interned into this cache (owned by the
    /// entry's factor list) and marked irreducible, so forcing a factor
    /// later costs nothing either.
    ///
    /// # Panics
    ///
    /// Panics if the id is not live, or (in debug builds) if the oracle
    /// violates its contract.
    pub fn ensure_factorized(&mut self, id: EntryId) {
        if self.pool.payload(id).factors.is_some() {
            return;
        }

        let content = self.pool.get(id).clone();
        if content.is_one() {
            let payload = self.pool.payload_mut(id);
            payload.factors = Some(FactorList::new());
            payload.fully_factored = true;
            return;
        }

        let raw = self.oracle.factorize(&content);
        if raw.len() == 1 && raw[0].1 == 1 && raw[0].0 == content {
            // irreducible: no proper factors
            let payload = self.pool.payload_mut(id);
            payload.factors = Some(FactorList::new());
            payload.fully_factored = true;
            return;
        }

        let parent_degree = content.total_degree();
        let mut merged: FxHashMap<EntryId, u32> = FxHashMap::default();
        for (factor, exp) in raw {
            let (_, canonical) = factor.canonicalize();
            if canonical.is_one() {
                continue;
            }
            debug_assert!(
                canonical.total_degree() < parent_degree,
                "factor degree must strictly decrease"
            );
            let child = self.pool.create(canonical, FactorEntry::default());
            assert!(child != id, "oracle returned its input as a proper factor");

            // a factor of an irreducible factorization is itself atomic
            let payload = self.pool.payload_mut(child);
            if payload.factors.is_none() {
                payload.factors = Some(FactorList::new());
                payload.fully_factored = true;
            }

            if let Some(e) = merged.get_mut(&child) {
                *e += exp;
                // the list owns one reference per distinct factor
                let evicted = self.pool.release(child);
                debug_assert!(evicted.is_none());
            } else {
                merged.insert(child, exp);
            }
        }

        let mut factors: FactorList = merged.into_iter().collect();
        factors.sort_unstable_by_key(|&(child, _)| child);

        #[cfg(debug_assertions)]
        {
            let product = self.expand(&factors);
            debug_assert_eq!(
                product, content,
                "factor list must reconstruct the canonical polynomial"
            );
        }

        let payload = self.pool.payload_mut(id);
        payload.factors = Some(factors);
        payload.fully_factored = true;
    }
}

impl<O> fmt::Display for FactorizationCache<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "factorization cache with {} entries", self.len())?;
        for (id, content, refs, payload) in self.pool.iter() {
            write!(f, "  {id} [refs {refs}] {content}")?;
            match &payload.factors {
                None => writeln!(f, " (unfactorized)")?,
                Some(list) if list.is_empty() => {
                    if content.is_one() {
                        writeln!(f, " (unit)")?;
                    } else {
                        writeln!(f, " (irreducible)")?;
                    }
                }
                Some(list) => {
                    write!(f, " =")?;
                    for &(child, exp) in list {
                        if exp == 1 {
                            write!(f, " ({child})")?;
                        } else {
                            write!(f, " ({child})^{exp}")?;
                        }
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

impl<O> FactorizationCache<O> {
    /// Prints a diagnostic dump of entries, reference counts, and factor
    /// lists. The format is for debugging only and not stable.
    pub fn print(&self) {
        print!("{self}");
    }
}
