//! The factorized-polynomial handle.
//!
//! A handle is a scalar coefficient plus a reference to a cache entry;
//! many logical values share one entry. Because entries live in an
//! index-based arena with explicit reference counts, the handle
//! deliberately implements neither `Clone` nor `Drop`: copies go through
//! [`FactorizedPoly::clone_in`] and disposal through
//! [`FactorizedPoly::release`], keeping every count mutation visible at
//! a cache call site.

use cairn_arith::Rational;
use cairn_core::EntryId;
use cairn_poly::Polynomial;
use num_traits::Zero;

use crate::cache::FactorizationCache;

/// A polynomial represented as `scalar * canonical cache entry`.
///
/// Two handles are equal iff they reference the same entry with equal
/// scalars. Handles are only meaningful against the cache that created
/// them; comparing or using handles across cache instances is a caller
/// bug the data model does not detect.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FactorizedPoly {
    scalar: Rational,
    entry: EntryId,
}

impl FactorizedPoly {
    pub(crate) fn new(scalar: Rational, entry: EntryId) -> Self {
        Self { scalar, entry }
    }

    /// The scalar coefficient absorbed during normalization.
    #[must_use]
    pub fn scalar(&self) -> &Rational {
        &self.scalar
    }

    /// The id of the referenced cache entry.
    #[must_use]
    pub fn entry(&self) -> EntryId {
        self.entry
    }

    /// Returns true if this handle represents the zero polynomial.
    ///
    /// Zero is entirely carried by the scalar, so this never touches the
    /// cache.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.scalar.is_zero()
    }

    /// Returns true if the represented polynomial is a constant.
    ///
    /// Reads the stored canonical content; never forces factorization.
    #[must_use]
    pub fn is_constant<O>(&self, cache: &FactorizationCache<O>) -> bool {
        cache.content(self).is_constant()
    }

    /// Returns the total degree of the represented polynomial.
    ///
    /// Never forces factorization.
    #[must_use]
    pub fn total_degree<O>(&self, cache: &FactorizationCache<O>) -> u32 {
        cache.content(self).total_degree()
    }

    /// Reconstructs the represented polynomial exactly.
    #[must_use]
    pub fn to_polynomial<O>(&self, cache: &FactorizationCache<O>) -> Polynomial {
        cache.content(self).scale(&self.scalar)
    }

    /// Copies this handle, taking a new reference on its entry.
    #[must_use]
    pub fn clone_in<O>(&self, cache: &mut FactorizationCache<O>) -> Self {
        cache.acquire(self)
    }

    /// Releases this handle's reference, cascading eviction.
    pub fn release<O>(self, cache: &mut FactorizationCache<O>) {
        cache.release(self);
    }
}
