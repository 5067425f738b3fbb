//! The normalization-policy seam.
//!
//! Each interned object kind decides what counts as equal content. For
//! polynomials this strips the overall sign and numeric content into a
//! scalar unit; for term-like nodes content is already canonical and the
//! unit is trivial.

use std::hash::Hash;

/// Splits a value into a unit part and canonical content.
///
/// The canonical content is what gets interned; the unit is whatever the
/// normalization absorbed (for polynomials, the signed rational content)
/// and lives on the handle instead. Values with equal canonical content
/// must intern to the same pool entry.
pub trait Canonicalize {
    /// The part absorbed during normalization.
    type Unit;
    /// The normalized content used as the interning key.
    type Content: Clone + Eq + Hash;

    /// Performs the split. Multiplying the unit back onto the content
    /// must reconstruct the original value exactly.
    fn canonicalize(self) -> (Self::Unit, Self::Content);
}
