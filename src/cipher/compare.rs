use subtle::ConstantTimeEq;

use crate::types::Digest;

/// Compares two verification codes in constant time.
///
/// Runtime depends only on the lengths, never on the position of the first
/// differing byte. Codes of different lengths never match.
#[must_use]
pub fn codes_match(a: &str, b: &str) -> bool {
    a.len() == b.len() && bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}

/// Compares two digests. Both are public, so plain equality is enough.
#[inline]
#[must_use]
pub fn digests_match(a: &Digest, b: &Digest) -> bool {
    a == b
}
