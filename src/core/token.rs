//! Token identifiers and sequence invariants.
//!
//! Token meaning lives entirely outside this crate; the core only ever sees
//! bare ids. Two ids are reserved as sentinels.

pub type TokenId = u32;

/// Sequence-start sentinel. Always the first element of a generated sequence.
pub const BOS: TokenId = 0;

/// Sequence-end sentinel. Always the last element of a generated sequence.
pub const EOS: TokenId = 1;

#[inline]
pub fn is_sentinel(token: TokenId) -> bool {
    token == BOS || token == EOS
}

/// Check the invariants every generated sequence must satisfy:
/// starts with BOS, ends with EOS, and neither sentinel appears anywhere else.
pub fn is_well_formed(seq: &[TokenId]) -> bool {
    let Some((&first, rest)) = seq.split_first() else {
        return false;
    };
    if first != BOS {
        return false;
    }
    let Some((&last, interior)) = rest.split_last() else {
        return false;
    };
    if last != EOS {
        return false;
    }
    interior.iter().all(|&t| !is_sentinel(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_accepts_minimal_and_ordinary_sequences() {
        assert!(is_well_formed(&[BOS, EOS]));
        assert!(is_well_formed(&[BOS, 5, 7, 5, EOS]));
    }

    #[test]
    fn well_formed_rejects_misplaced_sentinels() {
        assert!(!is_well_formed(&[]));
        assert!(!is_well_formed(&[BOS]));
        assert!(!is_well_formed(&[5, EOS]));
        assert!(!is_well_formed(&[BOS, BOS, EOS]));
        assert!(!is_well_formed(&[BOS, EOS, 5, EOS]));
        assert!(!is_well_formed(&[BOS, 5, 7]));
    }
}
