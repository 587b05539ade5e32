//! Deliberately weak next-token sampler.
//!
//! No trainable parameters and no persistent state; structure is expected to
//! emerge from survival pressure on the embeddings, not from this sampler.

use crate::error::CullError;
use crate::prng::Prng;
use crate::token::{TokenId, BOS, EOS};

/// Uniformly sample one token id after tiny rule-based filtering.
///
/// Rules are intentionally minimal:
/// - position 0 cannot be EOS (a sequence cannot end before it starts)
/// - BOS cannot appear after position 0
///
/// The caller's `rng` is the shared per-run source; sampling consumes from it
/// and has no other side effects.
pub fn sample_next_token(
    vocab: &[TokenId],
    context: &[TokenId],
    rng: &mut Prng,
) -> Result<TokenId, CullError> {
    if vocab.is_empty() {
        return Err(CullError::EmptyVocabulary);
    }

    let mut filtered = Vec::with_capacity(vocab.len());
    for &token in vocab {
        if context.is_empty() && token == EOS {
            continue;
        }
        if !context.is_empty() && token == BOS {
            continue;
        }
        filtered.push(token);
    }

    if filtered.is_empty() {
        // Only possible when the vocabulary held nothing but the sentinel
        // the current position excludes.
        return Err(CullError::ExhaustedCandidates);
    }

    let idx = rng.gen_range_usize(0, filtered.len());
    Ok(filtered[idx])
}
