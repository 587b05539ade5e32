//! Coherence scoring and the survival predicate.
//!
//! A sequence is only judged by its internal vector coherence: the mean
//! cosine similarity between the embeddings of adjacent tokens. There is no
//! language model and no external objective anywhere in this judgment.

use crate::error::CullError;
use crate::provider::VectorProvider;
use crate::token::TokenId;

/// Threshold used by the training loop when none is configured.
pub const DEFAULT_SURVIVAL_THRESHOLD: f32 = 0.10;

fn dot(v1: &[f32], v2: &[f32]) -> f32 {
    v1.iter().zip(v2.iter()).map(|(a, b)| a * b).sum()
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_similarity(v1: &[f32], v2: &[f32]) -> f32 {
    let n1 = norm(v1);
    let n2 = norm(v2);
    if n1 == 0.0 || n2 == 0.0 {
        // A zero vector has no direction; count the pair as neutral.
        return 0.0;
    }
    dot(v1, v2) / (n1 * n2)
}

/// Mean adjacent-pair cosine similarity, in sequence order.
///
/// Sequences with fewer than two tokens have no adjacent pairs and score
/// exactly `0.0`. Unknown token ids propagate as [`CullError::MissingVector`].
pub fn coherence_score(seq: &[TokenId], provider: &dyn VectorProvider) -> Result<f32, CullError> {
    if seq.len() < 2 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for pair in seq.windows(2) {
        let v1 = provider.get_vector(pair[0])?;
        let v2 = provider.get_vector(pair[1])?;
        total += cosine_similarity(v1, v2);
        pairs += 1;
    }
    Ok(total / pairs as f32)
}

/// Threshold the coherence score into a survival outcome.
///
/// Returns `(survived, score)`; a score exactly at the threshold survives.
/// Pure given the provider's state at call time.
pub fn survives(
    seq: &[TokenId],
    threshold: f32,
    provider: &dyn VectorProvider,
) -> Result<(bool, f32), CullError> {
    let score = coherence_score(seq, provider)?;
    Ok((score >= threshold, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryVectorBackend;

    fn backend_with(pairs: &[(TokenId, Vec<f32>)]) -> MemoryVectorBackend {
        let mut b = MemoryVectorBackend::new(&[], 0, 1);
        for (tid, v) in pairs {
            b.set_vector(*tid, v.clone());
        }
        b
    }

    #[test]
    fn short_sequences_score_zero() {
        let backend = backend_with(&[(2, vec![1.0, 0.0])]);
        assert_eq!(coherence_score(&[], &backend).unwrap(), 0.0);
        assert_eq!(coherence_score(&[2], &backend).unwrap(), 0.0);
    }

    #[test]
    fn identical_vectors_score_one() {
        let backend = backend_with(&[(2, vec![0.3, -0.4]), (3, vec![0.3, -0.4])]);
        let score = coherence_score(&[2, 3], &backend).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_pairs_contribute_zero() {
        let backend = backend_with(&[(2, vec![0.0, 0.0]), (3, vec![1.0, 0.0])]);
        assert_eq!(coherence_score(&[2, 3], &backend).unwrap(), 0.0);
    }

    #[test]
    fn score_is_the_mean_over_adjacent_pairs() {
        // (2,3) orthogonal -> 0.0; (3,4) identical -> 1.0; mean 0.5.
        let backend = backend_with(&[
            (2, vec![1.0, 0.0]),
            (3, vec![0.0, 1.0]),
            (4, vec![0.0, 1.0]),
        ]);
        let score = coherence_score(&[2, 3, 4], &backend).unwrap();
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn missing_vector_propagates() {
        let backend = backend_with(&[(2, vec![1.0])]);
        assert_eq!(
            coherence_score(&[2, 9], &backend),
            Err(CullError::MissingVector(9))
        );
    }

    #[test]
    fn survival_boundary_is_inclusive() {
        // Orthogonal pair scores exactly 0.0.
        let backend = backend_with(&[(2, vec![1.0, 0.0]), (3, vec![0.0, 1.0])]);
        let (ok, score) = survives(&[2, 3], 0.0, &backend).unwrap();
        assert_eq!(score, 0.0);
        assert!(ok);

        let (ok, _) = survives(&[2, 3], 0.01, &backend).unwrap();
        assert!(!ok);
    }
}
