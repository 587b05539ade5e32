//! Vector provider capability.
//!
//! Embedding storage and arithmetic are owned by an external collaborator.
//! This crate never creates, initializes, serializes, or persists vectors;
//! it only reads them and requests pairwise deltas through this trait.
//! Callers inject a concrete provider into every scoring/update call, so
//! independent providers (and tests) can coexist in one process.

use hashbrown::HashMap;

use crate::error::CullError;
use crate::prng::Prng;
use crate::token::TokenId;

pub trait VectorProvider {
    /// Current embedding for `token`. Errors if the id is unknown.
    fn get_vector(&self, token: TokenId) -> Result<&[f32], CullError>;

    /// Apply one signed pairwise update to exactly two tokens' vectors.
    /// Interpretation of `delta` is provider-defined; see
    /// [`MemoryVectorBackend`] for the reference midpoint rule.
    fn update_vectors(&mut self, pair: [TokenId; 2], delta: f32) -> Result<(), CullError>;
}

/// Fraction of the distance toward the pair midpoint moved per unit of delta.
const PAIR_PULL: f32 = 0.2;

/// In-memory reference provider.
///
/// Vectors start uniform in [-1, 1). `update_vectors` moves each of the two
/// vectors `PAIR_PULL * delta` of the way toward their elementwise midpoint:
/// a symmetric attraction for positive delta, a symmetric repulsion for
/// negative delta.
#[derive(Debug, Clone)]
pub struct MemoryVectorBackend {
    vectors: HashMap<TokenId, Vec<f32>>,
}

impl MemoryVectorBackend {
    pub fn new(token_ids: &[TokenId], dim: usize, seed: u64) -> Self {
        let mut rng = Prng::new(seed);
        let mut vectors = HashMap::with_capacity(token_ids.len());
        for &tid in token_ids {
            let v: Vec<f32> = (0..dim).map(|_| rng.gen_range_f32(-1.0, 1.0)).collect();
            vectors.insert(tid, v);
        }
        Self { vectors }
    }

    /// Replace (or add) one token's vector. Test and demo convenience.
    pub fn set_vector(&mut self, token: TokenId, vector: Vec<f32>) {
        self.vectors.insert(token, vector);
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl VectorProvider for MemoryVectorBackend {
    fn get_vector(&self, token: TokenId) -> Result<&[f32], CullError> {
        self.vectors
            .get(&token)
            .map(Vec::as_slice)
            .ok_or(CullError::MissingVector(token))
    }

    fn update_vectors(&mut self, pair: [TokenId; 2], delta: f32) -> Result<(), CullError> {
        let [a, b] = pair;
        let va = self
            .vectors
            .get(&a)
            .ok_or(CullError::MissingVector(a))?
            .clone();
        let vb = self.vectors.get(&b).ok_or(CullError::MissingVector(b))?;

        let step = delta * PAIR_PULL;
        let midpoint: Vec<f32> = va.iter().zip(vb.iter()).map(|(x, y)| (x + y) * 0.5).collect();

        let new_a: Vec<f32> = va
            .iter()
            .zip(midpoint.iter())
            .map(|(x, m)| x + step * (m - x))
            .collect();
        let new_b: Vec<f32> = vb
            .iter()
            .zip(midpoint.iter())
            .map(|(y, m)| y + step * (m - y))
            .collect();

        self.vectors.insert(a, new_a);
        self.vectors.insert(b, new_b);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_vector_errors_on_unknown_id() {
        let backend = MemoryVectorBackend::new(&[2, 3], 4, 42);
        assert!(backend.get_vector(2).is_ok());
        assert_eq!(backend.get_vector(9), Err(CullError::MissingVector(9)));
    }

    #[test]
    fn update_moves_both_vectors_toward_midpoint() {
        let mut backend = MemoryVectorBackend::new(&[], 0, 1);
        backend.set_vector(2, vec![0.0, 0.0]);
        backend.set_vector(3, vec![1.0, -1.0]);

        backend.update_vectors([2, 3], 1.0).unwrap();

        // midpoint = (0.5, -0.5); each end moves 0.2 of the way toward it.
        let va = backend.get_vector(2).unwrap();
        let vb = backend.get_vector(3).unwrap();
        assert!((va[0] - 0.1).abs() < 1e-6);
        assert!((va[1] - -0.1).abs() < 1e-6);
        assert!((vb[0] - 0.9).abs() < 1e-6);
        assert!((vb[1] - -0.9).abs() < 1e-6);
    }

    #[test]
    fn negative_delta_pushes_vectors_apart() {
        let mut backend = MemoryVectorBackend::new(&[], 0, 1);
        backend.set_vector(2, vec![0.4]);
        backend.set_vector(3, vec![0.6]);

        backend.update_vectors([2, 3], -1.0).unwrap();

        let va = backend.get_vector(2).unwrap()[0];
        let vb = backend.get_vector(3).unwrap()[0];
        assert!(va < 0.4);
        assert!(vb > 0.6);
    }

    #[test]
    fn update_errors_on_unknown_id_without_touching_the_other() {
        let mut backend = MemoryVectorBackend::new(&[], 0, 1);
        backend.set_vector(2, vec![0.25]);

        assert_eq!(
            backend.update_vectors([2, 9], 1.0),
            Err(CullError::MissingVector(9))
        );
        assert_eq!(backend.get_vector(2).unwrap(), &[0.25]);
    }

    #[test]
    fn seeded_init_is_reproducible() {
        let a = MemoryVectorBackend::new(&[0, 1, 2], 12, 42);
        let b = MemoryVectorBackend::new(&[0, 1, 2], 12, 42);
        for tid in [0, 1, 2] {
            assert_eq!(a.get_vector(tid).unwrap(), b.get_vector(tid).unwrap());
        }
    }
}
