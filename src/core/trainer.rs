//! Training through survival pressure only.
//!
//! No backpropagation through token prediction and no global objective.
//! Each episode generates one sequence, judges it, and (for survivors)
//! issues local pairwise reinforcement to the external vector provider.

use crate::coherence::{survives, DEFAULT_SURVIVAL_THRESHOLD};
use crate::error::CullError;
use crate::prng::Prng;
use crate::provider::VectorProvider;
use crate::sampler::sample_next_token;
use crate::token::{TokenId, BOS, EOS};

/// Reinforcement magnitude applied to each surviving adjacent pair.
pub const DEFAULT_STEP_SIZE: f32 = 0.005;

// Failed episodes, when penalized at all, push apart much more gently
// than survivors pull together.
const FAILURE_WEAKEN_FACTOR: f32 = 0.25;

/// One training run's knobs.
///
/// `weaken_failures` stays off by default: failing episodes are ignored,
/// never penalized. The asymmetry is intentional.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainConfig {
    pub steps: usize,

    // Length bound counting the leading BOS; a forced EOS may make the
    // final sequence one longer.
    pub max_len: usize,

    pub seed: u64,

    pub survival_threshold: f32,
    pub step_size: f32,
    pub weaken_failures: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            steps: 250,
            max_len: 8,
            seed: 7,
            survival_threshold: DEFAULT_SURVIVAL_THRESHOLD,
            step_size: DEFAULT_STEP_SIZE,
            weaken_failures: false,
        }
    }
}

/// Outcome of one episode. Immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeResult {
    pub sequence: Vec<TokenId>,
    pub survived: bool,
    pub coherence: f32,
}

/// Generate one bounded sequence: BOS, then sampled tokens until EOS or the
/// length bound, then a forced EOS if the bound won the race.
///
/// The output always starts with BOS, ends with EOS, and contains no other
/// sentinel occurrences; its length is at most `max_len + 1`.
pub fn generate_sequence(
    vocab: &[TokenId],
    max_len: usize,
    rng: &mut Prng,
) -> Result<Vec<TokenId>, CullError> {
    let mut seq = vec![BOS];
    while seq.len() < max_len {
        let next = sample_next_token(vocab, &seq, rng)?;
        seq.push(next);
        if next == EOS {
            break;
        }
    }
    if seq.last() != Some(&EOS) {
        seq.push(EOS);
    }
    Ok(seq)
}

/// Issue one pairwise update per adjacent pair, left to right.
///
/// The signed magnitude is `+step_size` for survivors, `-step_size *
/// FAILURE_WEAKEN_FACTOR` for failures when `weaken_failures` is set, and
/// otherwise the call is a no-op that never contacts the provider.
pub fn apply_local_updates(
    seq: &[TokenId],
    survived: bool,
    step_size: f32,
    weaken_failures: bool,
    provider: &mut dyn VectorProvider,
) -> Result<(), CullError> {
    let signed = if survived {
        step_size
    } else if weaken_failures {
        -step_size * FAILURE_WEAKEN_FACTOR
    } else {
        return Ok(());
    };

    for pair in seq.windows(2) {
        provider.update_vectors([pair[0], pair[1]], signed)?;
    }
    Ok(())
}

/// Run `cfg.steps` episodes against one provider and one seeded random
/// source, returning the full history in generation order.
///
/// The random stream is consumed sequentially across episodes, so a run is
/// reproducible from `(vocab, cfg, provider state)` alone. Any episode error
/// aborts the whole run; there is no early stopping and no convergence check.
pub fn run_training(
    vocab: &[TokenId],
    cfg: &TrainConfig,
    provider: &mut dyn VectorProvider,
) -> Result<Vec<EpisodeResult>, CullError> {
    let mut rng = Prng::new(cfg.seed);
    let mut history = Vec::with_capacity(cfg.steps);

    for _ in 0..cfg.steps {
        let seq = generate_sequence(vocab, cfg.max_len, &mut rng)?;
        let (ok, score) = survives(&seq, cfg.survival_threshold, provider)?;
        apply_local_updates(&seq, ok, cfg.step_size, cfg.weaken_failures, provider)?;
        history.push(EpisodeResult {
            sequence: seq,
            survived: ok,
            coherence: score,
        });
    }

    Ok(history)
}

/// Read-only summary over an episode history.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    pub episodes: usize,
    pub survivors: usize,
    pub coherence_sum: f32,
}

impl RunStats {
    pub fn from_history(history: &[EpisodeResult]) -> Self {
        let survivors = history.iter().filter(|e| e.survived).count();
        let coherence_sum = history.iter().map(|e| e.coherence).sum();
        Self {
            episodes: history.len(),
            survivors,
            coherence_sum,
        }
    }

    pub fn survival_rate(&self) -> f32 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.survivors as f32 / self.episodes as f32
    }

    pub fn mean_coherence(&self) -> f32 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.coherence_sum / self.episodes as f32
    }
}
