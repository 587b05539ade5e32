#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/token.rs"]
pub mod token;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/provider.rs"]
pub mod provider;

#[path = "core/sampler.rs"]
pub mod sampler;

#[path = "core/coherence.rs"]
pub mod coherence;

#[path = "core/trainer.rs"]
pub mod trainer;
