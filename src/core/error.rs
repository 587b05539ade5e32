use crate::token::TokenId;

/// Errors surfaced by sampling, scoring, and reinforcement.
///
/// None of these are retried internally; every error aborts the current
/// episode or call and is handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CullError {
    #[error("vocabulary cannot be empty")]
    EmptyVocabulary,

    #[error("filtering removed all candidate tokens")]
    ExhaustedCandidates,

    #[error("no vector stored for token id {0}")]
    MissingVector(TokenId),
}
