// ============================================================
// Layer 3 — Prediction
// ============================================================
// What the reasoning module hands back for one query, and the
// ways turning raw model text into that shape can fail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::example::Verdict;

/// A validated model answer with its chain of thought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub reasoning: String,
    pub answer: Verdict,

    /// The completion exactly as the model returned it
    pub raw: String,
}

/// Failures between receiving a completion and producing a Prediction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    #[error("model returned an empty completion")]
    EmptyCompletion,

    #[error("completion has no `{0}` field")]
    MissingField(String),

    #[error("answer must be Yes or No, got {0:?}")]
    InvalidAnswer(String),
}
