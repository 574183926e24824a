// ============================================================
// Layer 3 — Example Domain Types
// ============================================================
// One labelled row of the benchmark after loading:
//
//   context  — the premise sentence
//   question — the hypothesis rewritten as a yes/no question
//   answer   — the gold verdict (Yes / No)
//   category — which source file the row came from
//
// Only `context` and `question` are ever shown to the model.
// `answer` is used by the evaluation metric and when an example
// is turned into a few-shot demonstration.
//
// Reference: Rust Book §5 (Structs), §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::domain::prediction::PredictionError;

/// Label value that maps to a "Yes" verdict. Everything else is "No".
pub const ENTAILMENT_LABEL: &str = "entailment";

/// The binary answer to "can we conclude the hypothesis from the premise?".
///
/// Serialises as the literal strings "Yes" and "No" so demonstration
/// files and prompts use the same spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Yes,
    No,
}

impl Verdict {
    /// Map a raw gold-label cell to a verdict.
    /// Only the exact string "entailment" counts as Yes.
    pub fn from_gold_label(label: &str) -> Self {
        if label == ENTAILMENT_LABEL {
            Verdict::Yes
        } else {
            Verdict::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Yes => "Yes",
            Verdict::No => "No",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse model output into a verdict.
///
/// Only the first line counts. Surrounding whitespace, quotes, markdown
/// emphasis and trailing punctuation are ignored, and matching is
/// case-insensitive, so "**Yes.**" and "no" are accepted while
/// "Maybe" or "Yes and no" are rejected.
impl FromStr for Verdict {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first_line = s.lines().next().unwrap_or("");
        let cleaned = first_line
            .trim()
            .trim_matches(|c: char| matches!(c, '*' | '"' | '\'' | '`' | '.' | '!' | ','))
            .trim();

        if cleaned.eq_ignore_ascii_case("yes") {
            Ok(Verdict::Yes)
        } else if cleaned.eq_ignore_ascii_case("no") {
            Ok(Verdict::No)
        } else {
            Err(PredictionError::InvalidAnswer(s.trim().to_string()))
        }
    }
}

/// A labelled benchmark example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// The premise sentence
    pub context: String,

    /// The hypothesis phrased as "Can we logically conclude for sure that ...?"
    pub question: String,

    /// Gold verdict, used only for scoring
    pub answer: Verdict,

    /// Base name of the file this row was read from (e.g. "two_scoped")
    pub category: String,
}

impl Example {
    pub fn new(
        context: impl Into<String>,
        question: impl Into<String>,
        answer: Verdict,
        category: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            question: question.into(),
            answer,
            category: category.into(),
        }
    }
}

/// A worked example rendered into the prompt ahead of the real query.
///
/// Labelled demonstrations carry no reasoning; demonstrations saved from
/// an earlier run may include the model's chain of thought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demonstration {
    pub context: String,
    pub question: String,
    pub answer: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl From<&Example> for Demonstration {
    fn from(ex: &Example) -> Self {
        Self {
            context: ex.context.clone(),
            question: ex.question.clone(),
            answer: ex.answer,
            reasoning: None,
        }
    }
}
