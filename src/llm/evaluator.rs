// ============================================================
// Layer 5 — Evaluation Loop
// ============================================================
// Runs a QuestionAnswerer over a slice of examples, one at a
// time, and scores every prediction with exact verdict match.
//
// Per example the outcome is one of:
//   correct   — parsed Yes/No equals the gold verdict
//   wrong     — parsed Yes/No differs
//   invalid   — the completion had no usable Yes/No answer
//   failed    — the request itself failed (network, HTTP status)
//
// Invalid and failed examples count as incorrect; the run goes
// on so one flaky request does not throw away a whole split.

use anyhow::Error;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::example::{Example, Verdict};
use crate::domain::prediction::{Prediction, PredictionError};
use crate::domain::traits::QuestionAnswerer;

/// Exact-match metric: the predicted verdict equals the gold one.
pub fn answers_match(example: &Example, prediction: &Prediction) -> bool {
    example.answer == prediction.answer
}

/// How a single example was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Correct,
    Wrong,
    /// The completion had no usable Yes/No answer
    Invalid,
    /// The request itself failed
    Failed,
}

/// Outcome for a single evaluated example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleOutcome {
    pub category: String,
    pub question: String,
    pub expected: Verdict,
    pub predicted: Option<Verdict>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Totals for one category (or the whole split).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub total: usize,
    pub correct: usize,
    pub invalid: usize,
    pub failed: usize,
}

impl Score {
    /// Fraction correct in [0.0, 1.0]; 0.0 for an empty set
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Correct => self.correct += 1,
            Status::Wrong => {}
            Status::Invalid => self.invalid += 1,
            Status::Failed => self.failed += 1,
        }
    }
}

/// Result of evaluating one split.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub overall: Score,

    /// Keyed by category name, so iteration is alphabetical
    pub categories: BTreeMap<String, Score>,

    pub outcomes: Vec<ExampleOutcome>,
}

impl EvaluationReport {
    pub fn accuracy(&self) -> f64 {
        self.overall.accuracy()
    }

    fn push(&mut self, outcome: ExampleOutcome) {
        self.overall.record(outcome.status);
        self.categories
            .entry(outcome.category.clone())
            .or_default()
            .record(outcome.status);
        self.outcomes.push(outcome);
    }
}

pub struct Evaluator {
    limit: Option<usize>,
    show_progress: bool,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            limit: None,
            show_progress: true,
        }
    }

    /// Only evaluate the first `limit` examples
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn evaluate(&self, answerer: &dyn QuestionAnswerer, examples: &[Example]) -> EvaluationReport {
        let n = self.limit.map_or(examples.len(), |l| l.min(examples.len()));
        let examples = &examples[..n];

        let pb = self.progress_bar(n as u64);
        let mut report = EvaluationReport::default();

        for example in examples {
            let outcome = match answerer.answer(&example.context, &example.question) {
                Ok(pred) => ExampleOutcome {
                    category: example.category.clone(),
                    question: example.question.clone(),
                    expected: example.answer,
                    predicted: Some(pred.answer),
                    status: if answers_match(example, &pred) {
                        Status::Correct
                    } else {
                        Status::Wrong
                    },
                    error: None,
                },
                Err(err) => {
                    let status = classify(&err);
                    pb.suspend(|| {
                        tracing::warn!("Scoring '{}' as {:?}: {:#}", example.question, status, err)
                    });
                    ExampleOutcome {
                        category: example.category.clone(),
                        question: example.question.clone(),
                        expected: example.answer,
                        predicted: None,
                        status,
                        error: Some(format!("{err:#}")),
                    }
                }
            };

            report.push(outcome);
            pb.set_message(format!("{:.1}%", report.accuracy() * 100.0));
            pb.inc(1);
        }
        pb.finish_and_clear();

        tracing::info!(
            "Evaluated {} examples: {}/{} correct ({:.1}%), {} invalid, {} failed",
            report.overall.total,
            report.overall.correct,
            report.overall.total,
            report.accuracy() * 100.0,
            report.overall.invalid,
            report.overall.failed,
        );
        report
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) =
            ProgressStyle::with_template("{msg:>6} {wide_bar:.cyan/blue} {pos:>4}/{len:4} [{elapsed_precise}]")
        {
            pb.set_style(style);
        }
        pb
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Tell a malformed answer apart from a failed request
fn classify(err: &Error) -> Status {
    if err.downcast_ref::<PredictionError>().is_some() {
        Status::Invalid
    } else {
        Status::Failed
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::ScriptedClient;
    use crate::llm::reasoner::ScopedNliReasoner;

    fn example(category: &str, answer: Verdict) -> Example {
        Example::new("premise", "Can we logically conclude for sure that x?", answer, category)
    }

    #[test]
    fn test_metric() {
        let ex = example("one_scoped", Verdict::Yes);
        let pred = Prediction {
            reasoning: String::new(),
            answer: Verdict::Yes,
            raw: String::new(),
        };
        assert!(answers_match(&ex, &pred));
        assert!(!answers_match(&example("one_scoped", Verdict::No), &pred));
    }

    #[test]
    fn test_accuracy_and_categories() {
        let client = ScriptedClient::new([
            "r\nAnswer: Yes", // one_scoped Yes   → correct
            "r\nAnswer: Yes", // one_scoped No    → wrong
            "r\nAnswer: No",  // two_scoped No    → correct
            "r\nAnswer: ???", // two_scoped Yes   → invalid
        ])
        .then_fail("connection refused"); // two_scoped No → failed

        let examples = vec![
            example("one_scoped", Verdict::Yes),
            example("one_scoped", Verdict::No),
            example("two_scoped", Verdict::No),
            example("two_scoped", Verdict::Yes),
            example("two_scoped", Verdict::No),
        ];

        let reasoner = ScopedNliReasoner::new(&client);
        let report = Evaluator::new().with_progress(false).evaluate(&reasoner, &examples);

        assert_eq!(report.overall.total, 5);
        assert_eq!(report.overall.correct, 2);
        assert_eq!(report.overall.invalid, 1);
        assert_eq!(report.overall.failed, 1);
        assert!((report.accuracy() - 0.4).abs() < 1e-9);

        let names: Vec<_> = report.categories.keys().cloned().collect();
        assert_eq!(names, ["one_scoped", "two_scoped"]);
        assert_eq!(report.categories["one_scoped"].correct, 1);
        assert_eq!(report.categories["two_scoped"].total, 3);
        assert!((report.categories["one_scoped"].accuracy() - 0.5).abs() < 1e-9);

        assert_eq!(report.outcomes[0].status, Status::Correct);
        assert_eq!(report.outcomes[1].status, Status::Wrong);
        assert_eq!(report.outcomes[3].status, Status::Invalid);
        assert_eq!(report.outcomes[3].predicted, None);
        assert_eq!(report.outcomes[4].status, Status::Failed);
        assert!(report.outcomes[4].error.as_deref().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_failures_while_progress_bar_is_drawn() {
        let client = ScriptedClient::new(Vec::<&str>::new())
            .then_fail("timed out")
            .then_fail("connection refused");
        let examples = vec![example("a", Verdict::Yes), example("a", Verdict::No)];

        let reasoner = ScopedNliReasoner::new(&client);
        let report = Evaluator::new().with_progress(true).evaluate(&reasoner, &examples);
        assert_eq!(report.overall.total, 2);
        assert_eq!(report.overall.failed, 2);
        assert_eq!(client.prompts().len(), 2);
    }

    #[test]
    fn test_limit() {
        let client = ScriptedClient::new(["r\nAnswer: No"]);
        let examples = vec![example("a", Verdict::No), example("a", Verdict::No)];

        let reasoner = ScopedNliReasoner::new(&client);
        let report = Evaluator::new()
            .with_limit(Some(1))
            .with_progress(false)
            .evaluate(&reasoner, &examples);
        assert_eq!(report.overall.total, 1);
        assert_eq!(client.prompts().len(), 1);
    }

    #[test]
    fn test_empty_split() {
        let client = ScriptedClient::new(Vec::<&str>::new());
        let reasoner = ScopedNliReasoner::new(&client);
        let report = Evaluator::new().with_progress(false).evaluate(&reasoner, &[]);
        assert_eq!(report.overall.total, 0);
        assert_eq!(report.accuracy(), 0.0);
    }
}
