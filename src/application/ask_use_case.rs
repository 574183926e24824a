// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// Answers a single premise/question pair:
//   1. Load demonstrations if a file was given
//   2. Turn a bare hypothesis into a question when needed
//   3. Run the reasoning module once with the injected client

use anyhow::Result;
use std::path::PathBuf;

use crate::data::preprocessor::Preprocessor;
use crate::domain::example::Demonstration;
use crate::domain::prediction::Prediction;
use crate::domain::traits::{CompletionClient, QuestionAnswerer};
use crate::infra::demo_store::DemoStore;
use crate::llm::reasoner::ScopedNliReasoner;

/// What the user asked about the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Already phrased as a question
    Question(String),
    /// A statement to be tested; rendered the same way the loader does
    Hypothesis(String),
}

impl Query {
    pub fn into_question(self) -> String {
        match self {
            Query::Question(q) => q,
            Query::Hypothesis(h) => Preprocessor::new().to_question(&h),
        }
    }
}

pub struct AskUseCase {
    demos: Vec<Demonstration>,
}

impl AskUseCase {
    pub fn new(demos_path: Option<PathBuf>) -> Result<Self> {
        let demos = match demos_path {
            Some(path) => DemoStore::new(path).load()?,
            None => Vec::new(),
        };
        Ok(Self { demos })
    }

    pub fn answer(&self, client: &dyn CompletionClient, context: &str, query: Query) -> Result<Prediction> {
        let question = query.into_question();
        tracing::info!("Asking '{}': {}", client.model_name(), question);

        ScopedNliReasoner::new(client)
            .with_demos(&self.demos)
            .answer(context, &question)
    }
}
