// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits, never
// against concrete loaders or HTTP clients. A test can hand the
// reasoning module a scripted CompletionClient and the whole
// evaluation pipeline runs without a network.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Trait Objects)

use anyhow::Result;

use crate::domain::example::Example;
use crate::domain::prediction::Prediction;

// ─── ExampleSource ────────────────────────────────────────────────────────────
/// Any component that can produce labelled examples.
///
/// Implementations:
///   - CsvExampleLoader → a directory of per-category CSV files
pub trait ExampleSource {
    /// Load every available example. Malformed input is an error,
    /// never a silent skip.
    fn load_all(&self) -> Result<Vec<Example>>;
}

// ─── CompletionClient ─────────────────────────────────────────────────────────
/// A text-completion endpoint.
///
/// The client is passed explicitly to whatever needs it; there is
/// no process-wide default model.
///
/// Implementations:
///   - OpenAiCompatClient → any OpenAI-style /chat/completions server
pub trait CompletionClient {
    /// Send one rendered prompt and return the raw completion text.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Identifier of the model behind this client, for logs and reports
    fn model_name(&self) -> &str;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Anything that can decide whether a question follows from a context.
///
/// Implementations:
///   - ScopedNliReasoner → single chain-of-thought prompt
pub trait QuestionAnswerer {
    fn answer(&self, context: &str, question: &str) -> Result<Prediction>;
}
