// ============================================================
// Layer 5 — Language Model Layer
// ============================================================
// All prompt and model-endpoint code lives here. The domain
// layer declares WHAT is asked (Signature, Prediction); this
// layer decides how it is written down, sent, and read back.
//
//   client.rs    — OpenAI-compatible HTTP CompletionClient
//   prompt.rs    — render a signature + fields into prompt text,
//                  parse a completion back into fields
//   predictor.rs — render → complete → parse, one call
//   reasoner.rs  — the chain-of-thought Yes/No module
//   evaluator.rs — score a module over a split of examples

/// HTTP completion client
pub mod client;

/// Prompt text in, field map out
pub mod prompt;

/// Signature-driven single call to the model
pub mod predictor;

/// Premise + question → reasoning + Yes/No
pub mod reasoner;

/// Sequential exact-match evaluation
pub mod evaluator;
