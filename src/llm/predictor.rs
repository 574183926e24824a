// ============================================================
// Layer 5 — Predictor
// ============================================================
// The explicit "templated completion" step:
//
//   (signature, input fields) ──render──▶ prompt
//                                  │
//                       CompletionClient::complete
//                                  │
//   (output fields, raw text) ◀──parse── completion
//
// A Predictor owns its signature and demonstrations and nothing
// else. The client is borrowed per call, so one client can
// serve many predictors and tests can swap in a scripted one.

use anyhow::{Context, Result};

use crate::domain::signature::Signature;
use crate::domain::traits::CompletionClient;
use crate::llm::prompt::{self, FieldMap};

pub struct Predictor {
    signature: Signature,
    demos: Vec<FieldMap>,
}

impl Predictor {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            demos: Vec::new(),
        }
    }

    pub fn with_demos(mut self, demos: Vec<FieldMap>) -> Self {
        self.demos = demos;
        self
    }

    pub fn demo_count(&self) -> usize {
        self.demos.len()
    }

    /// Render the prompt without sending it
    pub fn prompt_for(&self, inputs: &FieldMap) -> String {
        prompt::render(&self.signature, &self.demos, inputs)
    }

    /// Run one query: returns the parsed output fields and the raw completion.
    ///
    /// Parse failures surface as `PredictionError` inside the anyhow error
    /// so callers can tell a malformed answer from a failed request.
    pub fn forward(&self, client: &dyn CompletionClient, inputs: &FieldMap) -> Result<(FieldMap, String)> {
        for field in &self.signature.inputs {
            if !inputs.contains_key(field.name) {
                anyhow::bail!("missing input field `{}`", field.name);
            }
        }

        let prompt = self.prompt_for(inputs);
        let raw = client
            .complete(&prompt)
            .with_context(|| format!("completion request to '{}' failed", client.model_name()))?;

        let outputs = prompt::parse_completion(&self.signature, &raw)?;
        Ok((outputs, raw))
    }
}
