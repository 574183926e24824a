// ============================================================
// Layer 5 — Scoped NLI Reasoner
// ============================================================
// The prompted reasoning module: one chain-of-thought prompt
// answering "does the question follow from the context?".
//
//   answer(context, question)
//       → Predictor::forward      (reasoning + answer text)
//       → Verdict::from_str       (enforce Yes / No)
//       → Prediction
//
// No retries and no state between calls; a malformed answer is
// returned as PredictionError::InvalidAnswer and the evaluator
// decides what that is worth.

use anyhow::Result;

use crate::domain::example::{Demonstration, Verdict};
use crate::domain::prediction::{Prediction, PredictionError};
use crate::domain::signature::Signature;
use crate::domain::traits::{CompletionClient, QuestionAnswerer};
use crate::llm::predictor::Predictor;
use crate::llm::prompt::FieldMap;

pub struct ScopedNliReasoner<'c> {
    client: &'c dyn CompletionClient,
    predictor: Predictor,
}

impl<'c> ScopedNliReasoner<'c> {
    /// Zero-shot reasoner
    pub fn new(client: &'c dyn CompletionClient) -> Self {
        Self {
            client,
            predictor: Predictor::new(Signature::scone_chain_of_thought()),
        }
    }

    /// Prime the prompt with worked examples
    pub fn with_demos(mut self, demos: &[Demonstration]) -> Self {
        self.predictor = self
            .predictor
            .with_demos(demos.iter().map(demo_fields).collect());
        self
    }

    pub fn demo_count(&self) -> usize {
        self.predictor.demo_count()
    }

    /// The exact prompt `answer` would send
    pub fn prompt_for(&self, context: &str, question: &str) -> String {
        self.predictor.prompt_for(&query_fields(context, question))
    }
}

impl QuestionAnswerer for ScopedNliReasoner<'_> {
    fn answer(&self, context: &str, question: &str) -> Result<Prediction> {
        let (fields, raw) = self
            .predictor
            .forward(self.client, &query_fields(context, question))?;

        let answer_text = fields
            .get("answer")
            .ok_or_else(|| PredictionError::MissingField("answer".into()))?;
        let answer: Verdict = answer_text.parse()?;

        tracing::debug!("Predicted {} for '{}'", answer, question);

        Ok(Prediction {
            reasoning: fields.get("reasoning").cloned().unwrap_or_default(),
            answer,
            raw,
        })
    }
}

fn query_fields(context: &str, question: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("context".into(), context.to_string());
    fields.insert("question".into(), question.to_string());
    fields
}

fn demo_fields(demo: &Demonstration) -> FieldMap {
    let mut fields = query_fields(&demo.context, &demo.question);
    if let Some(reasoning) = &demo.reasoning {
        fields.insert("reasoning".into(), reasoning.clone());
    }
    fields.insert("answer".into(), demo.answer.to_string());
    fields
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::ScriptedClient;

    #[test]
    fn test_answer_parses_yes() {
        let client = ScriptedClient::new(["produce the answer. The premise says so.\nAnswer: Yes"]);
        let reasoner = ScopedNliReasoner::new(&client);

        let pred = reasoner.answer("No dog barked.", "Can we ...?").unwrap();
        assert_eq!(pred.answer, Verdict::Yes);
        assert_eq!(pred.reasoning, "produce the answer. The premise says so.");
        assert!(pred.raw.ends_with("Answer: Yes"));
    }

    #[test]
    fn test_lowercase_answer_with_period() {
        let client = ScriptedClient::new(["see that no dog barked.\nAnswer: yes."]);
        let reasoner = ScopedNliReasoner::new(&client);

        let pred = reasoner.answer("No dog barked.", "Can we ...?").unwrap();
        assert_eq!(pred.answer, Verdict::Yes);
    }

    #[test]
    fn test_answer_marker_must_start_a_line() {
        let client = ScriptedClient::new(["so it is clear. Answer: yes."]);
        let reasoner = ScopedNliReasoner::new(&client);

        let err = reasoner.answer("p", "q").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PredictionError>(),
            Some(PredictionError::MissingField(f)) if f == "answer"
        ));
    }

    #[test]
    fn test_prompt_reaches_client() {
        let client = ScriptedClient::new(["x\nAnswer: No"]);
        let reasoner = ScopedNliReasoner::new(&client);
        reasoner.answer("PREMISE TEXT", "QUESTION TEXT").unwrap();

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Context: PREMISE TEXT"));
        assert!(prompts[0].contains("Question: QUESTION TEXT"));
    }

    #[test]
    fn test_invalid_answer_is_typed_error() {
        let client = ScriptedClient::new(["hmm\nAnswer: It depends"]);
        let reasoner = ScopedNliReasoner::new(&client);

        let err = reasoner.answer("p", "q").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PredictionError>(),
            Some(PredictionError::InvalidAnswer(_))
        ));
    }

    #[test]
    fn test_demos_are_rendered() {
        let client = ScriptedClient::new(["x\nAnswer: No"]);
        let demo = Demonstration {
            context: "DEMO PREMISE".into(),
            question: "DEMO QUESTION".into(),
            answer: Verdict::Yes,
            reasoning: Some("see the premise.".into()),
        };
        let reasoner = ScopedNliReasoner::new(&client).with_demos(&[demo]);
        assert_eq!(reasoner.demo_count(), 1);

        let prompt = reasoner.prompt_for("p", "q");
        assert!(prompt.contains("Context: DEMO PREMISE"));
        assert!(prompt.contains("Reasoning: Let's think step by step in order to see the premise."));
        assert!(prompt.contains("Answer: Yes"));
    }
}
