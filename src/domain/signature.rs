// ============================================================
// Layer 3 — Prompt Signature
// ============================================================
// A signature declares WHAT a prompt asks for, without saying
// how it is rendered or sent:
//
//   instruction — the task description at the top of the prompt
//   inputs      — fields the caller fills in (context, question)
//   outputs     — fields the model must produce (reasoning, answer)
//
// Rendering and parsing live in the llm layer (llm/prompt.rs);
// this type is only the declaration both sides agree on.

/// One named field of a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key used in field maps, e.g. "answer"
    pub name: &'static str,

    /// Line label shown in the prompt, e.g. "Answer"
    pub label: &'static str,

    /// Text placed right after the label in the prompt, before the
    /// model's continuation (empty for most fields)
    pub lead: &'static str,

    /// Placeholder shown in the format description
    pub description: &'static str,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, description: &'static str) -> Self {
        Self {
            name,
            label,
            lead: "",
            description,
        }
    }

    pub fn with_lead(mut self, lead: &'static str) -> Self {
        self.lead = lead;
        self
    }

    /// "Label:" — what a line holding this field starts with
    pub fn marker(&self) -> String {
        format!("{}:", self.label)
    }

    /// "Label:" followed by the lead text, if any
    pub fn prefix(&self) -> String {
        if self.lead.is_empty() {
            self.marker()
        } else {
            format!("{} {}", self.marker(), self.lead)
        }
    }
}

/// Instruction plus declared input and output fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub instruction: &'static str,
    pub inputs: Vec<FieldSpec>,
    pub outputs: Vec<FieldSpec>,
}

pub const SCONE_INSTRUCTION: &str = "You are given some context (a premise) and a question \
(a hypothesis). You must indicate with Yes/No answer whether we can logically conclude \
the hypothesis from the premise.";

impl Signature {
    /// context, question -> reasoning, answer
    ///
    /// The reasoning field comes first so the model writes its chain
    /// of thought before committing to an answer.
    pub fn scone_chain_of_thought() -> Self {
        Self {
            instruction: SCONE_INSTRUCTION,
            inputs: vec![
                FieldSpec::new("context", "Context", "${context}"),
                FieldSpec::new("question", "Question", "${question}"),
            ],
            outputs: vec![
                FieldSpec::new("reasoning", "Reasoning", "${produce the answer}. We ...")
                    .with_lead("Let's think step by step in order to"),
                FieldSpec::new("answer", "Answer", "Yes or No"),
            ],
        }
    }

    pub fn output(&self, name: &str) -> Option<&FieldSpec> {
        self.outputs.iter().find(|f| f.name == name)
    }

    /// Inputs followed by outputs, in prompt order
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_includes_lead() {
        let sig = Signature::scone_chain_of_thought();
        let reasoning = sig.output("reasoning").unwrap();
        assert_eq!(reasoning.marker(), "Reasoning:");
        assert_eq!(
            reasoning.prefix(),
            "Reasoning: Let's think step by step in order to"
        );
        assert_eq!(sig.output("answer").unwrap().prefix(), "Answer:");
    }

    #[test]
    fn test_field_order() {
        let sig = Signature::scone_chain_of_thought();
        let names: Vec<_> = sig.fields().map(|f| f.name).collect();
        assert_eq!(names, ["context", "question", "reasoning", "answer"]);
    }
}
