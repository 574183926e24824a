// ============================================================
// Layer 5 — Prompt Rendering and Completion Parsing
// ============================================================
// Turns a Signature plus field values into prompt text, and a
// completion back into output field values.
//
// Rendered prompt (blocks separated by "---"):
//
//   <instruction>
//   ---
//   Follow the following format.
//
//   Context: ${context}
//   Question: ${question}
//   Reasoning: Let's think step by step in order to ${produce the answer}. We ...
//   Answer: Yes or No
//   ---
//   <one block per demonstration, with whichever fields it has>
//   ---
//   Context: <query context>
//   Question: <query question>
//   Reasoning: Let's think step by step in order to      ← model continues here
//
// Parsing reads the continuation:
//   - text up to the next output marker belongs to the first
//     output field (the prompt already printed its prefix)
//   - "Answer:" at the start of a line opens the next field
//   - an input marker ("Context:", "Question:") or a "---" line
//     means the model started inventing another example; stop

use indexmap::IndexMap;

use crate::domain::prediction::PredictionError;
use crate::domain::signature::{FieldSpec, Signature};

/// Field name → value, in signature order
pub type FieldMap = IndexMap<String, String>;

const BLOCK_SEPARATOR: &str = "\n\n---\n\n";
const FIELD_SEPARATOR: &str = "\n\n";

/// Build the full prompt for one query.
pub fn render(signature: &Signature, demos: &[FieldMap], inputs: &FieldMap) -> String {
    let mut blocks = Vec::with_capacity(demos.len() + 3);
    blocks.push(signature.instruction.to_string());
    blocks.push(render_format(signature));

    for demo in demos {
        blocks.push(render_filled(signature.fields(), demo));
    }

    let mut query = render_filled(signature.inputs.iter(), inputs);
    if let Some(first) = signature.outputs.first() {
        if !query.is_empty() {
            query.push_str(FIELD_SEPARATOR);
        }
        query.push_str(&first.prefix());
    }
    blocks.push(query);

    blocks.join(BLOCK_SEPARATOR)
}

/// "Follow the following format." plus one placeholder line per field
fn render_format(signature: &Signature) -> String {
    let mut lines = vec!["Follow the following format.".to_string()];
    lines.extend(
        signature
            .fields()
            .map(|f| format!("{} {}", f.prefix(), f.description)),
    );
    lines.join(FIELD_SEPARATOR)
}

/// One line per field present in `values`; absent fields are left out
fn render_filled<'a>(fields: impl Iterator<Item = &'a FieldSpec>, values: &FieldMap) -> String {
    fields
        .filter_map(|f| {
            values
                .get(f.name)
                .map(|v| format!("{} {}", f.prefix(), v.trim()))
        })
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// Split a completion into the signature's output fields.
pub fn parse_completion(signature: &Signature, completion: &str) -> Result<FieldMap, PredictionError> {
    let outputs = &signature.outputs;
    let Some(first) = outputs.first() else {
        return Ok(FieldMap::new());
    };

    let mut text = completion.trim_start();
    if text.trim().is_empty() {
        return Err(PredictionError::EmptyCompletion);
    }

    // Some models echo the open prefix before continuing
    let prefix = first.prefix();
    let marker = first.marker();
    if let Some(rest) = text.strip_prefix(prefix.as_str()) {
        text = rest;
    } else if let Some(rest) = text.strip_prefix(marker.as_str()) {
        text = rest;
    }

    let input_markers: Vec<String> = signature.inputs.iter().map(|f| f.marker()).collect();

    let mut buffers: Vec<Option<String>> = vec![None; outputs.len()];
    buffers[0] = Some(String::new());
    let mut current = 0usize;

    'lines: for line in text.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("---") || input_markers.iter().any(|m| trimmed.starts_with(m.as_str())) {
            break;
        }

        // Markers only move forward: a later field can open, an earlier one cannot
        for (idx, field) in outputs.iter().enumerate().skip(current + 1) {
            if let Some(rest) = trimmed.strip_prefix(field.marker().as_str()) {
                current = idx;
                buffers[idx] = Some(rest.trim_start().to_string());
                continue 'lines;
            }
        }

        if let Some(buf) = buffers[current].as_mut() {
            if !buf.is_empty() {
                buf.push('\n');
            }
            buf.push_str(line);
        }
    }

    let mut fields = FieldMap::new();
    for (field, buf) in outputs.iter().zip(buffers) {
        match buf {
            Some(value) => {
                fields.insert(field.name.to_string(), value.trim().to_string());
            }
            None => return Err(PredictionError::MissingField(field.name.to_string())),
        }
    }
    Ok(fields)
}
