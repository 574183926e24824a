// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Normalises raw CSV cells and rewrites hypotheses as questions.
//
// Cleaning (applied to premise and hypothesis cells):
//   1. Tabs, non-breaking spaces, zero-width spaces and other
//      control characters become plain spaces
//   2. Runs of spaces collapse into one
//   3. Leading/trailing whitespace is trimmed
//
// Question rendering (hypothesis → question):
//   "There is not a single dog."
//       → strip surrounding '.'
//       → lower-case the first character
//       → "Can we logically conclude for sure that there is not a single dog?"
//
// The hypothesis becomes an embedded clause, which is why its
// capital letter and final full stop have to go.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

/// Text placed in front of every hypothesis clause
pub const QUESTION_STEM: &str = "Can we logically conclude for sure that";

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean one raw cell. Takes a &str and returns an owned String.
    pub fn clean(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last_space = true; // swallow leading spaces

        for c in text.chars() {
            let c = match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_whitespace() || c.is_control() => ' ',
                c => c,
            };

            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        // At most one trailing space can survive the loop
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }

    /// Rewrite a hypothesis sentence as a yes/no question.
    pub fn to_question(&self, hypothesis: &str) -> String {
        let cleaned = self.clean(hypothesis);
        let clause = cleaned.trim_matches('.').trim();

        // Lower-case only the first character; proper nouns later in the
        // sentence are left alone.
        let mut chars = clause.chars();
        let clause: String = match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        };

        format!("{QUESTION_STEM} {clause}?")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
