// ============================================================
// Layer 3 — Per-Category Column Schema
// ============================================================
// The benchmark ships one CSV file per category. All of them
// store the edited premise/hypothesis/label under `*_edited`
// column names, except `one_scoped`, which comes from an older
// dataset and uses the plain names.
//
//   category        premise            hypothesis         label
//   one_scoped      sentence1          sentence2          gold_label
//   everything else sentence1_edited   sentence2_edited   gold_label_edited
//
// Instead of string-matching the category inside the loader,
// the mapping lives in a SchemaRegistry that the loader asks
// for each file. The loader then checks the file header against
// the resolved schema before reading any rows.
//
// Reference: Rust Book §6 (Enums), §8 (Hash Maps)

use std::collections::HashMap;

/// Which family of column names a category uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSchema {
    /// `sentence1`, `sentence2`, `gold_label`
    Plain,
    /// `sentence1_edited`, `sentence2_edited`, `gold_label_edited`
    Edited,
}

impl FieldSchema {
    pub fn premise_column(&self) -> &'static str {
        match self {
            FieldSchema::Plain => "sentence1",
            FieldSchema::Edited => "sentence1_edited",
        }
    }

    pub fn hypothesis_column(&self) -> &'static str {
        match self {
            FieldSchema::Plain => "sentence2",
            FieldSchema::Edited => "sentence2_edited",
        }
    }

    pub fn label_column(&self) -> &'static str {
        match self {
            FieldSchema::Plain => "gold_label",
            FieldSchema::Edited => "gold_label_edited",
        }
    }

    /// All columns a file with this schema must contain
    pub fn required_columns(&self) -> [&'static str; 3] {
        [
            self.premise_column(),
            self.hypothesis_column(),
            self.label_column(),
        ]
    }
}

/// Maps category names to their column schema.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    overrides: HashMap<String, FieldSchema>,
    fallback: FieldSchema,
}

impl SchemaRegistry {
    /// An empty registry where every category resolves to `fallback`
    pub fn with_fallback(fallback: FieldSchema) -> Self {
        Self {
            overrides: HashMap::new(),
            fallback,
        }
    }

    /// Register an explicit schema for one category
    pub fn with_category(mut self, category: impl Into<String>, schema: FieldSchema) -> Self {
        self.overrides.insert(category.into(), schema);
        self
    }

    pub fn resolve(&self, category: &str) -> FieldSchema {
        self.overrides
            .get(category)
            .copied()
            .unwrap_or(self.fallback)
    }
}

/// The layout of the published ScoNe NLI files
impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::with_fallback(FieldSchema::Edited).with_category("one_scoped", FieldSchema::Plain)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_matches_published_layout() {
        let reg = SchemaRegistry::default();
        assert_eq!(reg.resolve("one_scoped"), FieldSchema::Plain);
        for cat in [
            "one_not_scoped",
            "two_scoped",
            "two_not_scoped",
            "one_scoped_one_not_scoped",
            "one_not_scoped_one_scoped",
        ] {
            assert_eq!(reg.resolve(cat), FieldSchema::Edited, "category {cat}");
        }
    }

    #[test]
    fn test_required_columns() {
        assert_eq!(
            FieldSchema::Plain.required_columns(),
            ["sentence1", "sentence2", "gold_label"]
        );
        assert_eq!(
            FieldSchema::Edited.required_columns(),
            ["sentence1_edited", "sentence2_edited", "gold_label_edited"]
        );
    }

    #[test]
    fn test_override_wins_over_fallback() {
        let reg = SchemaRegistry::with_fallback(FieldSchema::Plain)
            .with_category("custom", FieldSchema::Edited);
        assert_eq!(reg.resolve("custom"), FieldSchema::Edited);
        assert_eq!(reg.resolve("anything"), FieldSchema::Plain);
    }
}
