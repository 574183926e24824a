// ============================================================
// Layer 4 — CSV Example Loader
// ============================================================
// Loads the benchmark from a directory of CSV files, one file
// per category:
//
//   scone_nli/train/
//     one_scoped.csv
//     one_not_scoped.csv
//     two_scoped.csv
//     ...
//
// For every file:
//   1. category  = file name without ".csv"
//   2. schema    = SchemaRegistry::resolve(category)
//   3. the header must contain all three schema columns,
//      otherwise the whole load fails
//   4. every row becomes one Example:
//        context  ← premise column, verbatim
//        question ← hypothesis column, rendered as a question
//        answer   ← Yes iff label column == "entailment"
//
// Nothing is skipped silently. A ragged row, an empty premise
// or hypothesis, or a missing column aborts the load with the
// file and line that caused it; a quietly shrunken dataset
// would make every accuracy number downstream meaningless.
//
// Files are visited in sorted path order so two loads of the
// same directory always produce the same sequence.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::Result;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::data::preprocessor::Preprocessor;
use crate::domain::example::{Example, Verdict};
use crate::domain::schema::{FieldSchema, SchemaRegistry};
use crate::domain::traits::ExampleSource;

/// Everything that can go wrong while loading a dataset directory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read dataset directory '{}'", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in '{}'", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("'{}' (category {category}) has no `{column}` column", path.display())]
    MissingColumn {
        path: PathBuf,
        category: String,
        column: &'static str,
    },

    #[error("'{}' line {line}: `{column}` is empty", path.display())]
    EmptyField {
        path: PathBuf,
        line: u64,
        column: &'static str,
    },
}

/// Loads every `.csv` file in a directory.
/// Implements the ExampleSource trait from Layer 3.
pub struct CsvExampleLoader {
    dir: PathBuf,
    schemas: SchemaRegistry,
    preprocessor: Preprocessor,
}

impl CsvExampleLoader {
    /// Loader using the published ScoNe column layout
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            schemas: SchemaRegistry::default(),
            preprocessor: Preprocessor::new(),
        }
    }

    #[cfg(test)]
    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    /// All `.csv` paths in the directory, sorted
    fn csv_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        let read_err = |source| LoadError::ReadDir {
            dir: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("csv") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Example>, LoadError> {
        let category = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let schema = self.schemas.resolve(&category);

        let csv_err = |source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(path)
            .map_err(csv_err)?;

        let columns = ColumnIndex::resolve(reader.headers().map_err(csv_err)?, schema)
            .map_err(|column| LoadError::MissingColumn {
                path: path.to_path_buf(),
                category: category.clone(),
                column,
            })?;

        let mut examples = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let premise = required_cell(&record, columns.premise)
                .ok_or_else(|| LoadError::EmptyField {
                    path: path.to_path_buf(),
                    line,
                    column: schema.premise_column(),
                })?;
            let hypothesis = required_cell(&record, columns.hypothesis)
                .ok_or_else(|| LoadError::EmptyField {
                    path: path.to_path_buf(),
                    line,
                    column: schema.hypothesis_column(),
                })?;
            // An empty label is allowed and simply maps to "No"
            let label = record.get(columns.label).unwrap_or("");

            examples.push(Example::new(
                premise,
                self.preprocessor.to_question(hypothesis),
                Verdict::from_gold_label(label),
                category.clone(),
            ));
        }

        Ok(examples)
    }
}

/// Implement the ExampleSource trait so the application layer
/// can call load_all() without knowing about CSV internals
impl ExampleSource for CsvExampleLoader {
    fn load_all(&self) -> Result<Vec<Example>> {
        let mut examples = Vec::new();

        for path in self.csv_files()? {
            let loaded = self.load_file(&path)?;
            tracing::debug!("Loaded: {} ({} examples)", path.display(), loaded.len());
            examples.extend(loaded);
        }

        tracing::info!(
            "Loaded {} examples from '{}'",
            examples.len(),
            self.dir.display()
        );
        Ok(examples)
    }
}

/// A cell that must hold text; `None` when blank or absent
fn required_cell(record: &csv::StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|v| !v.trim().is_empty())
}

/// Header positions of the three columns a schema needs
struct ColumnIndex {
    premise: usize,
    hypothesis: usize,
    label: usize,
}

impl ColumnIndex {
    /// Returns the first missing column name on failure
    fn resolve(headers: &csv::StringRecord, schema: FieldSchema) -> Result<Self, &'static str> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(name)
        };

        Ok(Self {
            premise: find(schema.premise_column())?,
            hypothesis: find(schema.hypothesis_column())?,
            label: find(schema.label_column())?,
        })
    }
}
