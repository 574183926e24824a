// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the CSV files on disk and the Vec<Example>
// partitions the evaluator consumes:
//
//   *.csv files (one per category)
//       │
//       ▼
//   CsvExampleLoader  → validates headers, reads rows
//       │
//       ▼
//   Preprocessor      → cleans cells, hypothesis → question
//       │
//       ▼
//   Vec<Example>
//       │
//       ▼
//   splitter          → seeded shuffle, train/dev cut
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads category CSV files from a directory
pub mod loader;

/// Cleans cells and renders hypotheses as questions
pub mod preprocessor;

/// Seeded shuffle and train/dev split
pub mod splitter;
