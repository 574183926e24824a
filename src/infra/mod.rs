// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File persistence that several use cases share:
//
//   demo_store.rs — few-shot demonstration sets as versioned JSON.
//                   Written by `compile`, read by `evaluate` and
//                   `ask` via --demos.
//
//   metrics.rs    — appends per-split, per-category accuracy rows
//                   to metrics.csv so runs can be compared.
//
//   run_store.rs  — the output directory of one evaluation run:
//                   resolved config and per-example predictions.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Demonstration set saving and loading
pub mod demo_store;

/// Evaluation metrics CSV logger
pub mod metrics;

/// Run config and prediction files
pub mod run_store;
