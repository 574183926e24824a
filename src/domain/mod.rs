// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums, and traits describing the
// inference task itself: labelled examples, the per-category
// column schema, the prompt signature, and model predictions.
//
// Rules for this layer:
//   - NO HTTP or model client code
//   - NO file I/O
//   - Only plain Rust types and the traits other layers implement
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A labelled premise/question pair and its Yes/No verdict
pub mod example;

// Which CSV columns each dataset category reads from
pub mod schema;

// Instruction + declared input/output fields for one prompt
pub mod signature;

// Parsed model output and the errors parsing can produce
pub mod prediction;

// Core abstractions (traits) that other layers implement
pub mod traits;
