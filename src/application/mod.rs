// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// user-facing goal each.
//
// Rules for this layer:
//   - No prompt text or HTTP code here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - Model clients arrive as parameters, never as globals
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Score the module on dev and/or test
pub mod evaluate_use_case;

// Answer one premise/question pair
pub mod ask_use_case;

// Build and save a labelled demonstration set
pub mod compile_use_case;

// Count examples per category
pub mod stats_use_case;
