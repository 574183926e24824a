// ============================================================
// Layer 6 — Demonstration Store
// ============================================================
// Saves and restores a few-shot demonstration set as JSON.
//
// File layout:
//   {
//     "version": 1,
//     "demos": [
//       { "context": "...", "question": "...", "answer": "Yes" },
//       { "context": "...", "question": "...", "answer": "No",
//         "reasoning": "..." }
//     ]
//   }
//
// The version field lets a later format change refuse old files
// loudly instead of misreading them.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::domain::example::Demonstration;

pub const DEMO_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct DemoFile {
    version: u32,
    demos: Vec<Demonstration>,
}

/// Reads and writes one demonstration file.
pub struct DemoStore {
    path: PathBuf,
}

impl DemoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the demonstrations, creating parent directories as needed.
    pub fn save(&self, demos: &[Demonstration]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let file = DemoFile {
            version: DEMO_FORMAT_VERSION,
            demos: demos.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write demonstrations to '{}'", self.path.display()))?;

        tracing::info!("Saved {} demonstrations to '{}'", demos.len(), self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<Demonstration>> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "Cannot read demonstrations from '{}'. Run 'compile' first?",
                self.path.display()
            )
        })?;

        let file: DemoFile = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a demonstration file", self.path.display()))?;

        if file.version != DEMO_FORMAT_VERSION {
            anyhow::bail!(
                "'{}' has format version {}, expected {}",
                self.path.display(),
                file.version,
                DEMO_FORMAT_VERSION
            );
        }

        tracing::debug!("Loaded {} demonstrations from '{}'", file.demos.len(), self.path.display());
        Ok(file.demos)
    }
}
