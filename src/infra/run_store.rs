// ============================================================
// Layer 6 — Run Output Directory
// ============================================================
// Everything an evaluation run leaves behind, apart from the
// shared metrics.csv:
//
//   {output_dir}/
//     run_config.json          ← the resolved EvaluateConfig
//     predictions_dev.jsonl    ← one ExampleOutcome per line
//     predictions_test.jsonl
//
// Saving the config next to the predictions means any result
// file can be traced back to its seed, split sizes, model and
// demonstration file.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::llm::evaluator::ExampleOutcome;

pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn save_config<C: Serialize>(&self, cfg: &C) -> Result<()> {
        let path = self.dir.join("run_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(())
    }

    /// Overwrites any earlier predictions for the same split.
    pub fn save_outcomes(&self, split: &str, outcomes: &[ExampleOutcome]) -> Result<PathBuf> {
        let path = self.dir.join(format!("predictions_{split}.jsonl"));
        let file = fs::File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        let mut w = BufWriter::new(file);
        for outcome in outcomes {
            serde_json::to_writer(&mut w, outcome)?;
            w.write_all(b"\n")?;
        }
        w.flush()?;

        tracing::debug!("Wrote {} predictions to '{}'", outcomes.len(), path.display());
        Ok(path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Verdict;
    use crate::llm::evaluator::Status;
    use tempfile::TempDir;

    #[test]
    fn test_outcomes_are_jsonl() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path().join("run")).unwrap();

        let outcome = ExampleOutcome {
            category: "two_scoped".into(),
            question: "q".into(),
            expected: Verdict::Yes,
            predicted: Some(Verdict::No),
            status: Status::Wrong,
            error: None,
        };
        let path = store.save_outcomes("dev", &[outcome.clone(), outcome.clone()]).unwrap();

        let text = fs::read_to_string(path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: ExampleOutcome = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, outcome);
        assert!(lines[0].contains("\"status\":\"wrong\""));
    }

    #[test]
    fn test_config_saved() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path()).unwrap();
        store.save_config(&serde_json::json!({ "seed": 1 })).unwrap();
        let text = fs::read_to_string(dir.path().join("run_config.json")).unwrap();
        assert!(text.contains("\"seed\": 1"));
    }
}
