// ============================================================
// Layer 2 — CompileUseCase
// ============================================================
// Builds a labelled few-shot demonstration set and saves it:
//
//   Step 1: Load train dir, seeded shuffle, take the
//           training slice                           (Layer 4)
//   Step 2: First k training examples → demonstrations (Layer 3)
//   Step 3: Save as JSON                               (Layer 6)
//
// No model is called. The demonstrations are gold-labelled
// examples without reasoning; the dev slice is never touched,
// so evaluating on dev afterwards stays honest.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::evaluate_use_case::load_train_dev;
use crate::domain::example::Demonstration;
use crate::infra::demo_store::DemoStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileConfig {
    pub train_dir: PathBuf,
    pub out: PathBuf,
    pub seed: u64,
    pub train_size: usize,
    /// Number of demonstrations to keep
    pub k: usize,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            train_dir: PathBuf::from("ScoNe/scone_nli/train"),
            out: PathBuf::from("runs/demos.json"),
            seed: 1,
            train_size: 200,
            k: 8,
        }
    }
}

pub struct CompileUseCase {
    config: CompileConfig,
}

impl CompileUseCase {
    pub fn new(config: CompileConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<Vec<Demonstration>> {
        let cfg = &self.config;

        // dev size 0: only the training slice matters here
        let (train, _) = load_train_dev(&cfg.train_dir, cfg.seed, cfg.train_size, 0)?;
        if train.len() < cfg.k {
            tracing::warn!(
                "Only {} training examples available, asked for {} demonstrations",
                train.len(),
                cfg.k
            );
        }

        let demos: Vec<Demonstration> = train.iter().take(cfg.k).map(Demonstration::from).collect();
        DemoStore::new(&cfg.out).save(&demos)?;
        Ok(demos)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(rows: usize) -> TempDir {
        let root = TempDir::new().unwrap();
        let train = root.path().join("train");
        fs::create_dir_all(&train).unwrap();
        let mut csv = String::from("sentence1,sentence2,gold_label\n");
        for i in 0..rows {
            let label = if i % 2 == 0 { "entailment" } else { "neutral" };
            csv.push_str(&format!("premise {i},hypothesis {i},{label}\n"));
        }
        fs::write(train.join("one_scoped.csv"), csv).unwrap();
        root
    }

    fn config(root: &TempDir, k: usize) -> CompileConfig {
        CompileConfig {
            train_dir: root.path().join("train"),
            out: root.path().join("out/demos.json"),
            seed: 1,
            train_size: 10,
            k,
        }
    }

    #[test]
    fn test_saves_k_demos() {
        let root = setup(20);
        let demos = CompileUseCase::new(config(&root, 4)).execute().unwrap();
        assert_eq!(demos.len(), 4);
        assert!(demos.iter().all(|d| d.reasoning.is_none()));

        let reloaded = DemoStore::new(root.path().join("out/demos.json")).load().unwrap();
        assert_eq!(reloaded, demos);
    }

    #[test]
    fn test_same_seed_same_demos() {
        let root = setup(20);
        let a = CompileUseCase::new(config(&root, 4)).execute().unwrap();
        let b = CompileUseCase::new(config(&root, 4)).execute().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_k_larger_than_training_slice() {
        let root = setup(3);
        let demos = CompileUseCase::new(config(&root, 8)).execute().unwrap();
        assert_eq!(demos.len(), 3);
    }
}
