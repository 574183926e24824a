// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Orchestrates a full evaluation run:
//
//   Step 1: Load demonstrations, if a file was given   (Layer 6)
//   Step 2: Build the reasoning module around the
//           injected completion client                (Layer 5)
//   Step 3: Dev split: load train dir, seeded shuffle,
//           take the slice after the training part    (Layer 4)
//   Step 4: Test split: load test dir, seeded shuffle (Layer 4)
//   Step 5: Evaluate each requested split             (Layer 5)
//   Step 6: Save config, predictions and metrics      (Layer 6)
//
// The client is a parameter of execute(), never a global, so the
// same use case runs against a real endpoint or a scripted one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{
    loader::CsvExampleLoader,
    splitter::{shuffle_seeded, split_at_sizes},
};
use crate::domain::example::{Demonstration, Example};
use crate::domain::traits::{CompletionClient, ExampleSource};
use crate::infra::{demo_store::DemoStore, metrics::MetricsLogger, run_store::RunStore};
use crate::llm::{
    client::ClientConfig,
    evaluator::{EvaluationReport, Evaluator},
    reasoner::ScopedNliReasoner,
};

/// Which partitions to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitChoice {
    Dev,
    Test,
    Both,
}

impl SplitChoice {
    fn includes_dev(&self) -> bool {
        matches!(self, SplitChoice::Dev | SplitChoice::Both)
    }

    fn includes_test(&self) -> bool {
        matches!(self, SplitChoice::Test | SplitChoice::Both)
    }
}

// ─── Evaluation Configuration ────────────────────────────────────────────────
// Serialisable so it can be saved next to the predictions it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateConfig {
    pub train_dir: Option<PathBuf>,
    pub test_dir: Option<PathBuf>,
    pub seed: u64,
    pub train_size: usize,
    pub dev_size: usize,
    pub demos: Option<PathBuf>,
    pub limit: Option<usize>,
    pub split: SplitChoice,
    pub output_dir: PathBuf,
    /// Label used in metrics.csv; defaults to the model name
    pub run_name: Option<String>,
    pub client: ClientConfig,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            train_dir: Some(PathBuf::from("ScoNe/scone_nli/train")),
            test_dir: Some(PathBuf::from("ScoNe/scone_nli/test")),
            seed: 1,
            train_size: 200,
            dev_size: 50,
            demos: None,
            limit: None,
            split: SplitChoice::Dev,
            output_dir: PathBuf::from("runs"),
            run_name: None,
            client: ClientConfig::default(),
        }
    }
}

/// Report for one evaluated partition
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub split: &'static str,
    pub report: EvaluationReport,
}

/// Load a training directory and cut it into (train, dev) with a fixed seed.
///
/// Shared with the compile use case so demonstrations are always drawn
/// from the same training slice the dev set was held out from.
pub fn load_train_dev(
    dir: &Path,
    seed: u64,
    train_size: usize,
    dev_size: usize,
) -> Result<(Vec<Example>, Vec<Example>)> {
    let examples = CsvExampleLoader::new(dir)
        .load_all()
        .with_context(|| format!("Failed to load training data from '{}'", dir.display()))?;
    Ok(split_at_sizes(shuffle_seeded(examples, seed), train_size, dev_size))
}

pub struct EvaluateUseCase {
    config: EvaluateConfig,
    show_progress: bool,
}

impl EvaluateUseCase {
    pub fn new(config: EvaluateConfig) -> Self {
        Self {
            config,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn execute(&self, client: &dyn CompletionClient) -> Result<Vec<SplitResult>> {
        let cfg = &self.config;

        // Fail on a bad combination before any request is sent
        let train_dir = match (cfg.split.includes_dev(), &cfg.train_dir) {
            (true, None) => anyhow::bail!("evaluating the dev split needs --train-dir"),
            (_, dir) => dir.as_deref(),
        };
        let test_dir = match (cfg.split.includes_test(), &cfg.test_dir) {
            (true, None) => anyhow::bail!("evaluating the test split needs --test-dir"),
            (_, dir) => dir.as_deref(),
        };

        // ── Step 1: Demonstrations ────────────────────────────────────────────
        let demos: Vec<Demonstration> = match &cfg.demos {
            Some(path) => DemoStore::new(path).load()?,
            None => Vec::new(),
        };

        // ── Step 2: Reasoning module ──────────────────────────────────────────
        let reasoner = ScopedNliReasoner::new(client).with_demos(&demos);
        let evaluator = Evaluator::new()
            .with_limit(cfg.limit)
            .with_progress(self.show_progress);
        tracing::info!(
            "Evaluating '{}' with {} demonstrations",
            client.model_name(),
            reasoner.demo_count()
        );

        let run_store = RunStore::new(&cfg.output_dir)?;
        run_store.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.output_dir)?;
        let run_name = cfg
            .run_name
            .clone()
            .unwrap_or_else(|| client.model_name().to_string());

        let mut results = Vec::new();

        // ── Step 3: Dev split ─────────────────────────────────────────────────
        if let (true, Some(dir)) = (cfg.split.includes_dev(), train_dir) {
            let (_train, dev) = load_train_dev(dir, cfg.seed, cfg.train_size, cfg.dev_size)?;
            tracing::info!("Dev split: {} examples", dev.len());
            results.push(self.score("dev", &evaluator, &reasoner, &dev, &run_name, &run_store, &metrics)?);
        }

        // ── Step 4: Test split ────────────────────────────────────────────────
        if let (true, Some(dir)) = (cfg.split.includes_test(), test_dir) {
            let test = CsvExampleLoader::new(dir)
                .load_all()
                .with_context(|| format!("Failed to load test data from '{}'", dir.display()))?;
            let test = shuffle_seeded(test, cfg.seed);
            tracing::info!("Test split: {} examples", test.len());
            results.push(self.score("test", &evaluator, &reasoner, &test, &run_name, &run_store, &metrics)?);
        }

        Ok(results)
    }

    /// Steps 5 and 6 for one split
    #[allow(clippy::too_many_arguments)]
    fn score(
        &self,
        split: &'static str,
        evaluator: &Evaluator,
        reasoner: &ScopedNliReasoner<'_>,
        examples: &[Example],
        run_name: &str,
        run_store: &RunStore,
        metrics: &MetricsLogger,
    ) -> Result<SplitResult> {
        let report = evaluator.evaluate(reasoner, examples);
        metrics.log(run_name, split, &report)?;
        run_store.save_outcomes(split, &report.outcomes)?;
        Ok(SplitResult { split, report })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::ScriptedClient;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = ",sentence1_edited,sentence2_edited,gold_label_edited";

    /// `n` rows, every one labelled entailment
    fn write_split(dir: &Path, n: usize) {
        fs::create_dir_all(dir).unwrap();
        let mut csv = format!("{HEADER}\n");
        for i in 0..n {
            csv.push_str(&format!("{i},premise {i},hypothesis {i},entailment\n"));
        }
        fs::write(dir.join("two_scoped.csv"), csv).unwrap();
    }

    fn config(root: &TempDir, split: SplitChoice) -> EvaluateConfig {
        EvaluateConfig {
            train_dir: Some(root.path().join("train")),
            test_dir: Some(root.path().join("test")),
            train_size: 6,
            dev_size: 3,
            split,
            output_dir: root.path().join("out"),
            run_name: Some("unit".into()),
            ..EvaluateConfig::default()
        }
    }

    #[test]
    fn test_dev_and_test_are_scored() {
        let root = TempDir::new().unwrap();
        write_split(&root.path().join("train"), 10);
        write_split(&root.path().join("test"), 4);

        let client = ScriptedClient::new(vec!["r\nAnswer: Yes"; 3 + 4]);
        let results = EvaluateUseCase::new(config(&root, SplitChoice::Both))
            .with_progress(false)
            .execute(&client)
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].split, "dev");
        assert_eq!(results[0].report.overall.total, 3);
        assert_eq!(results[1].split, "test");
        assert_eq!(results[1].report.overall.total, 4);
        assert_eq!(results[1].report.accuracy(), 1.0);

        let out = root.path().join("out");
        assert!(out.join("run_config.json").exists());
        assert!(out.join("predictions_dev.jsonl").exists());
        let metrics = fs::read_to_string(out.join("metrics.csv")).unwrap();
        assert!(metrics.contains("unit,test,all,4,4,0,1.000000"));
    }

    #[test]
    fn test_dev_split_is_reproducible() {
        let root = TempDir::new().unwrap();
        write_split(&root.path().join("train"), 10);

        let (train_a, dev_a) = load_train_dev(&root.path().join("train"), 1, 6, 3).unwrap();
        let (train_b, dev_b) = load_train_dev(&root.path().join("train"), 1, 6, 3).unwrap();
        assert_eq!(train_a, train_b);
        assert_eq!(dev_a, dev_b);
        assert_eq!(train_a.len(), 6);
        assert_eq!(dev_a.len(), 3);
    }

    #[test]
    fn test_missing_test_dir_is_rejected_up_front() {
        let root = TempDir::new().unwrap();
        let mut cfg = config(&root, SplitChoice::Test);
        cfg.test_dir = None;

        let client = ScriptedClient::new(Vec::<&str>::new());
        let err = EvaluateUseCase::new(cfg)
            .with_progress(false)
            .execute(&client)
            .unwrap_err();
        assert!(err.to_string().contains("--test-dir"));
        assert!(client.prompts().is_empty());
    }

    #[test]
    fn test_demos_reach_the_prompt() {
        let root = TempDir::new().unwrap();
        write_split(&root.path().join("test"), 1);

        let demo_path = root.path().join("demos.json");
        DemoStore::new(&demo_path)
            .save(&[Demonstration {
                context: "DEMO CONTEXT".into(),
                question: "DEMO QUESTION".into(),
                answer: crate::domain::example::Verdict::No,
                reasoning: None,
            }])
            .unwrap();

        let mut cfg = config(&root, SplitChoice::Test);
        cfg.demos = Some(demo_path);

        let client = ScriptedClient::new(["r\nAnswer: Yes"]);
        EvaluateUseCase::new(cfg)
            .with_progress(false)
            .execute(&client)
            .unwrap();

        assert!(client.prompts()[0].contains("Context: DEMO CONTEXT"));
    }
}
