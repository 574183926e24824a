// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends evaluation scores to a CSV file after each split.
//
// One row per (run, split, category) plus an "all" row for the
// split as a whole:
//
//   run,split,category,total,correct,invalid,accuracy
//   gpt-3.5-turbo,dev,all,50,41,1,0.820000
//   gpt-3.5-turbo,dev,one_scoped,9,9,0,1.000000
//   ...
//
// Failed requests are not a column here; they count against
// accuracy and are itemised in predictions_{split}.jsonl.
//
// The file is appended to across runs so models can be
// compared side by side in a spreadsheet.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::llm::evaluator::{EvaluationReport, Score};

const HEADER: &str = "run,split,category,total,correct,invalid,accuracy";

/// Logs evaluation scores to `{dir}/metrics.csv`.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append the overall row and one row per category.
    pub fn log(&self, run: &str, split: &str, report: &EvaluationReport) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        write_row(&mut f, run, split, "all", &report.overall)?;
        for (category, score) in &report.categories {
            write_row(&mut f, run, split, category, score)?;
        }

        tracing::debug!(
            "Logged {} metrics for run '{}' ({} categories)",
            split,
            run,
            report.categories.len()
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

fn write_row(f: &mut impl Write, run: &str, split: &str, category: &str, s: &Score) -> Result<()> {
    writeln!(
        f,
        "{},{},{},{},{},{},{:.6}",
        csv_field(run),
        split,
        csv_field(category),
        s.total,
        s.correct,
        s.invalid,
        s.accuracy(),
    )?;
    Ok(())
}

/// Quote a value if it would break the row
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
