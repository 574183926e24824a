// ============================================================
// Layer 2 — Stats Use Case
// ============================================================
// Loads a dataset directory and counts examples per category
// and how many of them are labelled Yes. Useful for checking a
// download before spending tokens on it.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::data::loader::CsvExampleLoader;
use crate::domain::example::{Example, Verdict};
use crate::domain::traits::ExampleSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub total: usize,
    pub yes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetStats {
    pub categories: BTreeMap<String, CategoryCounts>,
}

impl DatasetStats {
    pub fn from_examples(examples: &[Example]) -> Self {
        let mut stats = Self::default();
        for ex in examples {
            let counts = stats.categories.entry(ex.category.clone()).or_default();
            counts.total += 1;
            if ex.answer == Verdict::Yes {
                counts.yes += 1;
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.categories.values().map(|c| c.total).sum()
    }

    pub fn yes(&self) -> usize {
        self.categories.values().map(|c| c.yes).sum()
    }
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<28} {:>6} {:>6} {:>6}", "category", "total", "yes", "no")?;
        for (name, c) in &self.categories {
            writeln!(f, "{:<28} {:>6} {:>6} {:>6}", name, c.total, c.yes, c.total - c.yes)?;
        }
        write!(
            f,
            "{:<28} {:>6} {:>6} {:>6}",
            "all",
            self.total(),
            self.yes(),
            self.total() - self.yes()
        )
    }
}

pub struct StatsUseCase {
    dir: PathBuf,
}

impl StatsUseCase {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn execute(&self) -> Result<DatasetStats> {
        let examples = CsvExampleLoader::new(&self.dir).load_all()?;
        Ok(DatasetStats::from_examples(&examples))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let examples = vec![
            Example::new("p", "q", Verdict::Yes, "one_scoped"),
            Example::new("p", "q", Verdict::No, "one_scoped"),
            Example::new("p", "q", Verdict::Yes, "two_scoped"),
        ];
        let stats = DatasetStats::from_examples(&examples);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.yes(), 2);
        assert_eq!(stats.categories["one_scoped"], CategoryCounts { total: 2, yes: 1 });

        let table = stats.to_string();
        assert!(table.lines().last().unwrap().starts_with("all"));
        assert_eq!(table.lines().count(), 4);
    }
}
