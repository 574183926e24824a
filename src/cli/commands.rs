// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and their flags:
//
//   evaluate — score the reasoning module on dev and/or test
//   ask      — answer one premise/question pair
//   compile  — save a labelled few-shot demonstration set
//   stats    — count examples per category in a directory
//
// Model endpoint flags are shared through ModelArgs and can
// also come from OPENAI_API_BASE / OPENAI_API_KEY.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::compile_use_case::CompileConfig;
use crate::application::evaluate_use_case::{EvaluateConfig, SplitChoice};
use crate::llm::client::{ClientConfig, DEFAULT_API_BASE};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the chain-of-thought module on the dev and/or test split
    Evaluate(EvaluateArgs),

    /// Ask whether a question follows from a context
    Ask(AskArgs),

    /// Save the first k shuffled training examples as demonstrations
    Compile(CompileArgs),

    /// Show example counts per category for a dataset directory
    Stats(StatsArgs),
}

/// Which model to call and how.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Model identifier sent to the endpoint
    #[arg(long, default_value = "gpt-3.5-turbo")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Bearer token; omit for local servers
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upper bound on generated tokens per request
    #[arg(long, default_value_t = 1000)]
    pub max_tokens: u32,

    /// Sampling temperature (0 = greedy)
    #[arg(long, default_value_t = 0.0)]
    pub temperature: f32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,
}

impl From<ModelArgs> for ClientConfig {
    fn from(a: ModelArgs) -> Self {
        ClientConfig {
            model: a.model,
            api_base: a.api_base,
            api_key: a.api_key,
            max_tokens: a.max_tokens,
            temperature: a.temperature,
            timeout_secs: a.timeout_secs,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SplitArg {
    Dev,
    Test,
    Both,
}

impl From<SplitArg> for SplitChoice {
    fn from(s: SplitArg) -> Self {
        match s {
            SplitArg::Dev => SplitChoice::Dev,
            SplitArg::Test => SplitChoice::Test,
            SplitArg::Both => SplitChoice::Both,
        }
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory of training CSV files (the dev split is cut from here)
    #[arg(long)]
    pub train_dir: Option<PathBuf>,

    /// Directory of test CSV files
    #[arg(long)]
    pub test_dir: Option<PathBuf>,

    /// Which split(s) to score
    #[arg(long, value_enum, default_value_t = SplitArg::Dev)]
    pub split: SplitArg,

    /// Shuffle seed shared by every split
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Examples reserved for training after shuffling
    #[arg(long, default_value_t = 200)]
    pub train_size: usize,

    /// Examples after the training slice used as dev
    #[arg(long, default_value_t = 50)]
    pub dev_size: usize,

    /// Demonstration file produced by `compile`
    #[arg(long)]
    pub demos: Option<PathBuf>,

    /// Only evaluate the first N examples of each split
    #[arg(long)]
    pub limit: Option<usize>,

    /// Where metrics.csv, predictions and run_config.json go
    #[arg(long, default_value = "runs")]
    pub output_dir: PathBuf,

    /// Label for this run in metrics.csv (defaults to the model name)
    #[arg(long)]
    pub run_name: Option<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Convert CLI EvaluateArgs into the application-layer EvaluateConfig.
/// The application layer never sees clap types.
impl From<EvaluateArgs> for EvaluateConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvaluateConfig {
            train_dir: a.train_dir,
            test_dir: a.test_dir,
            seed: a.seed,
            train_size: a.train_size,
            dev_size: a.dev_size,
            demos: a.demos,
            limit: a.limit,
            split: a.split.into(),
            output_dir: a.output_dir,
            run_name: a.run_name,
            client: a.model.into(),
        }
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The premise
    #[arg(long)]
    pub context: String,

    /// A yes/no question about the premise
    #[arg(long, conflicts_with = "hypothesis", required_unless_present = "hypothesis")]
    pub question: Option<String>,

    /// A statement to test; rewritten as "Can we logically conclude for sure that ...?"
    #[arg(long)]
    pub hypothesis: Option<String>,

    /// Demonstration file produced by `compile`
    #[arg(long)]
    pub demos: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Directory of training CSV files
    #[arg(long)]
    pub train_dir: PathBuf,

    /// Output JSON file
    #[arg(long, default_value = "runs/demos.json")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Must match the value used for `evaluate` so dev stays held out
    #[arg(long, default_value_t = 200)]
    pub train_size: usize,

    /// Number of demonstrations
    #[arg(long, default_value_t = 8)]
    pub k: usize,
}

impl From<CompileArgs> for CompileConfig {
    fn from(a: CompileArgs) -> Self {
        CompileConfig {
            train_dir: a.train_dir,
            out: a.out,
            seed: a.seed,
            train_size: a.train_size,
            k: a.k,
        }
    }
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Directory of CSV files
    #[arg(long)]
    pub dir: PathBuf,
}
