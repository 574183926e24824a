// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, builds the model client, hands everything else to the
// use cases in Layer 2, and prints their results.
//
// This is the only place a concrete CompletionClient is
// constructed; every layer below receives it as a parameter.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AskArgs, Commands, CompileArgs, EvaluateArgs, StatsArgs};

use crate::llm::client::{ClientConfig, OpenAiCompatClient};

#[derive(Parser, Debug)]
#[command(
    name = "scone-eval",
    version,
    about = "Chain-of-thought prompting and evaluation on the ScoNe negation NLI benchmark."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Ask(args) => run_ask(args),
            Commands::Compile(args) => run_compile(args),
            Commands::Stats(args) => run_stats(args),
        }
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::{EvaluateConfig, EvaluateUseCase};

    let config: EvaluateConfig = args.into();
    let client = OpenAiCompatClient::new(config.client.clone())?;
    let output_dir = config.output_dir.clone();

    let results = EvaluateUseCase::new(config).execute(&client)?;

    for result in &results {
        let r = &result.report;
        println!(
            "\n{} accuracy: {:.1}% ({}/{}; {} invalid, {} failed)",
            result.split,
            r.accuracy() * 100.0,
            r.overall.correct,
            r.overall.total,
            r.overall.invalid,
            r.overall.failed,
        );
        for (category, score) in &r.categories {
            println!(
                "  {:<28} {:>5.1}%  ({}/{})",
                category,
                score.accuracy() * 100.0,
                score.correct,
                score.total
            );
        }
    }
    println!("\nResults written to '{}'", output_dir.display());
    Ok(())
}

fn run_ask(args: AskArgs) -> Result<()> {
    use crate::application::ask_use_case::{AskUseCase, Query};

    let query = match (args.question, args.hypothesis) {
        (Some(q), _) => Query::Question(q),
        (None, Some(h)) => Query::Hypothesis(h),
        (None, None) => anyhow::bail!("pass --question or --hypothesis"),
    };

    let client = OpenAiCompatClient::new(ClientConfig::from(args.model))?;
    let prediction = AskUseCase::new(args.demos)?.answer(&client, &args.context, query)?;

    println!("\nReasoning: {}", prediction.reasoning);
    println!("Answer: {}", prediction.answer);
    Ok(())
}

fn run_compile(args: CompileArgs) -> Result<()> {
    use crate::application::compile_use_case::CompileUseCase;

    let out = args.out.clone();
    let demos = CompileUseCase::new(args.into()).execute()?;
    println!("Saved {} demonstrations to '{}'", demos.len(), out.display());
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    use crate::application::stats_use_case::StatsUseCase;

    let stats = StatsUseCase::new(args.dir).execute()?;
    println!("{stats}");
    Ok(())
}
