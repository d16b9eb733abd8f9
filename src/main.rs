use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::info;

use kira_confirm::history::{FsHistoryStore, HistoryError, HistoryStore, RunRecord};
use kira_confirm::input::{InputError, load_analysis};
use kira_confirm::logging;
use kira_confirm::model::policy::ScoringPolicy;
use kira_confirm::pipeline::run_analysis;
use kira_confirm::pipeline::stage1_validate::{ValidationError, ValidationMode};
use kira_confirm::pipeline::stage4_report::{ReportError, Stage4Input, write_reports};
use kira_confirm::report::format_f64_6;

#[derive(Debug, Parser)]
#[command(name = "kira-confirm")]
#[command(about = "Score competing hypotheses against evidence clusters", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score an analysis document and write reports
    Run(RunArgs),
    /// List saved runs
    History {
        /// History directory
        #[arg(long)]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct RunArgs {
    /// Analysis JSON (optionally .gz)
    #[arg(long)]
    input: PathBuf,

    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Prior assignment when a cluster's Q values sum to zero
    #[arg(long, value_enum, default_value_t = ZeroMassArg::Zero)]
    zero_mass: ZeroMassArg,

    /// Drop invalid clusters instead of failing
    #[arg(long)]
    skip_invalid: bool,

    /// Save a run record into this directory
    #[arg(long)]
    history: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ZeroMassArg {
    Zero,
    Uniform,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("invalid analysis: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Run(args) => run_scoring(&args),
        Command::History { dir } => list_history(&dir),
    }
}

fn run_scoring(args: &RunArgs) -> Result<(), CliError> {
    let policy = policy_for(args.zero_mass);
    let mode = if args.skip_invalid {
        ValidationMode::SkipInvalid
    } else {
        ValidationMode::Strict
    };

    info!(input = %args.input.display(), "loading analysis");
    let doc = load_analysis(&args.input)?;
    let run = run_analysis(doc, mode, &policy)?;

    let input = Stage4Input {
        analysis: &run.analysis,
        results: &run.results,
        ranking: &run.ranking,
        policy: &policy,
        skipped: &run.skipped,
        input_path: args.input.display().to_string(),
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let paths = write_reports(&input, &args.out)?;
    info!(summary = %paths.summary_json.display(), "reports written");

    if let Some(dir) = &args.history {
        let store = FsHistoryStore::new(dir);
        let record = RunRecord::new(
            run.analysis.topic.clone(),
            policy.zero_mass().label(),
            run.results.len(),
            &run.ranking,
        );
        let path = store.save(&record)?;
        info!(record = %path.display(), "run saved to history");
    }

    Ok(())
}

fn list_history(dir: &Path) -> Result<(), CliError> {
    let store = FsHistoryStore::new(dir);
    let records = store.load_all()?;
    if records.is_empty() {
        info!(dir = %dir.display(), "no saved runs");
        return Ok(());
    }
    for (idx, record) in records.iter().enumerate() {
        let leader = record
            .ranking
            .first()
            .map(|r| format!("{} ({})", r.hypothesis_id, format_f64_6(r.cumulative_score)))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}\t{}\t{}\tclusters={}\tleader={}",
            idx + 1,
            record.created_unix,
            record.topic.as_deref().unwrap_or("-"),
            record.n_clusters,
            leader
        );
    }
    Ok(())
}

fn policy_for(arg: ZeroMassArg) -> ScoringPolicy {
    match arg {
        ZeroMassArg::Zero => ScoringPolicy::default_v1(),
        ZeroMassArg::Uniform => ScoringPolicy::uniform_v1(),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
