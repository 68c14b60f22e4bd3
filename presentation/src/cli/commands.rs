//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for solve and reconcile results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Responses, consensus and explanation
    Full,
    /// Only the agreed answer
    Answer,
    /// The reconciliation payload as JSON
    Json,
}

impl From<OutputFormat> for math_quorum_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Answer => Self::Answer,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for math-quorum
#[derive(Parser, Debug)]
#[command(name = "math-quorum")]
#[command(author, version, about = "Ask several LLMs a math problem and reconcile their answers")]
#[command(long_about = r#"
Math Quorum sends a math problem to several LLMs in parallel, extracts each
model's final answer, and reports the answer a majority agrees on together
with a confidence level.

Answers are compared numerically and symbolically, so "1/2", "0.5" and
"\frac{1}{2}" count as the same answer.

Configuration files are loaded from (in priority order):
1. MATH_QUORUM_* environment variables
2. --config <path>          Explicit config file
3. ./math-quorum.toml       Project-level config
4. ~/.config/math-quorum/config.toml   Global config

Example:
  math-quorum solve "What is the derivative of x^3?"
  math-quorum solve -m chatgpt -m claude --file problem.txt
  math-quorum reconcile responses.json --problem "2 + 2"
  math-quorum history stats
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily-rotated file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask every configured model to solve a problem
    Solve(SolveArgs),

    /// Reconcile previously collected responses without calling any model
    Reconcile(ReconcileArgs),

    /// Inspect stored results
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// The problem text
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub problem: Option<String>,

    /// Read the problem from a file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Models to query (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Per-model request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not save the result to history
    #[arg(long)]
    pub no_history: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// JSON object mapping model names to their response text
    #[arg(value_name = "RESPONSES.json")]
    pub responses: PathBuf,

    /// Problem text recorded in the result
    #[arg(long)]
    pub problem: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List stored results, newest first
    List {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show one stored result
    Show {
        /// Record id as printed by `history list`
        id: String,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// Aggregate statistics over all stored results
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}
