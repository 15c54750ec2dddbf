//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with the model output
    Text,
    /// The stored result as JSON
    Json,
}

/// CLI arguments for ollama-pipeline
#[derive(Parser, Debug)]
#[command(name = "ollama-pipeline")]
#[command(author, version, about = "Route content to the right local model and keep a history of runs")]
#[command(long_about = r#"
ollama-pipeline classifies a piece of content (code review, bug analysis or
documentation), picks a model for that task, sends it a prompt and stores
the answer under a timestamped results directory.

Configuration is loaded from (in priority order):
1. OLLAMA_MODEL / OLLAMA_TIMEOUT environment variables
2. --config <path>, else ./config.yaml, else
   ~/.config/ollama-pipeline/config.yaml
3. Built-in defaults

Example:
  ollama-pipeline analyze "def add(a, b): return a - b"
  ollama-pipeline analyze --file crash.log
  git diff | ollama-pipeline analyze
  ollama-pipeline report
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify content, query the selected model and store the result
    Analyze(AnalyzeArgs),

    /// Show the task type, model and prompt without querying a model
    Classify(InputArgs),

    /// Write the historical Markdown report for all stored runs
    Report(ReportArgs),

    /// Show the merged configuration, its sources and any issues
    Config,
}

/// Where the content comes from: argument, `--file`, or stdin
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Content to analyze (reads stdin when omitted and no --file is given)
    pub content: Option<String>,

    /// Read content from a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "content")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Results root directory
    #[arg(long, value_name = "DIR", default_value = "results")]
    pub results_dir: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Use canned responses instead of querying a model
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Results root directory
    #[arg(long, value_name = "DIR", default_value = "results")]
    pub results_dir: PathBuf,

    /// Report path (defaults to <results-dir>/historical_report.md)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_with_inline_content() {
        let cli = Cli::parse_from(["ollama-pipeline", "analyze", "fix this bug", "--dry-run"]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.input.content.as_deref(), Some("fix this bug"));
                assert!(args.dry_run);
                assert_eq!(args.format, OutputFormat::Text);
                assert_eq!(args.results_dir, PathBuf::from("results"));
            }
            other => panic!("expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ollama-pipeline", "config", "-vv", "--config", "p.toml"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("p.toml")));
        assert!(matches!(cli.command, Command::Config));
    }

    #[test]
    fn test_file_and_content_conflict() {
        let result =
            Cli::try_parse_from(["ollama-pipeline", "classify", "text", "--file", "a.py"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_output_path() {
        let cli = Cli::parse_from([
            "ollama-pipeline",
            "report",
            "--results-dir",
            "runs",
            "-o",
            "out.md",
        ]);
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.results_dir, PathBuf::from("runs"));
                assert_eq!(args.output, Some(PathBuf::from("out.md")));
            }
            other => panic!("expected report, got {other:?}"),
        }
    }
}
