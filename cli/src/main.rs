//! CLI entrypoint for ollama-pipeline
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use pipeline_application::{
    AnalysisProgressNotifier, AnalyzeContentUseCase, GenerateReportUseCase, HistoricalReport,
    NoProgress, route_content,
};
use pipeline_domain::{ExecutorBackend, HeuristicClassifier, Severity};
use pipeline_infrastructure::storage::REPORT_FILE;
use pipeline_infrastructure::{
    FsResultStore, FsSummarySource, LoadedSettings, SettingsLoader, build_executor,
};
use pipeline_presentation::cli::commands::{AnalyzeArgs, InputArgs, ReportArgs};
use pipeline_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting ollama-pipeline");

    let mut loader = SettingsLoader::new();
    if cli.no_config {
        loader = loader.without_file();
    }
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }

    run(cli.command, &loader).await
}

/// Dispatch a subcommand. Settings are loaded only by the commands that use them.
async fn run(command: Command, loader: &SettingsLoader) -> Result<()> {
    match command {
        Command::Config => show_config(&load_settings(loader)?),
        Command::Analyze(args) => {
            let loaded = load_settings(loader)?;
            report_issues(&loaded)?;
            analyze(args, &loaded).await
        }
        Command::Classify(args) => {
            let loaded = load_settings(loader)?;
            report_issues(&loaded)?;
            classify(&args, &loaded)
        }
        Command::Report(args) => report(&args),
    }
}

fn load_settings(loader: &SettingsLoader) -> Result<LoadedSettings> {
    loader.load().context("Failed to load configuration")
}

/// Print config issues; abort on errors
fn report_issues(loaded: &LoadedSettings) -> Result<()> {
    for issue in &loaded.issues {
        eprintln!("{}", ConsoleFormatter::format_issue(issue));
    }
    if loaded.has_errors() {
        bail!("Configuration has errors; run `ollama-pipeline config` for details");
    }
    Ok(())
}

fn read_content(input: &InputArgs) -> Result<String> {
    if let Some(path) = &input.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    if let Some(content) = &input.content {
        return Ok(content.clone());
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No content given. Pass it as an argument, with --file, or on stdin.");
    }
    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("Failed to read content from stdin")?;
    Ok(content)
}

async fn analyze(args: AnalyzeArgs, loaded: &LoadedSettings) -> Result<()> {
    let content = read_content(&args.input)?;
    if content.trim().is_empty() {
        warn!("Content is empty; it will be treated as documentation");
    }

    let mut executor_settings = loaded.settings.executor.clone();
    if args.dry_run {
        executor_settings.backend = ExecutorBackend::Stub;
    }
    let executor = build_executor(&executor_settings);
    info!("Using {} executor", executor.name());

    let store = Arc::new(FsResultStore::new(&args.results_dir));
    let use_case = AnalyzeContentUseCase::new(executor, store);

    let progress: Box<dyn AnalysisProgressNotifier> = if args.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let result = match use_case
        .execute_with_progress(&content, &loaded.settings, progress.as_ref())
        .await
    {
        Ok(result) => result,
        Err(e) => {
            // Keep the model output visible even though it was not saved
            if let Some(unsaved) = e.unsaved_result() {
                println!("{}", ConsoleFormatter::format_result(unsaved));
            }
            return Err(e).context("Analysis failed");
        }
    };

    match args.format {
        OutputFormat::Text => println!("{}", ConsoleFormatter::format_result(&result)),
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_result_json(&result)),
    }

    Ok(())
}

fn classify(args: &InputArgs, loaded: &LoadedSettings) -> Result<()> {
    let content = read_content(args)?;
    let decision = route_content(&HeuristicClassifier::new(), &content, &loaded.settings);
    print!("{}", ConsoleFormatter::format_routing(&decision));
    Ok(())
}

fn report(args: &ReportArgs) -> Result<()> {
    let (path, report) = write_report(args, Utc::now())?;
    print!(
        "{}",
        ConsoleFormatter::format_report_written(&path.display().to_string(), &report)
    );
    Ok(())
}

/// Build the historical report and write it.
///
/// Nothing is written when the results root is missing.
fn write_report(
    args: &ReportArgs,
    generated_at: DateTime<Utc>,
) -> Result<(PathBuf, HistoricalReport)> {
    let source = Arc::new(FsSummarySource::new(&args.results_dir));
    let report = GenerateReportUseCase::new(source)
        .execute(generated_at)
        .context("Failed to build historical report")?;

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| args.results_dir.join(REPORT_FILE));
    std::fs::write(&path, &report.markdown)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok((path, report))
}

fn show_config(loaded: &LoadedSettings) -> Result<()> {
    let sources: Vec<String> = loaded.sources.iter().map(ToString::to_string).collect();
    print!(
        "{}",
        ConsoleFormatter::format_settings(&loaded.settings, &sources, &loaded.issues)
    );

    let errors = loaded
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count();
    if errors > 0 {
        bail!("{} configuration error(s)", errors);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn report_args(results_dir: &Path) -> ReportArgs {
        ReportArgs {
            results_dir: results_dir.to_path_buf(),
            output: None,
        }
    }

    fn write_summary(root: &Path, run: &str, json: &str) {
        let dir = root.join(run);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("workflow_summary.json"), json).unwrap();
    }

    #[test]
    fn test_write_report_missing_root_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results");

        assert!(write_report(&report_args(&results), Utc::now()).is_err());
        assert!(!results.exists());
    }

    #[test]
    fn test_write_report_empty_root() {
        let dir = tempfile::tempdir().unwrap();

        let (path, report) = write_report(&report_args(dir.path()), Utc::now()).unwrap();
        assert_eq!(path, dir.path().join(REPORT_FILE));
        assert_eq!(report.statistics.total_runs, 0);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("No workflow runs found"));
    }

    #[test]
    fn test_write_report_populated_root() {
        let dir = tempfile::tempdir().unwrap();
        write_summary(
            dir.path(),
            "20250101_000000",
            r#"{"task_type":"code_review","model":"qwen2.5-coder:7b"}"#,
        );
        write_summary(
            dir.path(),
            "20250102_000000",
            r#"{"task_type":"bug_analysis","model":"mistral"}"#,
        );
        let output = dir.path().join("out.md");
        let args = ReportArgs {
            results_dir: dir.path().to_path_buf(),
            output: Some(output.clone()),
        };

        let (path, report) = write_report(&args, Utc::now()).unwrap();
        assert_eq!(path, output);
        assert_eq!(report.statistics.total_runs, 2);
        assert!(!dir.path().join(REPORT_FILE).exists());
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("mistral"));
    }

    #[tokio::test]
    async fn test_report_ignores_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, "models: [unclosed").unwrap();
        let results = dir.path().join("results");
        write_summary(&results, "20250101_000000", r#"{"model":"mistral"}"#);

        let loader = SettingsLoader::new().with_config_path(&config);
        assert!(loader.load().is_err());

        run(Command::Report(report_args(&results)), &loader)
            .await
            .unwrap();
        assert!(results.join(REPORT_FILE).is_file());
    }

    #[tokio::test]
    async fn test_config_command_reports_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.yaml");
        std::fs::write(&config, "models: [unclosed").unwrap();

        let loader = SettingsLoader::new().with_config_path(&config);
        assert!(run(Command::Config, &loader).await.is_err());
    }
}
