//! CLI entrypoint for Math Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use math_quorum_application::{
    AnalyzeHistoryUseCase, HistoryRepository, SolveProblemInput, SolveProblemUseCase,
};
use math_quorum_domain::{ConsensusEngine, MathProblem, Model, OutputFormat};
use math_quorum_infrastructure::{
    ConfigLoader, FileConfig, JsonHistoryRepository, RoutingGateway, build_providers,
};
use math_quorum_presentation::{
    Cli, Command, ConsoleFormatter, HistoryCommand, ProgressReporter, ReconcileArgs, SolveArgs,
    parse_responses,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = load_config(&cli)?;
    ConsoleFormatter::set_color_enabled(config.output.color);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Solve(args) => solve(args, &config, cli.quiet).await,
        Command::Reconcile(args) => reconcile(args, &config).await,
        Command::History(command) => history(command, &config).await,
    }
}

/// Initialize logging based on verbosity level, optionally teeing into a
/// daily-rotated file.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "math-quorum.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}

/// Load and validate configuration. Errors abort, warnings are logged.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            bail!("Config file not found: {}", path.display());
        }
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.to_string())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    Ok(config)
}

fn output_format(
    requested: Option<math_quorum_presentation::OutputFormat>,
    config: &FileConfig,
) -> OutputFormat {
    requested
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default()
}

fn history_repository(config: &FileConfig) -> JsonHistoryRepository {
    JsonHistoryRepository::new(config.history.resolved_dir())
}

async fn solve(args: SolveArgs, config: &FileConfig, quiet: bool) -> Result<()> {
    let text = match (&args.problem, &args.file) {
        (Some(problem), _) => problem.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read problem file {}", path.display()))?,
        (None, None) => bail!("A problem text or --file is required"),
    };
    let problem: MathProblem = text.parse()?;

    let models: Vec<Model> = if args.model.is_empty() {
        config.models.parse_enabled().0
    } else {
        args.model.iter().map(|s| Model::from(s.as_str())).collect()
    };

    let mut params = config.consensus.to_solve_params();
    if let Some(seconds) = args.timeout {
        if seconds == 0 {
            bail!("--timeout must be greater than 0");
        }
        params = params.with_timeout_seconds(seconds);
    }
    if args.no_history || !config.history.enabled {
        params = params.without_history();
    }

    // === Dependency Injection ===
    let provider_config = config.providers.to_provider_config();
    let providers = build_providers(&provider_config);
    let gateway = Arc::new(RoutingGateway::new(providers, &provider_config));

    let mut use_case = SolveProblemUseCase::new(gateway);
    if params.save_history {
        let repository: Arc<dyn HistoryRepository> = Arc::new(history_repository(config));
        use_case = use_case.with_history(repository);
    }

    info!(
        "Solving with models: {}",
        models
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let input = SolveProblemInput::new(problem, models).with_params(params);
    let output = if quiet || !config.output.show_progress {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    let format = output_format(args.output, config);
    print!("{}", ConsoleFormatter::render(&output.reconciliation, format));

    if let Some(id) = &output.history_id {
        info!("Saved to history as {}", id);
    }

    Ok(())
}

async fn reconcile(args: ReconcileArgs, config: &FileConfig) -> Result<()> {
    let body = tokio::fs::read_to_string(&args.responses)
        .await
        .with_context(|| format!("Cannot read {}", args.responses.display()))?;
    let responses = parse_responses(&body)
        .with_context(|| format!("Invalid responses file {}", args.responses.display()))?;

    let (rule, _) = config.consensus.parse_rule();
    let engine = ConsensusEngine::new(rule);
    let problem_text = args.problem.unwrap_or_default();
    let reconciliation = engine.reconcile_responses(problem_text, &responses);

    let format = output_format(args.output, config);
    print!("{}", ConsoleFormatter::render(&reconciliation, format));
    Ok(())
}

async fn history(command: HistoryCommand, config: &FileConfig) -> Result<()> {
    let repository = Arc::new(history_repository(config));

    match command {
        HistoryCommand::List { limit } => {
            let mut summaries = repository.list().await?;
            if let Some(limit) = limit {
                summaries.truncate(limit);
            }
            print!("{}", ConsoleFormatter::format_history_list(&summaries));
        }
        HistoryCommand::Show { id, output } => {
            let record = repository.get(&id).await?;
            let format = output_format(output, config);
            print!("{}", ConsoleFormatter::format_record(&record, format));
        }
        HistoryCommand::Stats { json } => {
            let stats = AnalyzeHistoryUseCase::new(repository).execute().await?;
            if json {
                println!("{}", ConsoleFormatter::format_stats_json(&stats));
            } else {
                print!("{}", ConsoleFormatter::format_stats(&stats));
            }
        }
    }

    Ok(())
}
