use clap::{Parser, ValueEnum};
use scalewatch::api::HttpMetricsSource;
use scalewatch::dashboard::{ApplyOutcome, DashboardState};
use scalewatch::history::export_history;
use scalewatch::logger::{self, LogTarget};
use scalewatch::{App, Config, Error, Result};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "scalewatch")]
#[command(author, version, about = "Predictive autoscaler dashboard", long_about = None)]
struct Args {
    #[arg(long, help = "Autoscaler API base URL (overrides SCALEWATCH_API_URL)")]
    api_url: Option<String>,

    #[arg(short, long, help = "Poll interval in milliseconds")]
    refresh_rate: Option<u64>,

    #[arg(short, long, help = "Path to custom config file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Headless mode (one line per cycle)")]
    headless: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Headless output format")]
    format: OutputFormat,

    #[arg(long, help = "Export the chart window on exit (csv or json)", value_name = "FILE")]
    export_history: Option<PathBuf>,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,

    #[arg(long, help = "Write logs to this file", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let target = match (&args.log_file, args.headless) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Disabled,
    };
    logger::init(args.verbose, target)?;

    log::info!("Starting ScaleWatch v{}", env!("CARGO_PKG_VERSION"));

    let mut config = if let Some(config_path) = &args.config {
        log::info!("Loading config from: {}", config_path.display());
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_else(|e| {
            log::warn!("Using default config: {}", e);
            Config::default()
        })
    };
    config = config.with_env_overrides();

    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    if let Some(rate) = args.refresh_rate {
        config.refresh.interval_ms = rate;
    }

    log::info!("Polling {} every {}ms", config.api.base_url, config.refresh.interval_ms);

    let source = Arc::new(HttpMetricsSource::new(&config.api)?);
    let mut app = App::new(config, source)?;

    if args.headless {
        run_headless(&mut app, args.format).await?;
    } else {
        app = run_tui(app).await?;
    }

    if let Some(path) = &args.export_history {
        export_history(app.dashboard.window(), path)?;
        log::info!("Exported {} points to {}", app.dashboard.window().len(), path.display());
    }

    app.shutdown();
    Ok(())
}

async fn run_headless(app: &mut App, format: OutputFormat) -> Result<()> {
    log::info!("Running in headless mode");

    if format == OutputFormat::Csv {
        println!("timestamp,cpu_usage,memory_usage,predicted_cpu,scaling_decision");
    }

    app.start_polling();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let result = tokio::select! {
            _ = &mut shutdown => {
                log::info!("Interrupted, stopping");
                break;
            }
            result = app.next_result() => result,
        };

        let Some(result) = result else { break };
        let outcome = app.apply(result);
        print_cycle(outcome, app.dashboard.state(), format);
    }

    app.stop_polling();
    Ok(())
}

fn print_cycle(outcome: ApplyOutcome, state: &DashboardState, format: OutputFormat) {
    let Some(line) = cycle_line(outcome, state, format) else { return };

    // Errors stay off stdout unless the caller asked for JSON lines.
    if matches!(state, DashboardState::Error(_)) && format != OutputFormat::Json {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

fn cycle_line(outcome: ApplyOutcome, state: &DashboardState, format: OutputFormat) -> Option<String> {
    match outcome {
        ApplyOutcome::Applied | ApplyOutcome::Failed => format_state(state, format),
        ApplyOutcome::Stale | ApplyOutcome::Inactive => None,
    }
}

fn format_state(state: &DashboardState, format: OutputFormat) -> Option<String> {
    match state {
        DashboardState::Ready(snapshot) => {
            let metrics = &snapshot.metrics;
            let decision = &snapshot.status.scaling_decision;
            let predicted = snapshot.prediction.predicted_cpu;

            let line = match format {
                OutputFormat::Json => serde_json::json!({
                    "timestamp": metrics.timestamp.to_rfc3339(),
                    "cpu_usage": metrics.cpu_usage,
                    "memory_usage": metrics.memory_usage,
                    "predicted_cpu": predicted,
                    "scaling_decision": decision.as_str(),
                    "last_prediction": snapshot.status.last_prediction,
                    "model_status": snapshot.status.model_status.as_str(),
                })
                .to_string(),
                OutputFormat::Csv => format!("{},{:.2},{:.2},{:.2},{}",
                    metrics.timestamp.to_rfc3339(),
                    metrics.cpu_usage,
                    metrics.memory_usage,
                    predicted,
                    csv_field(decision.as_str())
                ),
                OutputFormat::Text => format!("[{}] CPU: {:.1}% | Predicted: {:.1}% | Memory: {:.1}% | {}",
                    metrics.timestamp.format("%H:%M:%S"),
                    metrics.cpu_usage,
                    predicted,
                    metrics.memory_usage,
                    decision.display_label()
                ),
            };
            Some(line)
        }
        DashboardState::Error(message) => Some(match format {
            OutputFormat::Json => serde_json::json!({ "error": message }).to_string(),
            OutputFormat::Csv | OutputFormat::Text => format!("error: {}", message),
        }),
        DashboardState::Loading => None,
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

async fn run_tui(mut app: App) -> Result<App> {
    log::info!("Starting TUI mode");

    app.start_polling();

    // The terminal loop blocks, so keep it off the runtime's worker threads.
    let (app, result) = tokio::task::spawn_blocking(move || {
        let result = scalewatch::tui::run(&mut app);
        (app, result)
    })
    .await
    .map_err(|e| Error::Tui(format!("UI thread failed: {}", e)))?;

    result?;
    Ok(app)
}
