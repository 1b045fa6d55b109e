/// Swipe Wizard - headless session replay
///
/// Usage: swipe-wizard [--config <file>] <script.json>
///
/// Replays a recorded session against a wizard running on a virtual clock and
/// prints the final state as JSON.
use anyhow::{bail, Context};
use std::path::PathBuf;

use swipe_wizard::clock::VirtualClock;
use swipe_wizard::script::{self, SessionScript};
use swipe_wizard::{AppResult, CardStackWizard, WizardConfig};

/// Initialize tracing with a daily log file in the user config folder
fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("SwipeWizard").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "swipe-wizard.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    // Debug builds also log to stderr; stdout carries the JSON result
    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!("Logging to {}", log_dir.display());
}

struct Args {
    config: Option<PathBuf>,
    script: PathBuf,
}

fn parse_args() -> AppResult<Args> {
    let mut config = None;
    let mut script = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a file argument")?;
                config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                bail!("usage: swipe-wizard [--config <file>] <script.json>");
            }
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument: {}", arg),
        }
    }

    let script = script.context("usage: swipe-wizard [--config <file>] <script.json>")?;
    Ok(Args { config, script })
}

fn run() -> AppResult<()> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => WizardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WizardConfig::default(),
    };
    let session = SessionScript::load(&args.script)
        .with_context(|| format!("loading script {}", args.script.display()))?;

    tracing::info!(
        "Replaying {} entries over {} steps",
        session.entries.len(),
        config.total_steps
    );

    let clock = VirtualClock::new();
    let mut wizard = CardStackWizard::with_clock(&config, session.guard(), clock.clone());
    script::replay(&mut wizard, &clock, &session.entries);

    let snapshot = serde_json::to_string_pretty(&wizard.snapshot())
        .context("serializing final state")?;
    println!("{}", snapshot);
    Ok(())
}

fn main() {
    initialize_tracing();

    if let Err(e) = run() {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
