//! Pomodoro Timer CLI - a terminal countdown for focused work
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 pomodoros

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use pomodoro_countdown::cli::{
    run_session, Cli, Commands, Display, OutputFormat, SessionConfig, TerminalDisplay,
};
use pomodoro_countdown::DurationTable;

/// Main entry point
fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            Display::show_error(&format!("ランタイムの初期化に失敗しました: {}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = runtime.block_on(execute(cli));

    // A pending stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();

    if let Err(e) = result {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout only carries display output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let config = SessionConfig::from_args(&args)?;
            let format = config.output;
            let input = BufReader::new(tokio::io::stdin());
            let sink = TerminalDisplay::stdout(format);

            let snapshot = run_session(config, input, sink).await?;
            Display::show_session_end(&snapshot, format);
        }
        Some(Commands::Modes { json }) => {
            Display::show_modes(&DurationTable::STANDARD, OutputFormat::from_json_flag(json));
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
