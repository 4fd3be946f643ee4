mod logging;
mod signal;

use anyhow::Result;
use clap::Parser;
use ratatui::DefaultTerminal;
use std::process::ExitCode;
use templater_core::{
    config::{self, Config},
    context::AppContext,
    machine::StateMachine,
    recovery::RecoveryAction,
};
use templater_tui::{Outcome, Theme};

#[derive(Parser)]
#[command(
    version,
    about = "Create GitHub pull requests from your repository's PR templates"
)]
struct Cli {}

/// Owns the terminal for the lifetime of the UI and hands it back on drop,
/// so an early return or `?` never leaves the shell in raw mode.
struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    fn acquire() -> Self {
        Self {
            terminal: ratatui::init(),
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

fn main() -> ExitCode {
    Cli::parse();

    let level = logging::level_from_env(std::env::var(logging::LOG_ENV_VAR).ok().as_deref());
    if let Err(e) = logging::setup_logging(level) {
        eprintln!("Warning: could not set up logging: {e}");
    }

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(1);
        }
    };

    let ctx = match std::env::current_dir() {
        Ok(dir) => AppContext::from_cli(dir),
        Err(e) => {
            eprintln!("Error: cannot read the working directory: {e}");
            return ExitCode::from(1);
        }
    };

    match run_tui(&config, ctx.clone()) {
        Ok(Outcome::Exit(code)) => ExitCode::from(code),
        Ok(Outcome::Recover(action)) => ExitCode::from(recover(action, &ctx)),
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run_tui(config: &Config, ctx: AppContext) -> Result<Outcome> {
    let shutdown = signal::install_shutdown_handler()?;
    let machine = StateMachine::initialize(ctx);

    let theme = Theme::from_config(&config.theme);
    let mut guard = TerminalGuard::acquire();
    templater_tui::run(
        &mut guard.terminal,
        machine,
        config.keys.clone(),
        theme,
        shutdown,
    )
}

/// Run a recovery action with the terminal released and map it to an exit code.
fn recover(action: RecoveryAction, ctx: &AppContext) -> u8 {
    match action.perform(ctx) {
        Ok(message) => {
            println!("{message}");
            0
        }
        Err(e) => {
            log::warn!("Recovery action '{}' failed: {e:#}", action.label());
            eprintln!("Error: {e:#}");
            1
        }
    }
}
