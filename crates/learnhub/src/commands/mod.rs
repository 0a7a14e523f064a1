//! Command dispatch and shared handler plumbing.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use clap::CommandFactory;
use indicatif::{ProgressBar, ProgressStyle};

use learnhub_core::{Clock, ManualClock, Portal, SystemClock};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::resolve_portal_config;
use crate::error::CliError;

pub mod access;
pub mod config_cmd;
pub mod courses;
pub mod live;
pub mod orders;
pub mod renewal;

/// Route a parsed invocation to its handler.
pub async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Courses(args) => courses::handle(args, &cli.global).await,
        Command::Orders(args) => orders::handle(args, &cli.global).await,
        Command::Access(args) => access::handle(args, &cli.global).await,
        Command::Renewal(args) => renewal::handle(args, &cli.global).await,
        Command::Live(args) => live::handle(args, &cli.global).await,
        Command::Config(args) => config_cmd::handle(args, &cli.global),
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "learnhub",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

// ── Shared helpers ───────────────────────────────────────────────────

/// The clock every time-dependent command uses: the wall clock, or a
/// pinned instant when `--at` is given.
pub(crate) fn clock_from(global: &GlobalOpts) -> Result<Arc<dyn Clock>, CliError> {
    match &global.at {
        None => Ok(Arc::new(SystemClock)),
        Some(raw) => {
            let instant = chrono::DateTime::parse_from_rfc3339(raw)
                .map_err(|e| CliError::validation("--at", format!("{raw}: {e}")))?
                .with_timezone(&chrono::Utc);
            Ok(Arc::new(ManualClock::new(instant)))
        }
    }
}

/// Fetch a one-off snapshot, with a spinner on interactive terminals.
pub(crate) async fn oneshot_portal(
    global: &GlobalOpts,
    needs_session: bool,
) -> Result<Portal, CliError> {
    let config = resolve_portal_config(global, needs_session)?;
    let clock = clock_from(global)?;

    let spinner = fetch_spinner(global);
    let portal = Portal::oneshot(config, clock).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    Ok(portal?)
}

/// Connect with background refresh and the countdown ticker running.
pub(crate) async fn connected_portal(
    global: &GlobalOpts,
    needs_session: bool,
) -> Result<Portal, CliError> {
    let config = resolve_portal_config(global, needs_session)?;
    let clock = clock_from(global)?;

    let spinner = fetch_spinner(global);
    let portal = Portal::connect(config, clock).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    Ok(portal?)
}

fn fetch_spinner(global: &GlobalOpts) -> Option<ProgressBar> {
    if global.quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let spinner = ProgressBar::new_spinner().with_message("fetching from LearnHub...");
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}
