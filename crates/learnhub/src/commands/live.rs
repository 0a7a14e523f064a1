//! Live-class schedule command handlers.

use std::sync::Arc;

use tabled::Tabled;

use learnhub_core::schedule;
use learnhub_core::{LiveClass, SessionPhase};

use crate::cli::{GlobalOpts, LiveArgs, LiveCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LiveRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Starts in")]
    starts_in: String,
}

fn row(class: &Arc<LiveClass>, now: chrono::DateTime<chrono::Utc>) -> LiveRow {
    let (starts, status, starts_in) = match class.starts_at {
        Some(start) => (
            output::format_instant(start),
            badge(schedule::classify(start, now)).to_owned(),
            countdown(start, now),
        ),
        None => ("-".into(), "unscheduled".into(), "-".into()),
    };
    LiveRow {
        id: class.id.to_string(),
        title: class.title.clone(),
        starts,
        status,
        starts_in,
    }
}

/// Whole-second countdown, humantime-formatted ("1h 30m 5s").
fn countdown(start: chrono::DateTime<chrono::Utc>, now: chrono::DateTime<chrono::Utc>) -> String {
    schedule::time_until(start, now)
        .and_then(|left| u64::try_from(left.num_seconds()).ok())
        .map_or_else(
            || "-".into(),
            |secs| humantime::format_duration(std::time::Duration::from_secs(secs)).to_string(),
        )
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(args: LiveArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        LiveCommand::List => list(global).await,
        LiveCommand::Watch => watch(global).await,
    }
}

async fn list(global: &GlobalOpts) -> Result<(), CliError> {
    let portal = super::oneshot_portal(global, false).await?;
    let now = super::clock_from(global)?.now();

    let classes: Vec<Arc<LiveClass>> = portal.store().live_classes().iter().cloned().collect();
    let out = output::render_list(
        &global.output,
        &classes,
        |class| row(class, now),
        |class| class.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Stream phase changes from the portal's 1 Hz ticker until Ctrl-C.
async fn watch(global: &GlobalOpts) -> Result<(), CliError> {
    let portal = super::connected_portal(global, false).await?;
    let mut phases = portal.subscribe_phases();

    if !global.quiet {
        eprintln!("watching live-class countdowns (Ctrl-C to stop)");
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = phases.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = phases.borrow_and_update().clone();
                for phase in snapshot.iter() {
                    print_phase(phase);
                }
            }
        }
    }

    portal.shutdown();
    Ok(())
}

/// Human badge text for a phase (the structured formats keep the
/// snake_case serde names).
fn badge(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Ended => "ended",
        SessionPhase::StartingSoon => "starting soon",
        SessionPhase::Today => "today",
        SessionPhase::Later => "upcoming",
    }
}

fn print_phase(phase: &learnhub_core::LivePhase) {
    println!("{}  {}", badge(phase.phase), phase.title);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use learnhub_core::EntityId;

    #[test]
    fn countdown_is_whole_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).single().expect("valid");
        let start = now + Duration::minutes(90);
        assert_eq!(countdown(start, now), "1h 30m");
    }

    #[test]
    fn unscheduled_classes_render_placeholders() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).single().expect("valid");
        let class = Arc::new(LiveClass {
            id: EntityId::from("lc1"),
            title: "Office hours".into(),
            course: None,
            starts_at: None,
            duration_minutes: None,
            meeting_url: None,
        });
        let row = row(&class, now);
        assert_eq!(row.status, "unscheduled");
        assert_eq!(row.starts_in, "-");
    }
}
