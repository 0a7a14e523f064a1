//! Access-check command handler.

use owo_colors::OwoColorize;
use serde::Serialize;

use learnhub_core::{AccessDecision, EntityId};

use crate::cli::{AccessArgs, AccessCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Structured result for json/yaml consumers.
#[derive(Serialize)]
struct AccessReport {
    course: EntityId,
    title: Option<String>,
    decision: AccessDecision,
    /// `None` when the course is not in the catalog at all.
    visible: Option<bool>,
}

pub async fn handle(args: AccessArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let portal = super::oneshot_portal(global, true).await?;

    match args.command {
        AccessCommand::Check { course_id } => {
            let course_id = EntityId::from(course_id.as_str());
            let decision = portal.access_for(&course_id);
            let catalog_entry = portal.store().course(&course_id);

            let report = AccessReport {
                course: course_id,
                title: catalog_entry.as_ref().map(|course| course.title.clone()),
                decision,
                visible: catalog_entry.as_ref().map(|course| course.is_visible()),
            };

            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &report,
                |report| detail(report, color),
                |report| report.decision.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn detail(report: &AccessReport, color: bool) -> String {
    let decision = if color {
        match report.decision {
            AccessDecision::Granted => report.decision.to_string().green().bold().to_string(),
            AccessDecision::PendingApproval => {
                report.decision.to_string().yellow().bold().to_string()
            }
            AccessDecision::NotPurchased => report.decision.to_string().red().bold().to_string(),
        }
    } else {
        report.decision.to_string()
    };

    let name = report
        .title
        .as_deref()
        .map_or_else(|| report.course.to_string(), ToOwned::to_owned);
    let mut line = format!("{name}: {decision}");

    match report.visible {
        Some(false) => line.push_str("\nnote: this course is not currently visible in the catalog"),
        None => line.push_str("\nnote: course not found in the catalog"),
        Some(true) => {}
    }
    line
}
