//! Order history command handlers.

use std::sync::Arc;

use tabled::Tabled;

use learnhub_core::{Expiry, Order, PlanType};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Covers")]
    covers: String,
    #[tabled(rename = "Expires")]
    expires: String,
}

impl From<&Arc<Order>> for OrderRow {
    fn from(order: &Arc<Order>) -> Self {
        Self {
            id: order.id.to_string(),
            plan: order.plan.to_string(),
            payment: order.payment_status.to_string(),
            active: if order.active { "yes" } else { "no" }.into(),
            covers: coverage(order),
            expires: expiry(order.expiry),
        }
    }
}

/// What the order pays for, one phrase.
fn coverage(order: &Order) -> String {
    match order.plan {
        PlanType::Quarterly => "all courses".into(),
        PlanType::Single => order
            .course
            .as_ref()
            .map_or_else(|| "(no course)".into(), |course| format!("course {course}")),
        PlanType::Combo => order.combo.as_ref().map_or_else(
            || "(no combo)".into(),
            |grant| match &grant.courses {
                Some(courses) => format!("combo {} ({} courses)", grant.id, courses.len()),
                None => format!("combo {} (unresolved)", grant.id),
            },
        ),
        PlanType::Kit => "hardware kit".into(),
        PlanType::School => "school license".into(),
    }
}

fn expiry(expiry: Expiry) -> String {
    match expiry {
        Expiry::Lifetime => "lifetime".into(),
        Expiry::At(end) => output::format_instant(end),
        Expiry::Invalid => "(invalid)".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: OrdersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let portal = super::oneshot_portal(global, true).await?;

    match args.command {
        OrdersCommand::List => {
            let orders: Vec<Arc<Order>> = portal.store().orders().iter().cloned().collect();
            let out = output::render_list(
                &global.output,
                &orders,
                |order| OrderRow::from(order),
                |order| order.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
