// ── Course access resolution ──
//
// Pure decision logic over a user's order history. This is the ONLY
// place that decides whether a user may open a course; presentation
// layers render the decision, the live-class schedule never overrides
// it. Governing policy: fail closed -- any ambiguity about entitlement
// resolves to denial.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{EntityId, Order, PaymentStatus, PlanType};

/// Outcome of an access check for one user against one course.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccessDecision {
    /// The user may view and learn from the course right now.
    Granted,
    /// A matching order exists but its payment is not approved yet.
    PendingApproval,
    /// No order covers this course (including expired ones).
    NotPurchased,
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Decide whether `orders` currently grant access to `target`.
///
/// Evaluated in precedence order, first match wins:
///
/// 1. a current quarterly (all-access) order grants every course;
/// 2. a current single-course order for `target` grants it;
/// 3. a current combo order whose resolved course set contains `target`
///    grants it;
/// 4. an active quarterly or single-for-`target` order whose payment is
///    not approved reports [`AccessDecision::PendingApproval`];
/// 5. otherwise [`AccessDecision::NotPurchased`].
///
/// "Current" means approved + active + unexpired ([`Order::grants_at`]);
/// a lifetime expiry is always current and an invalid one never is.
/// Combo orders whose course set was never resolved contribute nothing.
pub fn resolve_access(
    orders: &[Order],
    target: &EntityId,
    now: DateTime<Utc>,
) -> AccessDecision {
    let all_access = orders
        .iter()
        .any(|order| order.plan == PlanType::Quarterly && order.grants_at(now));
    if all_access {
        return AccessDecision::Granted;
    }

    let single = orders.iter().any(|order| {
        order.plan == PlanType::Single
            && order.course.as_ref() == Some(target)
            && order.grants_at(now)
    });
    if single {
        return AccessDecision::Granted;
    }

    let combo = orders.iter().any(|order| {
        order.plan == PlanType::Combo
            && order.grants_at(now)
            && order.combo.as_ref().is_some_and(|grant| grant.contains(target))
    });
    if combo {
        return AccessDecision::Granted;
    }

    let awaiting = orders.iter().any(|order| {
        order.active
            && order.payment_status != PaymentStatus::Approved
            && (order.plan == PlanType::Quarterly
                || (order.plan == PlanType::Single && order.course.as_ref() == Some(target)))
    });
    if awaiting {
        return AccessDecision::PendingApproval;
    }

    AccessDecision::NotPurchased
}
