// ── Wire-to-domain normalization ──
//
// Bridges raw `learnhub_api` response types into canonical
// `learnhub_core::model` domain types. All duck-typing is resolved here,
// exactly once: reference unions collapse to `EntityId`, string enums
// parse into closed types, and date strings become `Expiry` /
// `DateTime<Utc>` under the fail-closed policy (anything unparseable
// ends up on the no-access side of every decision).

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use learnhub_api::models::{IdRef, RawCombo, RawComboRef, RawCourse, RawLiveClass, RawOrder};

use crate::model::{Combo, ComboGrant, Course, EntityId, Expiry, LiveClass, Order};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a backend date string.
///
/// The backend usually emits full RFC 3339 instants, but bare
/// `YYYY-MM-DD` dates appear in older records; those count as midnight
/// UTC. Anything else is unparseable.
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Derive an [`Expiry`] from the wire `endDate`.
///
/// Absent and `null` both mean lifetime (the backend does not
/// distinguish them); a present-but-unparseable value is `Invalid`,
/// which behaves as already expired rather than raising.
fn expiry_from_wire(end_date: Option<&str>) -> Expiry {
    match end_date {
        None => Expiry::Lifetime,
        Some(raw) => match parse_instant(raw) {
            Some(instant) => Expiry::At(instant),
            None => {
                warn!(end_date = raw, "unparseable endDate, treating as expired");
                Expiry::Invalid
            }
        },
    }
}

fn entity_id(reference: &IdRef) -> EntityId {
    EntityId::from(reference.id())
}

// ── Orders ─────────────────────────────────────────────────────────

/// Normalize a raw order, or drop it.
///
/// An order with a plan type or payment status outside the known sets
/// cannot participate in any grant rule, so it is skipped with a
/// warning instead of failing the whole batch.
pub fn order_from_wire(raw: &RawOrder) -> Option<Order> {
    let Ok(plan) = raw.plan_type.parse() else {
        warn!(order = %raw.id, plan_type = %raw.plan_type, "unknown planType, skipping order");
        return None;
    };
    let Ok(payment_status) = raw.payment_status.parse() else {
        warn!(
            order = %raw.id,
            payment_status = %raw.payment_status,
            "unknown paymentStatus, skipping order"
        );
        return None;
    };

    let combo = raw.combo_id.as_ref().map(|reference| match reference {
        RawComboRef::Id(id) => ComboGrant {
            id: EntityId::from(id.as_str()),
            courses: None,
        },
        RawComboRef::Doc(doc) => ComboGrant {
            id: EntityId::from(doc.id.as_str()),
            courses: doc
                .courses
                .as_ref()
                .map(|courses| courses.iter().map(entity_id).collect()),
        },
    });

    Some(Order {
        id: EntityId::from(raw.id.as_str()),
        plan,
        payment_status,
        active: raw.is_active,
        course: raw.course_id.as_ref().map(entity_id),
        combo,
        starts_at: raw.start_date.as_deref().and_then(parse_instant),
        expiry: expiry_from_wire(raw.end_date.as_deref()),
    })
}

/// Normalize a full order batch, dropping records that fail to parse.
pub fn orders_from_wire(raw: &[RawOrder]) -> Vec<Order> {
    raw.iter().filter_map(order_from_wire).collect()
}

// ── Catalog ────────────────────────────────────────────────────────

impl From<&RawCourse> for Course {
    fn from(raw: &RawCourse) -> Self {
        Self {
            id: EntityId::from(raw.id.as_str()),
            title: raw.title.clone(),
            published: raw.is_published,
            admin_approved: raw.is_admin_approved,
            price: raw.price,
            instructor: raw.instructor_name.clone(),
        }
    }
}

impl From<&RawCombo> for Combo {
    fn from(raw: &RawCombo) -> Self {
        Self {
            id: EntityId::from(raw.id.as_str()),
            title: raw.title.clone(),
            courses: raw.courses.iter().map(entity_id).collect(),
            duration_months: raw.duration_months,
            price: raw.price,
        }
    }
}

impl From<&RawLiveClass> for LiveClass {
    fn from(raw: &RawLiveClass) -> Self {
        let starts_at = raw.start_time.as_deref().and_then(|value| {
            let parsed = parse_instant(value);
            if parsed.is_none() {
                warn!(class = %raw.id, start_time = value, "unparseable startTime");
            }
            parsed
        });
        let meeting_url = raw.meeting_url.as_deref().and_then(|value| value.parse().ok());

        Self {
            id: EntityId::from(raw.id.as_str()),
            title: raw.title.clone(),
            course: raw.course_id.as_ref().map(entity_id),
            starts_at,
            duration_minutes: raw.duration_minutes,
            meeting_url,
        }
    }
}
