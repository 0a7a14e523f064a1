// ── Order domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// What a purchase covers.
///
/// `Quarterly` is the all-access subscription: while current, it grants
/// every visible course regardless of per-course purchases. The name
/// comes from the billing period it was first sold under and survives
/// changes to the literal period.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlanType {
    Single,
    Quarterly,
    Kit,
    School,
    Combo,
}

/// Where a payment stands. Only `Approved` can ever contribute access.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

/// When an order stops granting access.
///
/// The three-state form encodes the fail-closed policy in the type:
/// a wire `endDate` of `null` becomes [`Lifetime`](Expiry::Lifetime) and
/// short-circuits every date comparison, while an unparseable string
/// becomes [`Invalid`](Expiry::Invalid) and behaves as already expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expiry {
    /// No expiry; outranks any `now`.
    Lifetime,
    /// Expires at this instant.
    At(DateTime<Utc>),
    /// The backend sent an expiry we could not parse. Never grants.
    Invalid,
}

impl Expiry {
    /// Whether the order is still in its access window at `now`.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Lifetime => true,
            Self::At(end) => *end > now,
            Self::Invalid => false,
        }
    }

    /// The expiry instant, if there is one to speak of.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(end) => Some(*end),
            Self::Lifetime | Self::Invalid => None,
        }
    }
}

/// A combo purchase's entitlement: the bundle id plus its course set.
///
/// `courses` is `None` when the backend returned the combo reference
/// without populating it. Such a grant contributes no access on its own;
/// the store hydrates it from the combo cache when possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboGrant {
    pub id: EntityId,
    pub courses: Option<Vec<EntityId>>,
}

impl ComboGrant {
    /// Whether this grant's resolved course set contains `course`.
    ///
    /// An unresolved set contains nothing (fail closed).
    pub fn contains(&self, course: &EntityId) -> bool {
        self.courses
            .as_deref()
            .is_some_and(|courses| courses.contains(course))
    }
}

/// A normalized purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub plan: PlanType,
    pub payment_status: PaymentStatus,
    /// Server-maintained activation flag; inactive orders grant nothing.
    pub active: bool,
    /// Present only for `PlanType::Single`.
    pub course: Option<EntityId>,
    /// Present only for `PlanType::Combo`.
    pub combo: Option<ComboGrant>,
    pub starts_at: Option<DateTime<Utc>>,
    pub expiry: Expiry,
}

impl Order {
    /// Approved, active, and inside the access window at `now`.
    ///
    /// This is the gate every grant rule shares; plan-specific matching
    /// happens on top of it.
    pub fn grants_at(&self, now: DateTime<Utc>) -> bool {
        self.payment_status == PaymentStatus::Approved
            && self.active
            && self.expiry.is_current(now)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn lifetime_outranks_any_now() {
        assert!(Expiry::Lifetime.is_current(at(2024)));
        assert!(Expiry::Lifetime.is_current(at(9999)));
    }

    #[test]
    fn dated_expiry_compares_against_now() {
        let expiry = Expiry::At(at(2025));
        assert!(expiry.is_current(at(2024)));
        assert!(!expiry.is_current(at(2026)));
    }

    #[test]
    fn invalid_expiry_never_current() {
        assert!(!Expiry::Invalid.is_current(at(1970)));
    }

    #[test]
    fn unresolved_combo_grant_contains_nothing() {
        let grant = ComboGrant {
            id: EntityId::from("cmb1"),
            courses: None,
        };
        assert!(!grant.contains(&EntityId::from("c1")));
    }

    #[test]
    fn plan_type_parses_wire_strings() {
        assert_eq!("quarterly".parse::<PlanType>().unwrap(), PlanType::Quarterly);
        assert_eq!("combo".parse::<PlanType>().unwrap(), PlanType::Combo);
        assert!("weekly".parse::<PlanType>().is_err());
    }
}
