// ── Combo domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A fixed bundle of courses sold as one purchase.
///
/// A combo has its own duration and price, independent of the member
/// courses' individual prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub id: EntityId,
    pub title: String,
    pub courses: Vec<EntityId>,
    /// `None` means the bundle grants lifetime access.
    pub duration_months: Option<u32>,
    pub price: Option<f64>,
}

impl Combo {
    pub fn contains(&self, course: &EntityId) -> bool {
        self.courses.contains(course)
    }
}
