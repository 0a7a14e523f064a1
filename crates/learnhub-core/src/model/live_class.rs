// ── Live-class domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::entity_id::EntityId;

/// A scheduled live session.
///
/// Purely display data: joining is gated by the access resolver on the
/// owning course, never by the schedule itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveClass {
    pub id: EntityId,
    pub title: String,
    pub course: Option<EntityId>,
    /// `None` when the backend sent an unparseable start time; such a
    /// class cannot be classified and is shown without a countdown.
    pub starts_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub meeting_url: Option<Url>,
}
