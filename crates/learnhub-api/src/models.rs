// Wire-format DTOs.
//
// These structs mirror the backend's JSON exactly, duck-typing included:
// reference fields arrive either as a bare id string or as a populated
// document, depending on whether the backend ran its join. Plan and
// payment fields stay as raw strings here -- `learnhub-core` normalizes
// them into closed enums at the ingestion boundary.

use serde::Deserialize;

/// Standard response envelope: `{ "success": bool, "message": str, "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// A reference field that is either a bare id or a populated document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdRef {
    Id(String),
    Doc {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl IdRef {
    /// The referenced id, regardless of wire shape.
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Doc { id } => id,
        }
    }
}

/// `comboId` -- like [`IdRef`], but a populated combo document carries its
/// course list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawComboRef {
    Id(String),
    Doc(RawComboDoc),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComboDoc {
    #[serde(rename = "_id")]
    pub id: String,
    /// Absent when the backend returned the combo without populating it.
    #[serde(default)]
    pub courses: Option<Vec<IdRef>>,
}

/// A purchase record, as returned by `GET /api/orders/my`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub plan_type: String,
    pub payment_status: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub course_id: Option<IdRef>,
    #[serde(default)]
    pub combo_id: Option<RawComboRef>,
    #[serde(default)]
    pub start_date: Option<String>,
    /// ISO instant, or `null`/absent for lifetime access.
    #[serde(default)]
    pub end_date: Option<String>,
}

/// A catalog course, as returned by `GET /api/courses`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_admin_approved: bool,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub instructor_name: Option<String>,
}

/// A course bundle, as returned by `GET /api/combos`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCombo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub courses: Vec<IdRef>,
    /// Absent means the bundle grants lifetime access.
    #[serde(default)]
    pub duration_months: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// A scheduled live class, as returned by `GET /api/live-classes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLiveClass {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub course_id: Option<IdRef>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub meeting_url: Option<String>,
}
