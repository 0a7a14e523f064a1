// ── Course domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A catalog course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: EntityId,
    pub title: String,
    /// Set by the instructor when the course is ready.
    pub published: bool,
    /// Set by an admin after review. Both flags gate visibility.
    pub admin_approved: bool,
    /// Catalog price in the backend's currency unit. Display only.
    pub price: Option<f64>,
    pub instructor: Option<String>,
}

impl Course {
    /// Whether any user may see this course in the catalog.
    ///
    /// Visibility is orthogonal to access: a quarterly subscription
    /// grants every *visible* course, and an invisible course stays
    /// hidden even from users holding a single-course order for it.
    pub fn is_visible(&self) -> bool {
        self.published && self.admin_approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(published: bool, admin_approved: bool) -> Course {
        Course {
            id: EntityId::from("c1"),
            title: "Algebra I".into(),
            published,
            admin_approved,
            price: None,
            instructor: None,
        }
    }

    #[test]
    fn visible_requires_both_flags() {
        assert!(course(true, true).is_visible());
        assert!(!course(true, false).is_visible());
        assert!(!course(false, true).is_visible());
        assert!(!course(false, false).is_visible());
    }
}
