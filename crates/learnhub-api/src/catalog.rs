// Catalog endpoints: courses and combos.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{RawCombo, RawCourse};

impl ApiClient {
    /// Fetch the course catalog.
    ///
    /// The backend returns every course regardless of its publication
    /// state; visibility filtering (`isPublished && isAdminApproved`)
    /// happens in the domain layer.
    pub async fn list_courses(&self) -> Result<Vec<RawCourse>, Error> {
        self.get("courses").await
    }

    /// Fetch a single course by id.
    pub async fn get_course(&self, id: &str) -> Result<RawCourse, Error> {
        self.get(&format!("courses/{id}")).await
    }

    /// Fetch all course bundles.
    pub async fn list_combos(&self) -> Result<Vec<RawCombo>, Error> {
        self.get("combos").await
    }

    /// Fetch a single combo by id, with its course list populated.
    pub async fn get_combo(&self, id: &str) -> Result<RawCombo, Error> {
        self.get(&format!("combos/{id}")).await
    }
}
