// Live-class schedule endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::RawLiveClass;

impl ApiClient {
    /// Fetch the scheduled live classes.
    pub async fn list_live_classes(&self) -> Result<Vec<RawLiveClass>, Error> {
        self.get("live-classes").await
    }
}
