// Order endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::RawOrder;

impl ApiClient {
    /// Fetch the signed-in user's full order history.
    ///
    /// Requires a bearer session; the backend scopes the result to the
    /// token's owner.
    pub async fn my_orders(&self) -> Result<Vec<RawOrder>, Error> {
        self.get("orders/my").await
    }
}
