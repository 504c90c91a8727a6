//! Shop API operations.

use super::EtsyClient;
use crate::error::Result;

impl EtsyClient {
    /// `GET /users/{user_id}/shops` - returned as-is; its shape varies.
    pub async fn get_user_shops(
        &self,
        access_token: &str,
        user_id: u64,
    ) -> Result<serde_json::Value> {
        let response = self
            .get(&format!("/users/{user_id}/shops"), access_token)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
