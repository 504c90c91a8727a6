//! User API operations.

use shopkeep_core::shop::UserProfile;

use super::EtsyClient;
use crate::error::Result;

impl EtsyClient {
    /// `GET /users/me` - profile of the token's owner.
    pub async fn get_me(&self, access_token: &str) -> Result<UserProfile> {
        let response = self.get("/users/me", access_token).send().await?;
        self.handle_response(response).await
    }
}
