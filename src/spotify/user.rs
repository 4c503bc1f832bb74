use super::SpotifyClient;
use crate::{error::ApiError, types::CurrentUser};

impl SpotifyClient {
    /// Resolves the Spotify user id of the logged-in account.
    pub async fn current_user_id(&self) -> Result<String, ApiError> {
        let request = self.http.get(self.endpoint("/me"));
        let user = self.send(request).await?.json::<CurrentUser>().await?;
        Ok(user.id)
    }
}
