//! Current user profile slice

use super::RequestState;
use crate::domain::result::Result;
use crate::domain::User;
use crate::services::AuthApi;

#[derive(Debug, Clone, Default)]
pub struct UserProfileSlice {
    pub user: Option<User>,
    pub request: RequestState,
}

impl UserProfileSlice {
    /// Load the signed-in user's profile from `/auth/me`
    pub fn get_user_profile(&mut self, api: &AuthApi) -> Result<&User> {
        let user = self.request.track("Failed to load profile", || api.me())?;
        Ok(self.user.insert(user))
    }
}
