//! Admin user actions: the edit form and update/delete calls

use serde_json::Value as JsonValue;

use super::RequestState;
use crate::domain::result::Result;
use crate::domain::{DeleteUser, UpdateUser};
use crate::services::UserApi;

pub const UPDATE_FAILED: &str = "Failed to update user";
pub const DELETE_FAILED: &str = "Failed to delete user";

#[derive(Debug, Clone, Default)]
pub struct UserAdminSlice {
    pub update_form_data: UpdateUser,
    pub request: RequestState,
}

impl UserAdminSlice {
    /// Merge the set fields of `partial` into the edit form
    pub fn set_update_form_data(&mut self, partial: UpdateUser) {
        self.update_form_data.merge(partial);
    }

    pub fn reset_update_form_data(&mut self) {
        self.update_form_data = UpdateUser::default();
    }

    pub fn update_user(&mut self, api: &UserApi, update: &UpdateUser) -> Result<JsonValue> {
        self.request.track(UPDATE_FAILED, || api.update(update))
    }

    /// Delete a user, returning the deleted username
    pub fn delete_user(&mut self, api: &UserApi, user: &DeleteUser) -> Result<String> {
        self.request.track(DELETE_FAILED, || api.delete(user))?;
        Ok(user.username.clone())
    }
}
