//! User administration: create (with ID scan), update, delete

use serde_json::Value as JsonValue;

use super::Outcome;
use crate::domain::validation::{validate_password, validate_phone};
use crate::domain::{CreateUser, DeleteUser, IdentityDocument, UpdateUser};
use crate::ports::IdentityScanner;
use crate::services::UserApi;
use crate::state::user_admin::{DELETE_FAILED, UPDATE_FAILED};
use crate::state::{Alert, UserAdminSlice};

pub fn create(
    scanner: &dyn IdentityScanner,
    api: &UserApi,
    mut user: CreateUser,
    document: Option<&IdentityDocument>,
) -> Outcome<JsonValue> {
    if !user.password.is_empty() {
        if let Err(msg) = validate_password(&user.password) {
            return Outcome::rejected(Alert::error(msg));
        }
    }
    if !user.phone_number.is_empty() {
        if let Err(msg) = validate_phone(&user.phone_number) {
            return Outcome::rejected(Alert::error(msg));
        }
    }
    let Some(document) = document.filter(|d| !d.is_empty()) else {
        return Outcome::rejected(Alert::error("Please upload a National ID image."));
    };
    if user.country.trim().is_empty() {
        return Outcome::rejected(Alert::error("Please select a country before uploading ID."));
    }

    let identity = match scanner.scan(document, &user.country) {
        Ok(identity) => identity,
        Err(e) => return Outcome::failed(&e, "Failed to create user."),
    };
    user.document_number = Some(identity.document_number);
    user.country_full = Some(identity.country_full);

    match api.create(&user) {
        Ok(created) => Outcome::done(created, Alert::success("User created successfully!")),
        Err(e) => Outcome::failed(&e, "Failed to create user."),
    }
}

/// Save the edit form. Blank fields are left alone; with nothing to change
/// no request is made.
pub fn update(slice: &mut UserAdminSlice, api: &UserApi, form: UpdateUser) -> Outcome<JsonValue> {
    if form.username.trim().is_empty() {
        return Outcome::rejected(Alert::warning("Select a user to update."));
    }
    let form = form.normalized();
    if let Some(password) = &form.password {
        if let Err(msg) = validate_password(password) {
            return Outcome::rejected(Alert::error(msg));
        }
    }
    if !form.has_changes() {
        slice.reset_update_form_data();
        return Outcome::rejected(Alert::info("Nothing to update."));
    }

    let result = slice.update_user(api, &form);
    match result {
        Ok(body) => {
            slice.reset_update_form_data();
            Outcome::done(body, Alert::success("User updated successfully"))
        }
        Err(_) => Outcome::rejected(Alert::error(
            slice.request.error.clone().unwrap_or_else(|| UPDATE_FAILED.to_string()),
        )),
    }
}

pub fn delete(slice: &mut UserAdminSlice, api: &UserApi, username: &str) -> Outcome<String> {
    let request = DeleteUser {
        username: username.to_string(),
    };
    match slice.delete_user(api, &request) {
        Ok(deleted) => Outcome::done(deleted, Alert::success("User deleted successfully")),
        Err(_) => Outcome::rejected(Alert::error(
            slice.request.error.clone().unwrap_or_else(|| DELETE_FAILED.to_string()),
        )),
    }
}
