//! Login and password reset

use super::Outcome;
use crate::domain::validation::{validate_email, validate_password};
use crate::domain::{LoginPayload, PasswordReset, Role, User};
use crate::ports::Navigator;
use crate::services::AuthApi;
use crate::session::Route;
use crate::state::Alert;

/// Where a freshly logged-in user lands
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::User => "/user",
    }
}

pub fn login(api: &AuthApi, navigator: &dyn Navigator, payload: &LoginPayload) -> Outcome<User> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Outcome::rejected(Alert::warning("Please enter your username and password."));
    }
    match api.login(payload) {
        Ok(user) => {
            navigator.navigate(landing_path(user.role_name));
            Outcome::done(user, Alert::success("Login successful!"))
        }
        Err(e) => Outcome::failed(&e, "Login failed. Try again."),
    }
}

/// Ask for a reset email. The value is the reset link when the backend
/// hands one back directly.
pub fn request_reset(api: &AuthApi, email: &str) -> Outcome<Option<String>> {
    if let Err(msg) = validate_email(email) {
        return Outcome::rejected(Alert::error(msg));
    }
    match api.request_password_reset(email.trim()) {
        Ok(body) => {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .unwrap_or("Reset email sent successfully!")
                .to_string();
            let link = body.get("resetLink").and_then(|l| l.as_str()).map(str::to_string);
            Outcome::done(link, Alert::success(message))
        }
        Err(e) => Outcome::failed(&e, "Failed to process request."),
    }
}

/// Values of the reset form plus the `token`/`id` from the emailed link
#[derive(Debug, Clone, Default)]
pub struct ResetForm {
    pub token: Option<String>,
    pub id: Option<String>,
    pub new_password: String,
    pub confirm_password: String,
}

pub fn reset_password(api: &AuthApi, navigator: &dyn Navigator, form: ResetForm) -> Outcome<()> {
    let (Some(token), Some(id)) = (
        form.token.filter(|t| !t.is_empty()),
        form.id.filter(|i| !i.is_empty()),
    ) else {
        navigator.navigate(Route::AccessForbidden.path());
        return Outcome::rejected(Alert::error("The reset link is missing its token or id."));
    };
    if let Err(msg) = validate_password(&form.new_password) {
        return Outcome::rejected(Alert::error(msg));
    }
    if form.new_password != form.confirm_password {
        return Outcome::rejected(Alert::error("Passwords do not match"));
    }

    let reset = PasswordReset {
        token,
        id,
        new_password: form.new_password,
    };
    match api.reset_password(&reset) {
        Ok(_) => {
            navigator.navigate(Route::Login.path());
            Outcome::done((), Alert::success("Password reset successfully! Redirecting to login..."))
        }
        Err(e) => Outcome::failed(&e, "Failed to reset password"),
    }
}
