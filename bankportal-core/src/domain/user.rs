//! User domain model

use serde::{Deserialize, Serialize};

/// Role controlling which part of the portal a user may enter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

/// An authenticated portal user, as returned by `/auth/login` and `/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub phone_number: String,
    pub country: String,
    pub city: String,
    pub role_name: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role_name == Role::Admin
    }
}

/// Payload for creating a user (admin action)
///
/// `document_number` and `country_full` are filled in from the identity
/// scan right before submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub phone_number: String,
    pub country: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_full: Option<String>,
}

/// Partial update of a user, keyed by username
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub username: String,
    /// Rename the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl UpdateUser {
    /// Overlay the fields set in `other` onto `self`
    pub fn merge(&mut self, other: UpdateUser) {
        if !other.username.is_empty() {
            self.username = other.username;
        }
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(new_username, password, email, first_name, last_name, dob, phone_number, country, city);
    }

    pub fn is_empty(&self) -> bool {
        *self == UpdateUser::default()
    }

    /// Trim every optional field and drop the blank ones
    pub fn normalized(mut self) -> Self {
        macro_rules! tidy {
            ($($field:ident),*) => {
                $(self.$field = self.$field
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());)*
            };
        }
        tidy!(new_username, password, email, first_name, last_name, dob, phone_number, country, city);
        self
    }

    /// True when something besides the username would change
    pub fn has_changes(&self) -> bool {
        let key_only = UpdateUser {
            username: self.username.clone(),
            ..UpdateUser::default()
        };
        *self != key_only
    }
}

/// Credentials for `/auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Body of `/auth/reset-password`, built from the emailed reset link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub token: String,
    pub id: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUser {
    pub username: String,
}

/// Filters for the admin user table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// One page of the admin user table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl Default for UserPage {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            total: 0,
            page: 1,
            limit: 10,
            total_pages: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            email: "jane@example.com".into(),
            username: "jane".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            dob: "1990-04-02".into(),
            phone_number: "+96170123456".into(),
            country: "LB".into(),
            city: "Beirut".into(),
            role_name: Role::User,
        }
    }

    #[test]
    fn test_user_wire_format() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["roleName"], "User");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back.full_name(), "Jane Doe");
        assert!(!back.is_admin());
    }

    #[test]
    fn test_update_merge_keeps_unset_fields() {
        let mut form = UpdateUser {
            username: "jane".into(),
            city: Some("Beirut".into()),
            ..Default::default()
        };
        form.merge(UpdateUser {
            email: Some("new@example.com".into()),
            ..Default::default()
        });

        assert_eq!(form.username, "jane");
        assert_eq!(form.city.as_deref(), Some("Beirut"));
        assert_eq!(form.email.as_deref(), Some("new@example.com"));
    }

    #[test]
    fn test_update_normalization() {
        let form = UpdateUser {
            username: "jane".into(),
            first_name: Some("  Janet ".into()),
            city: Some("   ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(form.first_name.as_deref(), Some("Janet"));
        assert!(form.city.is_none());
        assert!(form.has_changes());

        let untouched = UpdateUser {
            username: "jane".into(),
            password: Some(" ".into()),
            ..Default::default()
        }
        .normalized();
        assert!(!untouched.has_changes());
    }

    #[test]
    fn test_update_skips_unset_fields_on_wire() {
        let form = UpdateUser {
            username: "jane".into(),
            city: Some("Tyre".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json, serde_json::json!({"username": "jane", "city": "Tyre"}));
    }
}
