//! Session state shared between the HTTP layer and the route guard
//!
//! Both types are cheap handles around shared state; clone them to hand the
//! same session to several components.

mod routes;

use std::sync::{Arc, Mutex, RwLock};

use crate::domain::User;
use crate::ports::Navigator;

pub use routes::{check_access, Route, RouteAccess, RouteGuard};

/// Holds the currently signed-in user
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Arc<RwLock<Option<User>>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that starts signed in, e.g. from a persisted session
    pub fn with_user(user: User) -> Self {
        let ctx = Self::new();
        ctx.set_user(user);
        ctx
    }

    pub fn current(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_user(&self, user: User) {
        *self.user.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(user);
    }

    pub fn clear(&self) {
        *self.user.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }
}

/// The client's current route
#[derive(Debug, Clone)]
pub struct Location {
    path: Arc<Mutex<String>>,
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/home")
    }
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Arc::new(Mutex::new(path.into())),
        }
    }

    pub fn path(&self) -> String {
        self.path
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Navigator for Location {
    fn navigate(&self, route: &str) {
        tracing::debug!(route, "navigate");
        *self.path.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = route.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    pub(crate) fn user_with_role(role: Role) -> User {
        User {
            email: "jane@example.com".into(),
            username: "jane".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            dob: "1990-04-02".into(),
            phone_number: "+96170123456".into(),
            country: "LB".into(),
            city: "Beirut".into(),
            role_name: role,
        }
    }

    #[test]
    fn test_auth_context_shared_between_clones() {
        let ctx = AuthContext::new();
        let other = ctx.clone();
        assert!(!other.is_authenticated());

        ctx.set_user(user_with_role(Role::User));
        assert_eq!(other.current().unwrap().username, "jane");

        other.clear();
        assert!(ctx.current().is_none());
    }

    #[test]
    fn test_location_navigate() {
        let location = Location::default();
        assert_eq!(location.path(), "/home");

        let handle = location.clone();
        handle.navigate("/login");
        assert_eq!(location.path(), "/login");
    }
}
