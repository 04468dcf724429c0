//! Route table and the role guard in front of it
//!
//! The guard is a convenience for the user; the backend enforces the real
//! authorization boundary on every request.

use std::sync::Arc;

use crate::domain::{Role, User};
use crate::ports::Navigator;

use super::AuthContext;

/// Every page the portal knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Chatbot,
    ForgotPassword,
    ResetPassword,
    AccessForbidden,
    AdminAnalytics,
    AdminCreateUser,
    AdminCreateAccount,
    AdminDebitCards,
    AdminDepositWithdraw,
    AdminUsers,
    AdminMessages,
    UserDashboard,
    UserTransactions,
    UserContactUs,
    UserAccounts,
    UserProfile,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 19] = [
        Route::Home,
        Route::Login,
        Route::Chatbot,
        Route::ForgotPassword,
        Route::ResetPassword,
        Route::AccessForbidden,
        Route::AdminAnalytics,
        Route::AdminCreateUser,
        Route::AdminCreateAccount,
        Route::AdminDebitCards,
        Route::AdminDepositWithdraw,
        Route::AdminUsers,
        Route::AdminMessages,
        Route::UserDashboard,
        Route::UserTransactions,
        Route::UserContactUs,
        Route::UserAccounts,
        Route::UserProfile,
        Route::NotFound,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::Login => "/login",
            Route::Chatbot => "/chatbot",
            Route::ForgotPassword => "/forgot-password",
            Route::ResetPassword => "/reset-password",
            Route::AccessForbidden => "/accessforbidden",
            Route::AdminAnalytics => "/admin/analytics",
            Route::AdminCreateUser => "/admin/create-user",
            Route::AdminCreateAccount => "/admin/create-account",
            Route::AdminDebitCards => "/admin/debit-cards",
            Route::AdminDepositWithdraw => "/admin/deposit-withdraw",
            Route::AdminUsers => "/admin/users",
            Route::AdminMessages => "/admin/messages",
            Route::UserDashboard => "/user/dashboard",
            Route::UserTransactions => "/user/transactions",
            Route::UserContactUs => "/user/contact-us",
            Route::UserAccounts => "/user/accounts",
            Route::UserProfile => "/user/profile",
            Route::NotFound => "/404",
        }
    }

    /// Resolve a path. `/` and the bare subtree roots map to their landing pages.
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        match path {
            "" | "/" => Route::Home,
            "/admin" => Route::AdminAnalytics,
            "/user" => Route::UserDashboard,
            _ => Route::ALL
                .iter()
                .copied()
                .find(|r| r.path() == path)
                .unwrap_or(Route::NotFound),
        }
    }

    /// Role needed to enter this route, if any
    pub fn required_role(&self) -> Option<Role> {
        let path = self.path();
        if path.starts_with("/admin/") {
            Some(Role::Admin)
        } else if path.starts_with("/user/") {
            Some(Role::User)
        } else {
            None
        }
    }
}

/// Outcome of asking the guard for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Granted(Route),
    Redirect(&'static str),
}

/// Decide access to `route` for `user`
///
/// No user: redirect to `/login`. Wrong role: redirect to `/`.
pub fn check_access(user: Option<&User>, route: Route) -> RouteAccess {
    let Some(required) = route.required_role() else {
        return RouteAccess::Granted(route);
    };
    match user {
        None => RouteAccess::Redirect(Route::Login.path()),
        Some(u) if u.role_name != required => RouteAccess::Redirect("/"),
        Some(_) => RouteAccess::Granted(route),
    }
}

/// Guards navigation using the shared auth context
pub struct RouteGuard {
    auth: AuthContext,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(auth: AuthContext, navigator: Arc<dyn Navigator>) -> Self {
        Self { auth, navigator }
    }

    /// Try to enter `path`, navigating to wherever the guard allows
    pub fn enter(&self, path: &str) -> RouteAccess {
        let route = Route::from_path(path);
        let access = check_access(self.auth.current().as_ref(), route);
        match access {
            RouteAccess::Granted(r) => self.navigator.navigate(r.path()),
            RouteAccess::Redirect(to) => {
                tracing::debug!(from = path, to, "route guard redirect");
                self.navigator.navigate(to)
            }
        }
        access
    }
}
