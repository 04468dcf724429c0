//! Portal context wiring and session persistence across runs
//!
//! Run with: cargo test --test context_test

mod common;

use bankportal_core::adapters::mock_backend::{MockBackend, MockResponse};
use bankportal_core::domain::LoginPayload;
use bankportal_core::session::RouteAccess;
use bankportal_core::{workflows, PortalContext};
use serde_json::json;
use tempfile::TempDir;

use common::{config_for, user_json};

fn login_route(server: &MockBackend, role: &str) {
    server.route(
        "POST",
        "/auth/login",
        MockResponse::ok(json!({ "data": user_json(role) }))
            .with_header("Set-Cookie", "access_token=tok-1; Path=/; HttpOnly"),
    );
}

fn credentials() -> LoginPayload {
    LoginPayload {
        username: "jane".into(),
        password: "Secret#123".into(),
    }
}

#[test]
fn test_login_lands_on_role_home() {
    let server = MockBackend::start().unwrap();
    login_route(&server, "Admin");
    let temp_dir = TempDir::new().unwrap();
    let ctx = PortalContext::with_config(config_for(&server), temp_dir.path()).unwrap();

    let outcome = workflows::auth::login(&ctx.auth_api, &ctx.location, &credentials());

    assert!(outcome.is_success());
    assert_eq!(outcome.alert.messages, vec!["Login successful!".to_string()]);
    assert_eq!(ctx.location.path(), "/admin");
    assert!(ctx.auth.current().unwrap().is_admin());
}

#[test]
fn test_user_login_lands_on_user_home() {
    let server = MockBackend::start().unwrap();
    login_route(&server, "User");
    let temp_dir = TempDir::new().unwrap();
    let ctx = PortalContext::with_config(config_for(&server), temp_dir.path()).unwrap();

    let outcome = workflows::auth::login(&ctx.auth_api, &ctx.location, &credentials());

    assert!(outcome.is_success());
    assert_eq!(ctx.location.path(), "/user");
    assert!(!ctx.auth.current().unwrap().is_admin());
}

#[test]
fn test_session_survives_restart() {
    let server = MockBackend::start().unwrap();
    login_route(&server, "User");
    server.route("GET", "/auth/me", MockResponse::ok(json!({ "data": { "user": user_json("User") } })));
    let temp_dir = TempDir::new().unwrap();

    {
        let ctx = PortalContext::with_config(config_for(&server), temp_dir.path()).unwrap();
        ctx.auth_api.login(&credentials()).unwrap();
        ctx.persist_session().unwrap();
        assert!(ctx.session_store.path().exists());
    }

    let ctx = PortalContext::with_config(config_for(&server), temp_dir.path()).unwrap();
    assert_eq!(ctx.auth.current().unwrap().username, "jane");

    ctx.auth_api.me().unwrap();
    let me = &server.requests_to("GET", "/auth/me")[0];
    assert!(me.header("cookie").unwrap_or_default().contains("access_token=tok-1"));
}

#[test]
fn test_expired_session_removes_saved_file() {
    let server = MockBackend::start().unwrap();
    login_route(&server, "User");
    server
        .route("GET", "/transactions/getRecentUserTrans", MockResponse::json(401, json!({ "message": "jwt expired" })))
        .route("POST", "/auth/logout", MockResponse::ok(json!({})));
    let temp_dir = TempDir::new().unwrap();

    let ctx = PortalContext::with_config(config_for(&server), temp_dir.path()).unwrap();
    ctx.auth_api.login(&credentials()).unwrap();
    ctx.persist_session().unwrap();

    assert!(ctx.transaction_api.recent().is_err());
    assert_eq!(ctx.location.path(), "/login");

    ctx.persist_session().unwrap();
    assert!(!ctx.session_store.path().exists());
}

#[test]
fn test_session_for_other_backend_is_ignored() {
    let first = MockBackend::start().unwrap();
    let second = MockBackend::start().unwrap();
    login_route(&first, "User");
    let temp_dir = TempDir::new().unwrap();

    let ctx = PortalContext::with_config(config_for(&first), temp_dir.path()).unwrap();
    ctx.auth_api.login(&credentials()).unwrap();
    ctx.persist_session().unwrap();

    let other = PortalContext::with_config(config_for(&second), temp_dir.path()).unwrap();
    assert!(other.auth.current().is_none());
}

#[test]
fn test_route_guard_follows_auth_context() {
    let server = MockBackend::start().unwrap();
    login_route(&server, "User");
    let temp_dir = TempDir::new().unwrap();
    let ctx = PortalContext::with_config(config_for(&server), temp_dir.path()).unwrap();
    let guard = ctx.route_guard();

    assert_eq!(guard.enter("/user/accounts"), RouteAccess::Redirect("/login"));
    assert_eq!(ctx.location.path(), "/login");

    ctx.auth_api.login(&credentials()).unwrap();
    assert!(matches!(guard.enter("/user/accounts"), RouteAccess::Granted(_)));
    assert_eq!(guard.enter("/admin/users"), RouteAccess::Redirect("/"));
    assert_eq!(ctx.location.path(), "/");
}
