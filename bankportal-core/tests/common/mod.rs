//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use bankportal_core::adapters::mock_backend::MockBackend;
use bankportal_core::adapters::ApiClient;
use bankportal_core::config::Config;
use bankportal_core::session::{AuthContext, Location};
use bankportal_core::{Role, User};
use serde_json::{json, Value as JsonValue};

pub fn config_for(server: &MockBackend) -> Config {
    Config {
        api_url: server.base_url(),
        timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

/// Client wired to `server`, plus the session handles it drives
pub fn client_for(server: &MockBackend) -> (Arc<ApiClient>, AuthContext, Location) {
    let auth = AuthContext::new();
    let location = Location::default();
    let client = ApiClient::new(&config_for(server), auth.clone(), Arc::new(location.clone()))
        .expect("client should build");
    (Arc::new(client), auth, location)
}

pub fn user_json(role: &str) -> JsonValue {
    json!({
        "email": "jane@example.com",
        "username": "jane",
        "firstName": "Jane",
        "lastName": "Doe",
        "dob": "1990-04-02",
        "phoneNumber": "+96170123456",
        "country": "LB",
        "city": "Beirut",
        "roleName": role
    })
}

pub fn user(role: Role) -> User {
    serde_json::from_value(user_json(role.as_str())).expect("fixture user")
}

/// A scan result carrying a document number and full country name
pub fn scan_json(document_number: &str, country_full: &str) -> JsonValue {
    json!({
        "data": {
            "documentNumber": [{ "value": document_number }],
            "countryFull": [{ "value": country_full }]
        }
    })
}
