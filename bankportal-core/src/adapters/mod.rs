//! Adapter implementations
//!
//! Adapters connect the core to the outside world:
//! - `http`: the cookie-session REST client with the 401 interceptor
//! - `graphql`: GraphQL requests over the same client
//! - `identity`: identity scanning via the backend proxy
//! - `session_store`: the session file used by the CLI
//! - `mock_backend`: an in-process backend for tests

pub mod graphql;
pub mod http;
pub mod identity;
pub mod mock_backend;
pub mod session_store;

pub use graphql::GraphQlClient;
pub use http::ApiClient;
pub use identity::BackendIdentityScanner;
pub use session_store::{SessionStore, StoredSession};
