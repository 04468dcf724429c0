//! Bank Portal Core - client library for the bank portal backend
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: wire types and client-side validation rules
//! - **ports**: seams to things the core does not own (routing, ID scanning, paged lists)
//! - **adapters**: the HTTP/GraphQL clients, identity scanning, session file, mock backend
//! - **services**: one API per backend resource
//! - **state**: the store slices and alert state
//! - **search**: the paginated search-select
//! - **workflows**: what each form does on submit
//! - **session**: auth context, location and the route guard

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod search;
pub mod services;
pub mod session;
pub mod state;
pub mod workflows;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::{ApiClient, BackendIdentityScanner, GraphQlClient, SessionStore, StoredSession};
use config::Config;
use services::*;
use session::{AuthContext, Location, RouteGuard};
use state::Store;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{AccountInfo, AccountNb, Role, User};

/// Main context for portal operations
///
/// Owns the configured HTTP client, the shared session handles, and one
/// instance of every API. Everything is wired explicitly here; nothing is
/// global.
pub struct PortalContext {
    pub config: Config,
    pub auth: AuthContext,
    pub location: Location,
    pub api: Arc<ApiClient>,
    pub session_store: SessionStore,
    pub store: Store,
    pub auth_api: AuthApi,
    pub account_api: AccountApi,
    pub user_api: UserApi,
    pub transaction_api: TransactionApi,
    pub debit_card_api: DebitCardApi,
    pub contact_api: ContactApi,
    pub assistant_api: AssistantApi,
    pub analytics_api: AnalyticsApi,
    pub scanner: BackendIdentityScanner,
}

impl PortalContext {
    /// Create a context from the settings in `portal_dir`, resuming any
    /// saved session
    pub fn new(portal_dir: &Path) -> Result<Self> {
        let config = Config::load(portal_dir)?;
        Self::with_config(config, portal_dir)
    }

    pub fn with_config(config: Config, portal_dir: &Path) -> Result<Self> {
        let auth = AuthContext::new();
        let location = Location::default();
        let api = Arc::new(ApiClient::new(&config, auth.clone(), Arc::new(location.clone()))?);
        let graphql = GraphQlClient::new(Arc::clone(&api));

        let session_store = SessionStore::new(portal_dir);
        if let Some(saved) = session_store.load(&config.api_url)? {
            if let Some(cookies) = &saved.cookies {
                api.restore_cookies(cookies);
            }
            if let Some(user) = saved.user {
                auth.set_user(user);
            }
        }

        Ok(Self {
            auth_api: AuthApi::new(Arc::clone(&api)),
            account_api: AccountApi::new(Arc::clone(&api)),
            user_api: UserApi::new(Arc::clone(&api)),
            transaction_api: TransactionApi::new(Arc::clone(&api)),
            debit_card_api: DebitCardApi::new(graphql.clone()),
            contact_api: ContactApi::new(graphql),
            assistant_api: AssistantApi::new(Arc::clone(&api)),
            analytics_api: AnalyticsApi::new(Arc::clone(&api)),
            scanner: BackendIdentityScanner::new(Arc::clone(&api)),
            store: Store::new(),
            session_store,
            config,
            auth,
            location,
            api,
        })
    }

    /// Guard that checks routes against the current user
    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new(self.auth.clone(), Arc::new(self.location.clone()))
    }

    /// Write the session to disk, or remove it once the user is gone
    /// (logout, or a 401 that logged the session out)
    pub fn persist_session(&self) -> Result<()> {
        match self.auth.current() {
            Some(user) => {
                let session = StoredSession::new(
                    self.config.api_url.clone(),
                    self.api.session_cookies(),
                    Some(user),
                );
                self.session_store.save(&session)?;
            }
            None => self.session_store.clear()?,
        }
        Ok(())
    }
}
