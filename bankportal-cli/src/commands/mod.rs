//! CLI command implementations

pub mod accounts;
pub mod analytics;
pub mod auth;
pub mod cards;
pub mod contact;
pub mod transactions;
pub mod users;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bankportal_core::domain::IdentityDocument;
use bankportal_core::search::SearchSelect;
use bankportal_core::ports::PageSource;
use bankportal_core::PortalContext;
use dialoguer::Confirm;

/// Get the portal directory from environment or default
pub fn get_portal_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BANKPORTAL_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".bankportal"))
}

/// Get the portal context, resuming the saved session
pub fn get_context() -> Result<PortalContext> {
    let portal_dir = get_portal_dir()?;
    std::fs::create_dir_all(&portal_dir)
        .with_context(|| format!("Failed to create portal directory: {:?}", portal_dir))?;

    PortalContext::new(&portal_dir).context("Failed to initialize portal context")
}

/// Run `f` with a context, then save (or drop) the session it left behind
///
/// The session is written even when `f` fails: a 401 inside `f` has logged
/// the user out and the stale session file must go.
pub fn with_context<T>(f: impl FnOnce(&mut PortalContext) -> Result<T>) -> Result<T> {
    let mut ctx = get_context()?;
    let result = f(&mut ctx);
    if let Err(e) = ctx.persist_session() {
        tracing::warn!(error = %e, "failed to save session");
    }
    result
}

/// Load an identity document image from disk
pub fn read_document(path: &Path) -> Result<IdentityDocument> {
    IdentityDocument::from_path(path).with_context(|| format!("Failed to read ID image {:?}", path))
}

/// Ask before a destructive action unless `--force` was given
pub fn confirm(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Load up to `pages` pages of a search field for `query`
pub fn search_options<T>(
    ctx: &PortalContext,
    source: &dyn PageSource<T>,
    query: &str,
    pages: u32,
) -> Result<(Vec<T>, u32)>
where
    T: Clone + Eq + std::hash::Hash,
{
    let now = std::time::Instant::now();
    let mut select: SearchSelect<T> = SearchSelect::new(ctx.config.page_size, ctx.config.debounce);
    select.open(now);
    select.set_search(query, now);
    select.drive_now(source)?;
    while select.page() < pages.max(1) && select.next_page(now) {
        select.drive_now(source)?;
    }
    Ok((select.options().to_vec(), select.total_pages()))
}
