//! Port definitions (hexagonal architecture)
//!
//! Ports are the seams where the core talks to things it does not own: the
//! router that shows a page, the service that reads identity documents, and
//! the paginated lists behind search fields.

mod identity_scanner;
mod navigator;
mod page_source;

pub use identity_scanner::IdentityScanner;
pub use navigator::Navigator;
pub use page_source::{Page, PageQuery, PageSource};
