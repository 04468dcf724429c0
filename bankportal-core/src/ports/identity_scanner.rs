//! Identity scanner port

use crate::domain::result::Result;
use crate::domain::{IdentityDocument, ScannedIdentity};

/// Reads the document number and country off a national ID image
///
/// `country` is the ISO code the user registered with; it steers the
/// scanner towards the right document template.
pub trait IdentityScanner: Send + Sync {
    fn scan(&self, document: &IdentityDocument, country: &str) -> Result<ScannedIdentity>;
}
