//! Paginated list port - the backend side of a search field

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

/// One request for a page of options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

/// One page of options plus the total page count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_pages: u32) -> Self {
        Self { items, total_pages }
    }
}

/// A searchable, paginated list of options
pub trait PageSource<T> {
    fn fetch_page(&self, query: &PageQuery) -> Result<Page<T>>;
}
