//! Paginated search-select
//!
//! State machine behind a search field whose options load page by page as
//! the list is scrolled. Typing resets to page 1 and is debounced; scrolling
//! near the bottom asks for the next page; responses for anything but the
//! latest request are dropped.
//!
//! The machine does no I/O and reads no clock. Callers feed it events with
//! the current [`Instant`], take the [`PageRequest`] it emits from [`poll`],
//! run it against a [`PageSource`], and hand the result back with [`apply`].
//!
//! [`poll`]: SearchSelect::poll
//! [`apply`]: SearchSelect::apply

mod sources;

use std::collections::HashSet;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::domain::result::Result;
use crate::ports::{Page, PageQuery, PageSource};

pub use sources::{AccountNbsExcept, AllAccountNbs, CardHolders, Usernames};

/// Distance from the bottom of the list, in pixels, that counts as "at the end"
pub const SCROLL_THRESHOLD_PX: f64 = 5.0;

/// A fetch the caller should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<S> {
    pub token: u64,
    pub query: PageQuery,
    pub scope: Option<S>,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    token: u64,
    page: u32,
}

/// Search field with lazily paged options
///
/// `S` is an optional scope the options depend on, such as the sender
/// account excluded from the receiver list. A scoped select without a scope
/// has no options and never fetches.
#[derive(Debug, Clone)]
pub struct SearchSelect<T, S = ()> {
    search: String,
    page: u32,
    total_pages: u32,
    options: Vec<T>,
    loading: bool,
    page_size: u32,
    debounce: Duration,
    requires_scope: bool,
    scope: Option<S>,
    due: Option<Instant>,
    next_token: u64,
    in_flight: Option<InFlight>,
}

impl<T, S> SearchSelect<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + PartialEq,
{
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        Self {
            search: String::new(),
            page: 1,
            total_pages: 1,
            options: Vec::new(),
            loading: false,
            page_size: page_size.max(1),
            debounce,
            requires_scope: false,
            scope: None,
            due: None,
            next_token: 0,
            in_flight: None,
        }
    }

    /// A select whose options only exist once a scope is set
    pub fn scoped(page_size: u32, debounce: Duration) -> Self {
        Self {
            requires_scope: true,
            ..Self::new(page_size, debounce)
        }
    }

    // === Accessors ===

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn scope(&self) -> Option<&S> {
        self.scope.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// A fetch is waiting for its debounce to run out
    pub fn is_scheduled(&self) -> bool {
        self.due.is_some()
    }

    // === Events ===

    /// Initial load when the field is first shown
    pub fn open(&mut self, now: Instant) {
        self.schedule(now);
    }

    /// The user typed. Any change goes back to page 1.
    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if text == self.search && self.page == 1 {
            return;
        }
        self.search = text;
        self.page = 1;
        self.schedule(now);
    }

    /// The list was scrolled. Returns true when this asked for another page.
    ///
    /// Ignored while a fetch is pending or loading: `total_pages` still
    /// describes the previous query until page 1 of the new one lands.
    pub fn on_scroll(&mut self, scroll_top: f64, client_height: f64, scroll_height: f64, now: Instant) -> bool {
        let at_bottom = scroll_top + client_height >= scroll_height - SCROLL_THRESHOLD_PX;
        if !at_bottom || self.loading || self.is_scheduled() || !self.has_more() {
            return false;
        }
        self.page += 1;
        self.schedule(now);
        true
    }

    /// Shortcut for hosts without scroll geometry: behave as if the list hit
    /// the bottom.
    pub fn next_page(&mut self, now: Instant) -> bool {
        self.on_scroll(0.0, 0.0, 0.0, now)
    }

    /// Focus left without a selection: back to an empty search on page 1.
    /// Options already loaded stay until the reload replaces them.
    pub fn on_blur(&mut self, now: Instant) {
        if self.search.is_empty() && self.page == 1 {
            return;
        }
        self.search.clear();
        self.page = 1;
        self.schedule(now);
    }

    /// Change the scope; behaves like a new query
    pub fn set_scope(&mut self, scope: Option<S>, now: Instant) {
        if scope == self.scope {
            return;
        }
        self.scope = scope;
        self.search.clear();
        self.page = 1;
        self.schedule(now);
    }

    // === Fetch cycle ===

    /// Emit the pending request once its debounce has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<PageRequest<S>> {
        match self.due {
            Some(due) if now >= due => self.issue(),
            _ => None,
        }
    }

    /// Emit the pending request now, ignoring the debounce
    pub fn flush(&mut self) -> Option<PageRequest<S>> {
        self.due?;
        self.issue()
    }

    /// Store a response. Returns false when it was stale and dropped.
    pub fn apply(&mut self, token: u64, page: Page<T>) -> bool {
        let Some(in_flight) = self.in_flight.filter(|f| f.token == token) else {
            tracing::debug!(token, "discarding stale page");
            return false;
        };
        self.in_flight = None;
        self.loading = false;
        self.total_pages = page.total_pages.max(1);

        if in_flight.page == 1 {
            self.options.clear();
        }
        let mut seen: HashSet<T> = self.options.iter().cloned().collect();
        for item in page.items {
            if seen.insert(item.clone()) {
                self.options.push(item);
            }
        }
        true
    }

    /// Record a failed fetch; options are left as they were
    pub fn fail(&mut self, token: u64) -> bool {
        if self.in_flight.map(|f| f.token) != Some(token) {
            return false;
        }
        self.in_flight = None;
        self.loading = false;
        true
    }

    /// Run a due request against `source`. Returns whether a page was applied.
    pub fn drive(&mut self, source: &dyn PageSource<T>, now: Instant) -> Result<bool> {
        match self.poll(now) {
            Some(request) => self.run(source, request),
            None => Ok(false),
        }
    }

    /// Like [`drive`](Self::drive) without waiting for the debounce
    pub fn drive_now(&mut self, source: &dyn PageSource<T>) -> Result<bool> {
        match self.flush() {
            Some(request) => self.run(source, request),
            None => Ok(false),
        }
    }

    fn run(&mut self, source: &dyn PageSource<T>, request: PageRequest<S>) -> Result<bool> {
        match source.fetch_page(&request.query) {
            Ok(page) => Ok(self.apply(request.token, page)),
            Err(e) => {
                tracing::error!(error = %e, page = request.query.page, "error fetching options");
                self.fail(request.token);
                Err(e)
            }
        }
    }

    fn schedule(&mut self, now: Instant) {
        // Whatever was in flight answers a question nobody is asking anymore
        self.in_flight = None;
        self.loading = false;

        if self.requires_scope && self.scope.is_none() {
            self.due = None;
            self.options.clear();
            self.total_pages = 1;
            return;
        }
        self.due = Some(now + self.debounce);
    }

    fn issue(&mut self) -> Option<PageRequest<S>> {
        self.due = None;
        self.next_token += 1;
        let token = self.next_token;
        self.in_flight = Some(InFlight { token, page: self.page });
        self.loading = true;
        Some(PageRequest {
            token,
            query: PageQuery {
                page: self.page,
                limit: self.page_size,
                search: self.search.clone(),
            },
            scope: self.scope.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const DEBOUNCE: Duration = Duration::from_millis(400);

    fn select() -> SearchSelect<u64> {
        SearchSelect::new(5, DEBOUNCE)
    }

    #[test]
    fn test_debounce_coalesces_keystrokes() {
        let t0 = Instant::now();
        let mut s = select();
        s.set_search("1", t0);
        s.set_search("10", t0 + Duration::from_millis(100));
        s.set_search("100", t0 + Duration::from_millis(200));

        assert!(s.poll(t0 + Duration::from_millis(500)).is_none());
        let request = s.poll(t0 + Duration::from_millis(600)).unwrap();
        assert_eq!(request.query.search, "100");
        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.limit, 5);
        assert!(s.poll(t0 + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn test_pages_append_without_duplicates() {
        let t0 = Instant::now();
        let mut s = select();
        s.open(t0);
        let r1 = s.flush().unwrap();
        assert!(s.apply(r1.token, Page::new(vec![1, 2, 3, 4, 5], 3)));

        assert!(s.on_scroll(95.0, 100.0, 200.0, t0));
        let r2 = s.flush().unwrap();
        assert_eq!(r2.query.page, 2);
        assert!(s.apply(r2.token, Page::new(vec![5, 6, 2, 7, 7], 3)));

        assert_eq!(s.options(), &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_scroll_rules() {
        let t0 = Instant::now();
        let mut s = select();
        s.open(t0);
        let r = s.flush().unwrap();

        // Loading blocks paging
        assert!(!s.on_scroll(100.0, 100.0, 200.0, t0));
        s.apply(r.token, Page::new(vec![1], 2));

        // Not near the bottom
        assert!(!s.on_scroll(90.0, 100.0, 200.0, t0));
        // Within 5px
        assert!(s.on_scroll(95.0, 100.0, 200.0, t0));
        let r = s.flush().unwrap();
        s.apply(r.token, Page::new(vec![2], 2));

        // Last page reached
        assert!(!s.on_scroll(100.0, 100.0, 200.0, t0));
    }

    #[test]
    fn test_scroll_before_debounce_fires_keeps_page_one() {
        let t0 = Instant::now();
        let mut s = select();
        s.open(t0);
        let r = s.flush().unwrap();
        s.apply(r.token, Page::new(vec![1, 2, 3, 4, 5], 3));

        s.set_search("9", t0);
        assert!(!s.on_scroll(100.0, 100.0, 200.0, t0));

        let r = s.poll(t0 + DEBOUNCE).unwrap();
        assert_eq!(r.query.page, 1);
        assert_eq!(r.query.search, "9");
        s.apply(r.token, Page::new(vec![96, 97], 1));
        assert_eq!(s.options(), &[96, 97]);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let t0 = Instant::now();
        let mut s = select();
        s.set_search("1", t0);
        let old = s.flush().unwrap();

        s.set_search("12", t0 + Duration::from_millis(10));
        let new = s.flush().unwrap();
        assert!(new.token > old.token);

        assert!(s.apply(new.token, Page::new(vec![12], 1)));
        assert!(!s.apply(old.token, Page::new(vec![1, 10, 11], 1)));
        assert_eq!(s.options(), &[12]);
    }

    #[test]
    fn test_response_after_query_change_is_discarded() {
        let t0 = Instant::now();
        let mut s = select();
        s.set_search("1", t0);
        let old = s.flush().unwrap();

        // New keystroke before the old answer came back; new fetch still debouncing
        s.set_search("12", t0 + Duration::from_millis(10));
        assert!(!s.apply(old.token, Page::new(vec![1], 1)));
        assert!(s.options().is_empty());
    }

    #[test]
    fn test_page_one_replaces() {
        let t0 = Instant::now();
        let mut s = select();
        s.open(t0);
        let r = s.flush().unwrap();
        s.apply(r.token, Page::new(vec![1, 2], 1));

        s.set_search("3", t0);
        let r = s.flush().unwrap();
        s.apply(r.token, Page::new(vec![3], 1));
        assert_eq!(s.options(), &[3]);
    }

    #[test]
    fn test_blur_resets_query_but_keeps_options() {
        let t0 = Instant::now();
        let mut s = select();
        s.set_search("7", t0);
        let r = s.flush().unwrap();
        s.apply(r.token, Page::new(vec![7, 70], 2));
        s.next_page(t0);
        let r = s.flush().unwrap();
        s.apply(r.token, Page::new(vec![71], 2));

        s.on_blur(t0);
        assert_eq!(s.search(), "");
        assert_eq!(s.page(), 1);
        assert_eq!(s.options(), &[7, 70, 71]);
        assert!(s.is_scheduled());
    }

    #[test]
    fn test_scope_change() {
        let t0 = Instant::now();
        let mut s: SearchSelect<u64, u64> = SearchSelect::scoped(5, DEBOUNCE);

        // No sender selected yet: nothing to fetch
        s.open(t0);
        assert!(s.flush().is_none());

        s.set_scope(Some(1001), t0);
        let r = s.flush().unwrap();
        assert_eq!(r.scope, Some(1001));
        s.apply(r.token, Page::new(vec![1002, 1003], 1));

        s.set_search("100", t0);
        s.set_scope(Some(1002), t0);
        assert_eq!(s.search(), "");
        let r = s.flush().unwrap();
        assert_eq!(r.scope, Some(1002));
        assert_eq!(r.query.page, 1);

        s.set_scope(None, t0);
        assert!(s.options().is_empty());
        assert!(!s.apply(r.token, Page::new(vec![1001], 1)));
    }

    struct Recorder {
        queries: RefCell<Vec<PageQuery>>,
    }

    impl PageSource<u64> for Recorder {
        fn fetch_page(&self, query: &PageQuery) -> Result<Page<u64>> {
            self.queries.borrow_mut().push(query.clone());
            let start = (query.page as u64 - 1) * 2;
            Ok(Page::new(vec![start, start + 1], 2))
        }
    }

    #[test]
    fn test_drive_waits_for_debounce() {
        let t0 = Instant::now();
        let source = Recorder { queries: RefCell::new(Vec::new()) };
        let mut s = select();
        s.set_search("x", t0);

        assert!(!s.drive(&source, t0).unwrap());
        assert!(source.queries.borrow().is_empty());

        assert!(s.drive(&source, t0 + DEBOUNCE).unwrap());
        s.next_page(t0);
        assert!(s.drive_now(&source).unwrap());
        assert_eq!(s.options(), &[0, 1, 2, 3]);
        assert_eq!(source.queries.borrow().len(), 2);
    }
}
