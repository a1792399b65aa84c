//! Serialized search execution
//!
//! The backend session is shared mutable state, so the adapter owns it behind
//! a mutex and holds the lock for the whole reset → configure → execute →
//! drain sequence. At most one search is in flight per adapter.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::debug;

use crate::backend::SearchBackend;
use crate::convert::WideString;
use crate::error::Result;
use crate::materialize::materialize;
use crate::options::SearchOptions;
use crate::result::SearchResponse;

/// Search adapter owning a single backend session
pub struct SearchAdapter<B> {
    backend: Mutex<B>,
}

impl<B: SearchBackend> SearchAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
        }
    }

    /// Run one query against the backend and collect every returned row.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResponse> {
        let start = Instant::now();
        let query = WideString::new(query);

        let mut backend = self.lock();
        configure_session(&mut *backend, &query, options);
        backend.execute()?;
        let response = materialize(&*backend, options);

        debug!(
            "{} returned {} results in {}ms",
            backend.name(),
            response.total_results,
            start.elapsed().as_millis()
        );

        Ok(response)
    }

    /// Translate a raw option map, then search.
    pub fn search_with_map(&self, query: &str, options: &Map<String, Value>) -> Result<SearchResponse> {
        self.search(query, &SearchOptions::from_map(options))
    }

    pub fn backend_name(&self) -> &'static str {
        self.lock().name()
    }

    pub fn is_available(&self) -> bool {
        self.lock().is_available()
    }

    pub fn status_description(&self) -> String {
        self.lock().status_description()
    }

    /// Inspect the backend while holding the session lock
    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        let backend = self.lock();
        f(&*backend)
    }

    pub fn into_inner(self) -> B {
        self.backend.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Every search starts with a reset, so a panic mid-search cannot leak state
    fn lock(&self) -> MutexGuard<'_, B> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reset the session and apply `options`, leaving it ready to execute.
///
/// Order: reset, offset, max, match case, whole word, match path, regex,
/// sort, request fields, query text. Flags are only sent when set.
pub fn configure_session<B: SearchBackend + ?Sized>(
    backend: &mut B,
    query: &WideString,
    options: &SearchOptions,
) {
    backend.reset();

    if options.offset > 0 {
        backend.set_offset(options.offset);
    }

    if let Some(limit) = options.limit {
        backend.set_max(limit);
    }

    if options.match_case {
        backend.set_match_case(true);
    }

    if options.effective_match_whole_word() {
        backend.set_match_whole_word(true);
    }

    if options.match_path {
        backend.set_match_path(true);
    }

    if options.enable_regex {
        backend.set_regex(true);
    }

    let sort = options.sort_mode();
    let fields = options.request_fields();
    backend.set_sort(sort);
    backend.set_request_fields(fields);
    backend.set_search(query);

    debug!(
        "Configured {} session: offset={}, limit={:?}, sort={}, fields={:?}",
        backend.name(),
        options.offset,
        options.limit,
        sort,
        fields
    );
}
