//! Backend abstraction
//!
//! A backend is a session-oriented search engine: reset its state, configure
//! it, execute, then read rows through an indexable result cursor. The
//! adapter owns the backend and serializes access, so implementations can
//! assume a single caller at a time.

use thiserror::Error;

use crate::convert::{FileTime, LargeInteger, WideString};
use crate::options::{RequestFields, SortMode};

/// Failures reported by the backend itself.
///
/// Passed through to the caller untranslated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Search backend is not available: {0}")]
    NotAvailable(String),

    #[error("Query failed (code {code}): {message}")]
    QueryFailed { code: u32, message: String },
}

/// Trait for search backends
///
/// Setters mutate the session and take effect on the next [`execute`].
/// Row accessors are only meaningful for `index < result_count()` after a
/// successful execute; wide strings borrow from the backend and are valid
/// until the next mutable call.
///
/// [`execute`]: SearchBackend::execute
pub trait SearchBackend: Send {
    /// Get the name of this backend for logging/status
    fn name(&self) -> &'static str;

    /// Check if this backend is currently available
    fn is_available(&self) -> bool {
        true
    }

    /// Clear all session state and the previous result cursor
    fn reset(&mut self);

    fn set_offset(&mut self, offset: u32);

    fn set_max(&mut self, max: u32);

    fn set_match_case(&mut self, enabled: bool);

    fn set_match_whole_word(&mut self, enabled: bool);

    fn set_match_path(&mut self, enabled: bool);

    fn set_regex(&mut self, enabled: bool);

    fn set_sort(&mut self, sort: SortMode);

    fn set_request_fields(&mut self, fields: RequestFields);

    fn set_search(&mut self, query: &WideString);

    /// Run the configured query, blocking until results are ready
    fn execute(&mut self) -> Result<(), BackendError>;

    /// Number of rows in the current cursor
    fn result_count(&self) -> u32;

    fn is_file_result(&self, index: u32) -> bool;

    fn is_folder_result(&self, index: u32) -> bool;

    fn result_file_name(&self, index: u32) -> Option<&[u16]>;

    /// Parent directory of the row
    fn result_path(&self, index: u32) -> Option<&[u16]>;

    fn result_size(&self, index: u32) -> LargeInteger;

    fn result_date_created(&self, index: u32) -> FileTime;

    fn result_date_modified(&self, index: u32) -> FileTime;

    fn result_date_accessed(&self, index: u32) -> FileTime;

    fn result_run_count(&self, index: u32) -> u32;

    /// Get a description of this backend's status
    fn status_description(&self) -> String {
        if self.is_available() {
            format!("{} (available)", self.name())
        } else {
            format!("{} (unavailable)", self.name())
        }
    }
}
