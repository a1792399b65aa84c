//! Placeholder backend for builds without a native search engine
//!
//! Accepts session calls and fails every query, so hosts get a clean
//! "not available" error instead of a missing symbol.

use search_bridge_core::convert::{FileTime, LargeInteger, WideString};
use search_bridge_core::{BackendError, RequestFields, SearchBackend, SortMode};

#[derive(Debug, Default)]
pub struct UnavailableBackend;

impl UnavailableBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SearchBackend for UnavailableBackend {
    fn name(&self) -> &'static str {
        "Unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn reset(&mut self) {}

    fn set_offset(&mut self, _offset: u32) {}

    fn set_max(&mut self, _max: u32) {}

    fn set_match_case(&mut self, _enabled: bool) {}

    fn set_match_whole_word(&mut self, _enabled: bool) {}

    fn set_match_path(&mut self, _enabled: bool) {}

    fn set_regex(&mut self, _enabled: bool) {}

    fn set_sort(&mut self, _sort: SortMode) {}

    fn set_request_fields(&mut self, _fields: RequestFields) {}

    fn set_search(&mut self, _query: &WideString) {}

    fn execute(&mut self) -> Result<(), BackendError> {
        Err(BackendError::NotAvailable(
            "no native search engine compiled into this build".to_string(),
        ))
    }

    fn result_count(&self) -> u32 {
        0
    }

    fn is_file_result(&self, _index: u32) -> bool {
        false
    }

    fn is_folder_result(&self, _index: u32) -> bool {
        false
    }

    fn result_file_name(&self, _index: u32) -> Option<&[u16]> {
        None
    }

    fn result_path(&self, _index: u32) -> Option<&[u16]> {
        None
    }

    fn result_size(&self, _index: u32) -> LargeInteger {
        LargeInteger::default()
    }

    fn result_date_created(&self, _index: u32) -> FileTime {
        FileTime::default()
    }

    fn result_date_modified(&self, _index: u32) -> FileTime {
        FileTime::default()
    }

    fn result_date_accessed(&self, _index: u32) -> FileTime {
        FileTime::default()
    }

    fn result_run_count(&self, _index: u32) -> u32 {
        0
    }
}
