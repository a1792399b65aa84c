//! Scripted in-memory backend
//!
//! Serves a fixed list of rows in script order and records every session
//! call, so the translator and materializer can be exercised without a real
//! engine. Offset and max are honored as a window over the script; matching
//! and sorting are not performed, the script is assumed to already be the
//! engine's answer.

use std::cell::RefCell;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, SearchBackend};
use crate::convert::{FileTime, LargeInteger, WideString};
use crate::options::{RequestFields, SortMode};
use crate::result::ResultType;

/// One scripted row. Dates are Unix milliseconds for readability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureRow {
    #[serde(rename = "type")]
    pub result_type: ResultType,
    pub name: String,
    #[serde(default)]
    pub dir: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub date_created: u64,
    #[serde(default)]
    pub date_modified: u64,
    #[serde(default)]
    pub date_accessed: u64,
    #[serde(default)]
    pub run_count: u32,
}

impl FixtureRow {
    pub fn new(result_type: ResultType, name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            result_type,
            name: name.into(),
            dir: dir.into(),
            size: 0,
            date_created: 0,
            date_modified: 0,
            date_accessed: 0,
            run_count: 0,
        }
    }

    pub fn file(name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self::new(ResultType::File, name, dir)
    }

    pub fn folder(name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self::new(ResultType::Folder, name, dir)
    }

    pub fn volume(name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self::new(ResultType::Volume, name, dir)
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn with_dates(mut self, created: u64, modified: u64, accessed: u64) -> Self {
        self.date_created = created;
        self.date_modified = modified;
        self.date_accessed = accessed;
        self
    }

    pub fn with_run_count(mut self, run_count: u32) -> Self {
        self.run_count = run_count;
        self
    }
}

/// Session call recorded by [`FixtureBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    Reset,
    SetOffset(u32),
    SetMax(u32),
    SetMatchCase(bool),
    SetMatchWholeWord(bool),
    SetMatchPath(bool),
    SetRegex(bool),
    SetSort(SortMode),
    SetRequestFields(RequestFields),
    SetSearch(String),
    Execute,
    ReadSize(u32),
    ReadDateCreated(u32),
    ReadDateModified(u32),
    ReadDateAccessed(u32),
    ReadRunCount(u32),
}

impl SessionCall {
    /// Reads of optional metadata
    pub fn is_field_read(&self) -> bool {
        matches!(
            self,
            SessionCall::ReadSize(_)
                | SessionCall::ReadDateCreated(_)
                | SessionCall::ReadDateModified(_)
                | SessionCall::ReadDateAccessed(_)
                | SessionCall::ReadRunCount(_)
        )
    }
}

/// In-memory backend serving scripted rows
#[derive(Debug)]
pub struct FixtureBackend {
    rows: Vec<FixtureRow>,
    names: Vec<WideString>,
    dirs: Vec<WideString>,
    offset: u32,
    max: Option<u32>,
    /// Cursor window into `rows`; empty until execute
    visible: Range<usize>,
    failure: Option<BackendError>,
    available: bool,
    calls: RefCell<Vec<SessionCall>>,
}

impl FixtureBackend {
    pub fn new(rows: Vec<FixtureRow>) -> Self {
        let names = rows.iter().map(|row| WideString::new(&row.name)).collect();
        let dirs = rows.iter().map(|row| WideString::new(&row.dir)).collect();
        Self {
            rows,
            names,
            dirs,
            offset: 0,
            max: None,
            visible: 0..0,
            failure: None,
            available: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Load rows from a JSON array
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let rows: Vec<FixtureRow> = serde_json::from_str(json)?;
        Ok(Self::new(rows))
    }

    /// Make every execute fail with `error`
    pub fn failing_with(mut self, error: BackendError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Every session call so far, oldest first
    pub fn calls(&self) -> Vec<SessionCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&mut self) {
        self.calls.get_mut().clear();
    }

    fn record(&mut self, call: SessionCall) {
        self.calls.get_mut().push(call);
    }

    fn record_read(&self, call: SessionCall) {
        self.calls.borrow_mut().push(call);
    }

    fn row(&self, index: u32) -> Option<usize> {
        let position = self.visible.start + index as usize;
        (position < self.visible.end).then_some(position)
    }
}

impl SearchBackend for FixtureBackend {
    fn name(&self) -> &'static str {
        "Fixture"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn reset(&mut self) {
        self.record(SessionCall::Reset);
        self.offset = 0;
        self.max = None;
        self.visible = 0..0;
    }

    fn set_offset(&mut self, offset: u32) {
        self.record(SessionCall::SetOffset(offset));
        self.offset = offset;
    }

    fn set_max(&mut self, max: u32) {
        self.record(SessionCall::SetMax(max));
        self.max = Some(max);
    }

    fn set_match_case(&mut self, enabled: bool) {
        self.record(SessionCall::SetMatchCase(enabled));
    }

    fn set_match_whole_word(&mut self, enabled: bool) {
        self.record(SessionCall::SetMatchWholeWord(enabled));
    }

    fn set_match_path(&mut self, enabled: bool) {
        self.record(SessionCall::SetMatchPath(enabled));
    }

    fn set_regex(&mut self, enabled: bool) {
        self.record(SessionCall::SetRegex(enabled));
    }

    fn set_sort(&mut self, sort: SortMode) {
        self.record(SessionCall::SetSort(sort));
    }

    fn set_request_fields(&mut self, fields: RequestFields) {
        self.record(SessionCall::SetRequestFields(fields));
    }

    fn set_search(&mut self, query: &WideString) {
        self.record(SessionCall::SetSearch(query.to_string_lossy()));
    }

    fn execute(&mut self) -> Result<(), BackendError> {
        self.record(SessionCall::Execute);

        if !self.available {
            return Err(BackendError::NotAvailable("fixture backend disabled".to_string()));
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let start = (self.offset as usize).min(self.rows.len());
        let end = match self.max {
            Some(max) => start.saturating_add(max as usize).min(self.rows.len()),
            None => self.rows.len(),
        };
        self.visible = start..end;
        Ok(())
    }

    fn result_count(&self) -> u32 {
        self.visible.len() as u32
    }

    fn is_file_result(&self, index: u32) -> bool {
        self.row(index)
            .is_some_and(|i| self.rows[i].result_type == ResultType::File)
    }

    fn is_folder_result(&self, index: u32) -> bool {
        self.row(index)
            .is_some_and(|i| self.rows[i].result_type == ResultType::Folder)
    }

    fn result_file_name(&self, index: u32) -> Option<&[u16]> {
        self.row(index).map(|i| self.names[i].as_slice())
    }

    fn result_path(&self, index: u32) -> Option<&[u16]> {
        self.row(index).map(|i| self.dirs[i].as_slice())
    }

    fn result_size(&self, index: u32) -> LargeInteger {
        self.record_read(SessionCall::ReadSize(index));
        self.row(index)
            .map(|i| LargeInteger::from_i64(self.rows[i].size))
            .unwrap_or_default()
    }

    fn result_date_created(&self, index: u32) -> FileTime {
        self.record_read(SessionCall::ReadDateCreated(index));
        self.row(index)
            .map(|i| FileTime::from_unix_millis(self.rows[i].date_created))
            .unwrap_or_default()
    }

    fn result_date_modified(&self, index: u32) -> FileTime {
        self.record_read(SessionCall::ReadDateModified(index));
        self.row(index)
            .map(|i| FileTime::from_unix_millis(self.rows[i].date_modified))
            .unwrap_or_default()
    }

    fn result_date_accessed(&self, index: u32) -> FileTime {
        self.record_read(SessionCall::ReadDateAccessed(index));
        self.row(index)
            .map(|i| FileTime::from_unix_millis(self.rows[i].date_accessed))
            .unwrap_or_default()
    }

    fn result_run_count(&self, index: u32) -> u32 {
        self.record_read(SessionCall::ReadRunCount(index));
        self.row(index).map(|i| self.rows[i].run_count).unwrap_or_default()
    }
}
