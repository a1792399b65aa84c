//! Search options and their translation from loosely-typed caller input
//!
//! Callers hand over a JSON object. Recognized keys with the expected type
//! are used as-is, everything else falls back to the documented default.
//! Nothing in here ever fails.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option keys understood by [`SearchOptions::from_map`]
pub mod keys {
    pub const OFFSET: &str = "offset";
    pub const LIMIT: &str = "limit";
    pub const MATCH_CASE: &str = "matchCase";
    pub const MATCH_WHOLE_WORD: &str = "matchWholeWord";
    pub const MATCH_PATH: &str = "matchPath";
    pub const ENABLE_REGEX: &str = "enableRegex";
    pub const INCLUDE_SIZE: &str = "includeSize";
    pub const INCLUDE_DATE_CREATED: &str = "includeDateCreated";
    pub const INCLUDE_DATE_MODIFIED: &str = "includeDateModified";
    pub const INCLUDE_DATE_ACCESSED: &str = "includeDateAccessed";
    pub const INCLUDE_RUN_COUNT: &str = "includeRunCount";
    pub const SORT_ASC: &str = "sortAsc";
    pub const SORT_BY: &str = "sortBy";

    pub const ALL: [&str; 13] = [
        OFFSET,
        LIMIT,
        MATCH_CASE,
        MATCH_WHOLE_WORD,
        MATCH_PATH,
        ENABLE_REGEX,
        INCLUDE_SIZE,
        INCLUDE_DATE_CREATED,
        INCLUDE_DATE_MODIFIED,
        INCLUDE_DATE_ACCESSED,
        INCLUDE_RUN_COUNT,
        SORT_ASC,
        SORT_BY,
    ];
}

/// Sort axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Name,
    Dir,
    Size,
    DateCreated,
    DateModified,
    DateAccessed,
    RunCount,
}

impl SortBy {
    pub const ALL: [SortBy; 7] = [
        SortBy::Name,
        SortBy::Dir,
        SortBy::Size,
        SortBy::DateCreated,
        SortBy::DateModified,
        SortBy::DateAccessed,
        SortBy::RunCount,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.as_str() == name)
    }

    /// Unrecognized names sort by name
    pub fn parse_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Dir => "dir",
            SortBy::Size => "size",
            SortBy::DateCreated => "dateCreated",
            SortBy::DateModified => "dateModified",
            SortBy::DateAccessed => "dateAccessed",
            SortBy::RunCount => "runCount",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Resolved sort order handed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortMode {
    pub axis: SortBy,
    pub ascending: bool,
}

impl SortMode {
    pub const fn new(axis: SortBy, ascending: bool) -> Self {
        Self { axis, ascending }
    }
}

impl Default for SortMode {
    fn default() -> Self {
        Self::new(SortBy::Name, false)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.ascending { "ascending" } else { "descending" };
        write!(f, "{} {}", self.axis, direction)
    }
}

bitflags! {
    /// Metadata categories requested from the backend.
    ///
    /// Backends translate these into their own request masks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RequestFields: u32 {
        const FILE_NAME = 0x0000_0001;
        const PATH = 0x0000_0002;
        const SIZE = 0x0000_0010;
        const DATE_CREATED = 0x0000_0020;
        const DATE_MODIFIED = 0x0000_0040;
        const DATE_ACCESSED = 0x0000_0080;
        const RUN_COUNT = 0x0000_0400;
    }
}

impl Default for RequestFields {
    fn default() -> Self {
        Self::FILE_NAME | Self::PATH
    }
}

/// Fully-defaulted search options, built fresh for every call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Skip this many results (0 = none)
    pub offset: u32,
    /// Maximum number of results (`None` = no limit)
    pub limit: Option<u32>,
    pub match_case: bool,
    pub match_whole_word: bool,
    pub match_path: bool,
    pub enable_regex: bool,
    pub include_size: bool,
    pub include_date_created: bool,
    pub include_date_modified: bool,
    pub include_date_accessed: bool,
    pub include_run_count: bool,
    pub sort_asc: bool,
    pub sort_by: SortBy,
}

impl SearchOptions {
    /// Translate a caller-supplied option map.
    ///
    /// Unknown keys are ignored and values of the wrong type count as absent.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            offset: read_count(map, keys::OFFSET).unwrap_or(0),
            limit: read_count(map, keys::LIMIT).filter(|&limit| limit > 0),
            match_case: read_flag(map, keys::MATCH_CASE),
            match_whole_word: read_flag(map, keys::MATCH_WHOLE_WORD),
            match_path: read_flag(map, keys::MATCH_PATH),
            enable_regex: read_flag(map, keys::ENABLE_REGEX),
            include_size: read_flag(map, keys::INCLUDE_SIZE),
            include_date_created: read_flag(map, keys::INCLUDE_DATE_CREATED),
            include_date_modified: read_flag(map, keys::INCLUDE_DATE_MODIFIED),
            include_date_accessed: read_flag(map, keys::INCLUDE_DATE_ACCESSED),
            include_run_count: read_flag(map, keys::INCLUDE_RUN_COUNT),
            sort_asc: read_flag(map, keys::SORT_ASC),
            sort_by: map
                .get(keys::SORT_BY)
                .and_then(Value::as_str)
                .map(SortBy::parse_or_default)
                .unwrap_or_default(),
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy, ascending: bool) -> Self {
        self.sort_by = sort_by;
        self.sort_asc = ascending;
        self
    }

    /// Regex mode disables whole-word matching.
    pub fn effective_match_whole_word(&self) -> bool {
        self.match_whole_word && !self.enable_regex
    }

    pub fn sort_mode(&self) -> SortMode {
        SortMode::new(self.sort_by, self.sort_asc)
    }

    /// Name and path are always requested.
    pub fn request_fields(&self) -> RequestFields {
        let mut fields = RequestFields::default();
        fields.set(RequestFields::SIZE, self.include_size);
        fields.set(RequestFields::DATE_CREATED, self.include_date_created);
        fields.set(RequestFields::DATE_MODIFIED, self.include_date_modified);
        fields.set(RequestFields::DATE_ACCESSED, self.include_date_accessed);
        fields.set(RequestFields::RUN_COUNT, self.include_run_count);
        fields
    }
}

/// Overlay `overrides` onto `base` key by key, later layers winning.
///
/// An explicit `null` in `overrides` replaces the base value, which then
/// translates to the adapter default rather than the base default.
pub fn merge_options(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
}

fn read_flag(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Non-negative numbers only; fractions truncate and large values saturate.
fn read_count(map: &Map<String, Value>, key: &str) -> Option<u32> {
    let number = map.get(key)?.as_f64()?;
    if number < 0.0 {
        return None;
    }
    // float-to-int casts saturate at u32::MAX
    Some(number as u32)
}
