//! Search result types
//!
//! Serialized shape:
//! `{ "totalResults": n, "results": [{ "type", "name", "dir", "size"?, ... }] }`.
//! Optional fields are omitted unless the caller requested them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Reported size for folders and volumes when size was requested
pub const SIZE_NOT_APPLICABLE: i64 = -1;

/// Kind of filesystem object behind a result row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    File,
    Folder,
    Volume,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::File => "file",
            ResultType::Folder => "folder",
            ResultType::Volume => "volume",
        }
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub result_type: ResultType,
    pub name: String,
    /// Parent directory
    pub dir: String,
    /// Bytes for files, [`SIZE_NOT_APPLICABLE`] otherwise. `None` = not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    /// Milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_accessed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_count: Option<u64>,
}

impl SearchResult {
    /// Row with only name and directory populated
    pub fn new(result_type: ResultType, name: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            result_type,
            name: name.into(),
            dir: dir.into(),
            size: None,
            date_created: None,
            date_modified: None,
            date_accessed: None,
            run_count: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.result_type == ResultType::File
    }

    pub fn full_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.name)
    }

    // Flat encodings for hosts without optional fields

    pub fn size_or_sentinel(&self) -> i64 {
        self.size.unwrap_or(SIZE_NOT_APPLICABLE)
    }

    pub fn date_created_or_sentinel(&self) -> u64 {
        self.date_created.unwrap_or(0)
    }

    pub fn date_modified_or_sentinel(&self) -> u64 {
        self.date_modified.unwrap_or(0)
    }

    pub fn date_accessed_or_sentinel(&self) -> u64 {
        self.date_accessed.unwrap_or(0)
    }

    pub fn run_count_or_sentinel(&self) -> u64 {
        self.run_count.unwrap_or(0)
    }
}

/// Response for a single search call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Count reported by the backend for the executed query
    pub total_results: u32,
    /// Rows in backend order
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &SearchResult> {
        self.results.iter().filter(|r| r.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unrequested_fields_are_omitted() {
        let response = SearchResponse {
            total_results: 1,
            results: vec![SearchResult::new(ResultType::Folder, "src", "C:\\code")],
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "totalResults": 1,
                "results": [{ "type": "folder", "name": "src", "dir": "C:\\code" }]
            })
        );
    }

    #[test]
    fn test_requested_fields_use_camel_case() {
        let mut row = SearchResult::new(ResultType::File, "a.txt", "C:\\");
        row.size = Some(12);
        row.date_modified = Some(0);
        row.run_count = Some(3);
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "type": "file",
                "name": "a.txt",
                "dir": "C:\\",
                "size": 12,
                "dateModified": 0,
                "runCount": 3
            })
        );
    }

    #[test]
    fn test_sentinels_for_missing_fields() {
        let row = SearchResult::new(ResultType::Volume, "D:", "");
        assert_eq!(row.size_or_sentinel(), -1);
        assert_eq!(row.date_created_or_sentinel(), 0);
        assert_eq!(row.date_modified_or_sentinel(), 0);
        assert_eq!(row.date_accessed_or_sentinel(), 0);
        assert_eq!(row.run_count_or_sentinel(), 0);
    }

    #[test]
    fn test_deserialize_response() {
        let response: SearchResponse = serde_json::from_value(json!({
            "totalResults": 2,
            "results": [
                { "type": "file", "name": "a.txt", "dir": "/tmp", "size": 5 },
                { "type": "volume", "name": "C:", "dir": "" }
            ]
        }))
        .unwrap();
        assert_eq!(response.total_results, 2);
        assert_eq!(response.files().count(), 1);
        assert_eq!(response.results[0].size, Some(5));
        assert_eq!(response.results[1].size, None);
    }
}
