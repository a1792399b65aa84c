//! Result materializer
//!
//! Drains the backend's result cursor into a [`SearchResponse`], reading only
//! the metadata the caller asked for.

use tracing::debug;

use crate::backend::SearchBackend;
use crate::convert::wide_to_string;
use crate::options::SearchOptions;
use crate::result::{ResultType, SearchResponse, SearchResult, SIZE_NOT_APPLICABLE};

/// Read every row of the current cursor in backend order.
pub fn materialize<B: SearchBackend + ?Sized>(backend: &B, options: &SearchOptions) -> SearchResponse {
    let total_results = backend.result_count();
    let results: Vec<SearchResult> = (0..total_results)
        .map(|index| materialize_row(backend, index, options))
        .collect();

    debug!("Materialized {} rows from {}", results.len(), backend.name());

    SearchResponse {
        total_results,
        results,
    }
}

/// File and folder are checked explicitly; anything else is a volume.
pub fn classify<B: SearchBackend + ?Sized>(backend: &B, index: u32) -> ResultType {
    if backend.is_file_result(index) {
        ResultType::File
    } else if backend.is_folder_result(index) {
        ResultType::Folder
    } else {
        ResultType::Volume
    }
}

fn materialize_row<B: SearchBackend + ?Sized>(
    backend: &B,
    index: u32,
    options: &SearchOptions,
) -> SearchResult {
    let result_type = classify(backend, index);
    let name = backend.result_file_name(index).map(wide_to_string).unwrap_or_default();
    let dir = backend.result_path(index).map(wide_to_string).unwrap_or_default();

    let mut result = SearchResult::new(result_type, name, dir);

    if options.include_size {
        result.size = Some(match result_type {
            ResultType::File => backend.result_size(index).to_i64(),
            ResultType::Folder | ResultType::Volume => SIZE_NOT_APPLICABLE,
        });
    }

    if options.include_date_created {
        result.date_created = Some(backend.result_date_created(index).to_unix_millis());
    }

    if options.include_date_modified {
        result.date_modified = Some(backend.result_date_modified(index).to_unix_millis());
    }

    if options.include_date_accessed {
        result.date_accessed = Some(backend.result_date_accessed(index).to_unix_millis());
    }

    if options.include_run_count {
        result.run_count = Some(u64::from(backend.result_run_count(index)));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{FixtureBackend, FixtureRow, SessionCall};

    fn executed(rows: Vec<FixtureRow>) -> FixtureBackend {
        let mut backend = FixtureBackend::new(rows);
        backend.execute().unwrap();
        backend
    }

    fn sample_rows() -> Vec<FixtureRow> {
        vec![
            FixtureRow::file("notes.txt", "C:\\docs")
                .with_size(2048)
                .with_dates(1_600_000_000_000, 1_650_000_000_000, 1_700_000_000_000)
                .with_run_count(7),
            FixtureRow::folder("docs", "C:\\").with_size(999),
            FixtureRow::volume("C:", ""),
        ]
    }

    #[test]
    fn test_classifies_rows() {
        let backend = executed(sample_rows());
        assert_eq!(classify(&backend, 0), ResultType::File);
        assert_eq!(classify(&backend, 1), ResultType::Folder);
        assert_eq!(classify(&backend, 2), ResultType::Volume);
    }

    #[test]
    fn test_name_and_dir_only_by_default() {
        let backend = executed(sample_rows());
        let response = materialize(&backend, &SearchOptions::default());

        assert_eq!(response.total_results, 3);
        let first = &response.results[0];
        assert_eq!(first.name, "notes.txt");
        assert_eq!(first.dir, "C:\\docs");
        assert_eq!(first.size, None);
        assert_eq!(first.date_created, None);
        assert_eq!(first.date_modified, None);
        assert_eq!(first.date_accessed, None);
        assert_eq!(first.run_count, None);

        // nothing beyond classification and strings was read
        assert!(backend.calls().iter().all(|call| !call.is_field_read()));
    }

    #[test]
    fn test_size_only_for_files() {
        let backend = executed(sample_rows());
        let options = SearchOptions {
            include_size: true,
            ..Default::default()
        };
        let response = materialize(&backend, &options);

        assert_eq!(response.results[0].size, Some(2048));
        assert_eq!(response.results[1].size, Some(SIZE_NOT_APPLICABLE));
        assert_eq!(response.results[2].size, Some(SIZE_NOT_APPLICABLE));

        let size_reads: Vec<_> = backend
            .calls()
            .into_iter()
            .filter(|call| matches!(call, SessionCall::ReadSize(_)))
            .collect();
        assert_eq!(size_reads, vec![SessionCall::ReadSize(0)]);
    }

    #[test]
    fn test_all_fields_requested() {
        let backend = executed(sample_rows());
        let options = SearchOptions {
            include_date_created: true,
            include_date_modified: true,
            include_date_accessed: true,
            include_run_count: true,
            ..Default::default()
        };
        let first = materialize(&backend, &options).results.remove(0);

        assert_eq!(first.date_created, Some(1_600_000_000_000));
        assert_eq!(first.date_modified, Some(1_650_000_000_000));
        assert_eq!(first.date_accessed, Some(1_700_000_000_000));
        assert_eq!(first.run_count, Some(7));
        assert_eq!(first.size, None);
    }

    #[test]
    fn test_empty_cursor() {
        let backend = executed(Vec::new());
        let response = materialize(&backend, &SearchOptions::default());
        assert_eq!(response.total_results, 0);
        assert!(response.is_empty());
    }
}
