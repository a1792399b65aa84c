//! Human-readable rendering of search responses

use search_bridge_core::convert::unix_millis_to_datetime;
use search_bridge_core::{SearchResponse, SearchResult};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a response as an aligned text table.
///
/// Columns for optional fields appear only if at least one row carries them.
pub fn render_table(response: &SearchResponse) -> String {
    let has_size = response.results.iter().any(|r| r.size.is_some());
    let has_created = response.results.iter().any(|r| r.date_created.is_some());
    let has_modified = response.results.iter().any(|r| r.date_modified.is_some());
    let has_accessed = response.results.iter().any(|r| r.date_accessed.is_some());
    let has_run_count = response.results.iter().any(|r| r.run_count.is_some());

    let mut out = String::new();
    out.push_str(&format!("Found {} results:\n", response.total_results));
    if response.is_empty() {
        return out;
    }
    out.push('\n');

    for result in &response.results {
        let mut line = format!("  {:<6}", result.result_type);
        if has_size {
            line.push_str(&format!(" {:>12}", format_size(result)));
        }
        if has_created {
            line.push_str(&format!("  {:<19}", format_date(result.date_created)));
        }
        if has_modified {
            line.push_str(&format!("  {:<19}", format_date(result.date_modified)));
        }
        if has_accessed {
            line.push_str(&format!("  {:<19}", format_date(result.date_accessed)));
        }
        if has_run_count {
            line.push_str(&format!(" {:>5}", result.run_count.unwrap_or_default()));
        }
        line.push_str(&format!("  {}", result.full_path().display()));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn format_size(result: &SearchResult) -> String {
    match result.size {
        Some(size) if size >= 0 => format!("{} B", size),
        _ => "-".to_string(),
    }
}

fn format_date(millis: Option<u64>) -> String {
    millis
        .and_then(unix_millis_to_datetime)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_bridge_core::ResultType;

    #[test]
    fn test_empty_response() {
        let table = render_table(&SearchResponse::default());
        assert_eq!(table, "Found 0 results:\n");
    }

    #[test]
    fn test_optional_columns_follow_data() {
        let mut file = SearchResult::new(ResultType::File, "a.txt", "/data");
        file.size = Some(42);
        file.date_modified = Some(1_609_459_200_000);
        let mut folder = SearchResult::new(ResultType::Folder, "logs", "/data");
        folder.size = Some(-1);
        folder.date_modified = Some(0);

        let response = SearchResponse {
            total_results: 2,
            results: vec![file, folder],
        };
        let table = render_table(&response);

        assert!(table.contains("42 B"));
        assert!(table.contains("2021-01-01 00:00:00"));
        assert!(table.contains("1970-01-01 00:00:00"));
        let folder_line = table.lines().find(|l| l.contains("logs")).unwrap();
        assert!(folder_line.contains(" - "));
    }

    #[test]
    fn test_every_optional_column_rendered() {
        let mut file = SearchResult::new(ResultType::File, "a.txt", "/data");
        file.size = Some(7);
        file.date_created = Some(0);
        file.date_modified = Some(1_609_459_200_000);
        file.date_accessed = Some(1_609_459_200_000);
        file.run_count = Some(12);
        let response = SearchResponse {
            total_results: 1,
            results: vec![file],
        };

        let table = render_table(&response);
        let mut lines = table.lines();
        assert_eq!(lines.next(), Some("Found 1 results:"));
        assert_eq!(lines.next(), Some(""));
        let row = lines.next().unwrap();
        assert!(row.contains("7 B"));
        assert_eq!(row.matches("2021-01-01 00:00:00").count(), 2);
        assert!(row.contains("1970-01-01 00:00:00"));
        assert!(row.contains("   12"));
        assert!(row.ends_with("a.txt"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_name_and_dir_only() {
        let response = SearchResponse {
            total_results: 1,
            results: vec![SearchResult::new(ResultType::File, "a.txt", "/data")],
        };
        let table = render_table(&response);
        let line = table.lines().last().unwrap();
        assert!(line.starts_with("  file"));
        assert!(line.ends_with("a.txt"));
        assert!(!line.contains(" B"));
    }
}
