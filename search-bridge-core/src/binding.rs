//! Host-runtime boundary
//!
//! Hosts call `search(query, options)` with values from their own object
//! model, represented here as `serde_json::Value`. Argument shape is checked
//! before the backend session is touched; the response goes back as a value
//! tree with optional fields present only when requested.

use serde_json::{Map, Value};

use crate::adapter::SearchAdapter;
use crate::backend::SearchBackend;
use crate::error::{AdapterError, Result};
use crate::options::SearchOptions;

/// `search(query, options)` over host values. Extra arguments are ignored.
pub fn search_call<B: SearchBackend>(adapter: &SearchAdapter<B>, args: &[Value]) -> Result<Value> {
    let (query, options) = parse_arguments(args)?;
    let options = SearchOptions::from_map(options);
    let response = adapter.search(query, &options)?;
    Ok(serde_json::to_value(&response)?)
}

/// JSON-text variant for FFI hosts. A missing options document means `{}`.
pub fn search_json<B: SearchBackend>(
    adapter: &SearchAdapter<B>,
    query: &str,
    options_json: Option<&str>,
) -> Result<String> {
    let options = match options_json {
        None => Value::Object(Map::new()),
        Some(text) => serde_json::from_str(text).map_err(|e| {
            AdapterError::invalid_arguments(format!("the search options must be a JSON object: {e}"))
        })?,
    };

    let args = [Value::String(query.to_string()), options];
    let response = search_call(adapter, &args)?;
    Ok(serde_json::to_string(&response)?)
}

/// Validate `(query, options)` without touching any backend.
pub fn parse_arguments(args: &[Value]) -> Result<(&str, &Map<String, Value>)> {
    let [query, options, ..] = args else {
        return Err(AdapterError::invalid_arguments(
            "search() expects two arguments: query and options",
        ));
    };

    let query = query
        .as_str()
        .ok_or_else(|| AdapterError::invalid_arguments("the search query must be a string"))?;

    let options = options
        .as_object()
        .ok_or_else(|| AdapterError::invalid_arguments("the search options must be an object"))?;

    Ok((query, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{FixtureBackend, FixtureRow};
    use serde_json::json;

    fn adapter() -> SearchAdapter<FixtureBackend> {
        SearchAdapter::new(FixtureBackend::new(vec![
            FixtureRow::file("a.txt", "C:\\docs").with_size(120),
            FixtureRow::folder("docs", "C:\\"),
        ]))
    }

    fn backend_untouched(adapter: &SearchAdapter<FixtureBackend>) -> bool {
        adapter.with_backend(|backend| backend.calls().is_empty())
    }

    #[test]
    fn test_too_few_arguments() {
        let adapter = adapter();
        let err = search_call(&adapter, &[json!("*.txt")]).unwrap_err();
        assert!(err.is_caller_error());
        assert_eq!(err.to_string(), "search() expects two arguments: query and options");
        assert!(backend_untouched(&adapter));
    }

    #[test]
    fn test_non_string_query() {
        let adapter = adapter();
        let err = search_call(&adapter, &[json!(42), json!({})]).unwrap_err();
        assert_eq!(err.to_string(), "the search query must be a string");
        assert!(backend_untouched(&adapter));
    }

    #[test]
    fn test_non_object_options() {
        let adapter = adapter();
        for options in [json!(null), json!([]), json!("limit=5")] {
            let err = search_call(&adapter, &[json!("*"), options]).unwrap_err();
            assert_eq!(err.to_string(), "the search options must be an object");
        }
        assert!(backend_untouched(&adapter));
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let adapter = adapter();
        let value = search_call(&adapter, &[json!("*"), json!({}), json!("extra")]).unwrap();
        assert_eq!(value["totalResults"], 2);
    }

    #[test]
    fn test_response_shape() {
        let adapter = adapter();
        let value = search_call(&adapter, &[json!("*"), json!({ "includeSize": true })]).unwrap();
        assert_eq!(
            value,
            json!({
                "totalResults": 2,
                "results": [
                    { "type": "file", "name": "a.txt", "dir": "C:\\docs", "size": 120 },
                    { "type": "folder", "name": "docs", "dir": "C:\\", "size": -1 }
                ]
            })
        );
    }

    #[test]
    fn test_search_json() {
        let adapter = adapter();
        let text = search_json(&adapter, "*", None).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["results"][0], json!({ "type": "file", "name": "a.txt", "dir": "C:\\docs" }));

        let err = search_json(&adapter, "*", Some("{not json")).unwrap_err();
        assert!(err.is_caller_error());

        let err = search_json(&adapter, "*", Some("[1, 2]")).unwrap_err();
        assert_eq!(err.to_string(), "the search options must be an object");
    }
}
