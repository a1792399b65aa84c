//! Native library for host runtime integration
//!
//! Provides C ABI exports so scripting hosts can call `search(query, options)`
//! with JSON payloads. Uses the Everything SDK on Windows when built with the
//! `everything-sdk` feature; other builds report the backend as unavailable.

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::ptr;
use std::sync::OnceLock;

use search_bridge_core::{binding, SearchAdapter};
use tracing::warn;

#[cfg(all(windows, feature = "everything-sdk"))]
pub mod everything;
#[cfg(all(windows, feature = "everything-sdk"))]
mod sdk_codes;
mod unavailable;

pub use unavailable::UnavailableBackend;

/// Backend compiled into this build
#[cfg(all(windows, feature = "everything-sdk"))]
pub type NativeBackend = everything::EverythingSdk;

#[cfg(not(all(windows, feature = "everything-sdk")))]
pub type NativeBackend = UnavailableBackend;

pub fn native_backend() -> NativeBackend {
    NativeBackend::new()
}

/// Process-wide adapter; the SDK session is global, so there is exactly one.
fn adapter() -> &'static SearchAdapter<NativeBackend> {
    static ADAPTER: OnceLock<SearchAdapter<NativeBackend>> = OnceLock::new();
    ADAPTER.get_or_init(|| SearchAdapter::new(native_backend()))
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(message: &str) {
    // CString rejects interior NULs
    let message = CString::new(message.replace('\0', " ")).ok();
    LAST_ERROR.with(|e| *e.borrow_mut() = message);
}

fn clear_last_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

/// Check if the search backend is available.
/// Returns 1 if available, 0 if not.
#[unsafe(no_mangle)]
pub extern "C" fn bridge_is_available() -> i32 {
    adapter().is_available() as i32
}

/// Search with `query` and a JSON options object.
/// Returns the response JSON, which must be freed with bridge_free.
/// Returns null on error; see bridge_get_error.
///
/// # Safety
/// - `query` must be a valid null-terminated UTF-8 string
/// - `options_json` can be null (same as `{}`), otherwise must be a valid
///   null-terminated UTF-8 string
/// - Caller must free the returned pointer with bridge_free
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bridge_search(
    query: *const c_char,
    options_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if query.is_null() {
        set_last_error("the search query must be a string");
        return ptr::null_mut();
    }

    let query_str = match unsafe { CStr::from_ptr(query) }.to_str() {
        Ok(s) => s,
        Err(_) => {
            set_last_error("the search query must be valid UTF-8");
            return ptr::null_mut();
        }
    };

    let options = if options_json.is_null() {
        None
    } else {
        match unsafe { CStr::from_ptr(options_json) }.to_str() {
            Ok(s) => Some(s),
            Err(_) => {
                set_last_error("the search options must be valid UTF-8");
                return ptr::null_mut();
            }
        }
    };

    match binding::search_json(adapter(), query_str, options) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => cstr.into_raw(),
            Err(_) => {
                set_last_error("search response contained a NUL byte");
                ptr::null_mut()
            }
        },
        Err(e) => {
            warn!("Search failed: {}", e);
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Get the name of the active search backend.
/// Returns a static string, do NOT free.
#[unsafe(no_mangle)]
pub extern "C" fn bridge_backend_name() -> *const c_char {
    #[cfg(all(windows, feature = "everything-sdk"))]
    {
        static NAME: &[u8] = b"Everything\0";
        NAME.as_ptr() as *const c_char
    }

    #[cfg(not(all(windows, feature = "everything-sdk")))]
    {
        static NAME: &[u8] = b"Unavailable\0";
        NAME.as_ptr() as *const c_char
    }
}

/// Free memory allocated by bridge_search.
///
/// # Safety
/// - `ptr` must have been returned by bridge_search
/// - `ptr` must not have been freed before
/// - `ptr` can be null (no-op)
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bridge_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe { drop(CString::from_raw(ptr)) };
    }
}

/// Get the last error message on this thread.
/// Valid until the next bridge_search call on the same thread, do NOT free.
/// Returns null if the last call succeeded.
#[unsafe(no_mangle)]
pub extern "C" fn bridge_get_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_error() -> Option<String> {
        let ptr = bridge_get_error();
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
        }
    }

    #[test]
    fn test_null_query_sets_error() {
        let result = unsafe { bridge_search(ptr::null(), ptr::null()) };
        assert!(result.is_null());
        assert_eq!(last_error().as_deref(), Some("the search query must be a string"));
    }

    #[test]
    fn test_invalid_options_json() {
        let query = CString::new("*.txt").unwrap();
        let options = CString::new("[1, 2, 3]").unwrap();
        let result = unsafe { bridge_search(query.as_ptr(), options.as_ptr()) };
        assert!(result.is_null());
        assert_eq!(last_error().as_deref(), Some("the search options must be an object"));
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe { bridge_free(ptr::null_mut()) };
    }

    #[test]
    fn test_error_cleared_on_next_call() {
        set_last_error("stale");
        clear_last_error();
        assert_eq!(last_error(), None);
    }

    #[test]
    fn test_interior_nul_in_error_is_replaced() {
        set_last_error("bad\0message");
        assert_eq!(last_error().as_deref(), Some("bad message"));
    }

    #[cfg(not(all(windows, feature = "everything-sdk")))]
    #[test]
    fn test_search_without_engine_reports_unavailable() {
        let query = CString::new("*.txt").unwrap();
        let result = unsafe { bridge_search(query.as_ptr(), ptr::null()) };
        assert!(result.is_null());
        let message = last_error().unwrap();
        assert!(message.starts_with("Search backend is not available"), "{message}");
        assert_eq!(bridge_is_available(), 0);

        let name = unsafe { CStr::from_ptr(bridge_backend_name()) };
        assert_eq!(name.to_str().unwrap(), "Unavailable");
    }
}
