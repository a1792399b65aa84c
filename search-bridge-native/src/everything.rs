//! Everything SDK backend
//!
//! Talks to a running Everything instance through `everything-sys-bindgen`,
//! which links the bundled `Everything64.dll`. The SDK keeps one query
//! session per process, so only a single [`EverythingSdk`] should be driven
//! at a time; the adapter's lock provides that as long as one adapter owns it.

use everything_sys_bindgen::{
    BOOL, DWORD, FILETIME, LARGE_INTEGER, LPCWSTR, Everything_GetLastError,
    Everything_GetMajorVersion, Everything_GetNumResults, Everything_GetResultDateAccessed,
    Everything_GetResultDateCreated, Everything_GetResultDateModified,
    Everything_GetResultFileNameW, Everything_GetResultPathW, Everything_GetResultRunCount,
    Everything_GetResultSize, Everything_IsFileResult, Everything_IsFolderResult,
    Everything_QueryW, Everything_Reset, Everything_SetMatchCase, Everything_SetMatchPath,
    Everything_SetMatchWholeWord, Everything_SetMax, Everything_SetOffset, Everything_SetRegex,
    Everything_SetRequestFlags, Everything_SetSearchW, Everything_SetSort,
};
use search_bridge_core::convert::{FileTime, LargeInteger, WideString};
use search_bridge_core::{BackendError, RequestFields, SearchBackend, SortMode};

use crate::sdk_codes::{error_message, request_flags, sort_code, EVERYTHING_ERROR_IPC};

type DateReader = unsafe extern "C" fn(DWORD, *mut FILETIME) -> BOOL;

fn to_bool(value: BOOL) -> bool {
    value != 0
}

fn from_bool(value: bool) -> BOOL {
    BOOL::from(value)
}

/// Handle to the process-wide Everything SDK session
#[derive(Debug, Default)]
pub struct EverythingSdk {
    _private: (),
}

impl EverythingSdk {
    pub fn new() -> Self {
        Self::default()
    }

    fn last_error() -> BackendError {
        let code = unsafe { Everything_GetLastError() };
        if code == EVERYTHING_ERROR_IPC {
            BackendError::NotAvailable(error_message(code).to_string())
        } else {
            BackendError::QueryFailed {
                code,
                message: error_message(code).to_string(),
            }
        }
    }

    /// Borrow an SDK-owned string; valid until the next reset or query.
    fn wide<'a>(&'a self, ptr: LPCWSTR) -> Option<&'a [u16]> {
        if ptr.is_null() {
            return None;
        }
        unsafe {
            let mut len = 0;
            while *ptr.add(len) != 0 {
                len += 1;
            }
            Some(std::slice::from_raw_parts(ptr, len))
        }
    }

    fn read_date(&self, index: u32, read: DateReader) -> FileTime {
        let mut ft = FILETIME {
            dwLowDateTime: 0,
            dwHighDateTime: 0,
        };
        if to_bool(unsafe { read(index, &mut ft) }) {
            FileTime {
                low: ft.dwLowDateTime,
                high: ft.dwHighDateTime,
            }
        } else {
            FileTime::default()
        }
    }
}

impl SearchBackend for EverythingSdk {
    fn name(&self) -> &'static str {
        "Everything"
    }

    /// The SDK answers version queries only while the client is running
    fn is_available(&self) -> bool {
        unsafe { Everything_GetMajorVersion() > 0 }
    }

    fn reset(&mut self) {
        unsafe { Everything_Reset() }
    }

    fn set_offset(&mut self, offset: u32) {
        unsafe { Everything_SetOffset(offset) }
    }

    fn set_max(&mut self, max: u32) {
        unsafe { Everything_SetMax(max) }
    }

    fn set_match_case(&mut self, enabled: bool) {
        unsafe { Everything_SetMatchCase(from_bool(enabled)) }
    }

    fn set_match_whole_word(&mut self, enabled: bool) {
        unsafe { Everything_SetMatchWholeWord(from_bool(enabled)) }
    }

    fn set_match_path(&mut self, enabled: bool) {
        unsafe { Everything_SetMatchPath(from_bool(enabled)) }
    }

    fn set_regex(&mut self, enabled: bool) {
        unsafe { Everything_SetRegex(from_bool(enabled)) }
    }

    fn set_sort(&mut self, sort: SortMode) {
        unsafe { Everything_SetSort(sort_code(sort)) }
    }

    fn set_request_fields(&mut self, fields: RequestFields) {
        unsafe { Everything_SetRequestFlags(request_flags(fields)) }
    }

    // The SDK copies the search text, so the buffer only has to outlive the call
    fn set_search(&mut self, query: &WideString) {
        unsafe { Everything_SetSearchW(query.as_ptr()) }
    }

    fn execute(&mut self) -> Result<(), BackendError> {
        if to_bool(unsafe { Everything_QueryW(from_bool(true)) }) {
            Ok(())
        } else {
            Err(Self::last_error())
        }
    }

    fn result_count(&self) -> u32 {
        unsafe { Everything_GetNumResults() }
    }

    fn is_file_result(&self, index: u32) -> bool {
        to_bool(unsafe { Everything_IsFileResult(index) })
    }

    fn is_folder_result(&self, index: u32) -> bool {
        to_bool(unsafe { Everything_IsFolderResult(index) })
    }

    fn result_file_name(&self, index: u32) -> Option<&[u16]> {
        self.wide(unsafe { Everything_GetResultFileNameW(index) })
    }

    fn result_path(&self, index: u32) -> Option<&[u16]> {
        self.wide(unsafe { Everything_GetResultPathW(index) })
    }

    fn result_size(&self, index: u32) -> LargeInteger {
        let mut size = LARGE_INTEGER { QuadPart: 0 };
        if to_bool(unsafe { Everything_GetResultSize(index, &mut size) }) {
            let parts = unsafe { size.u };
            LargeInteger {
                low: parts.LowPart,
                high: parts.HighPart,
            }
        } else {
            LargeInteger::default()
        }
    }

    fn result_date_created(&self, index: u32) -> FileTime {
        self.read_date(index, Everything_GetResultDateCreated)
    }

    fn result_date_modified(&self, index: u32) -> FileTime {
        self.read_date(index, Everything_GetResultDateModified)
    }

    fn result_date_accessed(&self, index: u32) -> FileTime {
        self.read_date(index, Everything_GetResultDateAccessed)
    }

    fn result_run_count(&self, index: u32) -> u32 {
        unsafe { Everything_GetResultRunCount(index) }
    }
}
