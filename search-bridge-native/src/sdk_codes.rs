//! Mapping from adapter types onto Everything SDK codes

pub use everything_sys_bindgen::{
    EVERYTHING_ERROR_CREATETHREAD, EVERYTHING_ERROR_CREATEWINDOW, EVERYTHING_ERROR_INVALIDCALL,
    EVERYTHING_ERROR_INVALIDINDEX, EVERYTHING_ERROR_INVALIDPARAMETER,
    EVERYTHING_ERROR_INVALIDREQUEST, EVERYTHING_ERROR_IPC, EVERYTHING_ERROR_MEMORY,
    EVERYTHING_ERROR_REGISTERCLASSEX, EVERYTHING_OK,
};
use everything_sys_bindgen::{
    DWORD, EVERYTHING_REQUEST_DATE_ACCESSED, EVERYTHING_REQUEST_DATE_CREATED,
    EVERYTHING_REQUEST_DATE_MODIFIED, EVERYTHING_REQUEST_FILE_NAME, EVERYTHING_REQUEST_PATH,
    EVERYTHING_REQUEST_RUN_COUNT, EVERYTHING_REQUEST_SIZE, EVERYTHING_SORT_DATE_ACCESSED_ASCENDING,
    EVERYTHING_SORT_DATE_ACCESSED_DESCENDING, EVERYTHING_SORT_DATE_CREATED_ASCENDING,
    EVERYTHING_SORT_DATE_CREATED_DESCENDING, EVERYTHING_SORT_DATE_MODIFIED_ASCENDING,
    EVERYTHING_SORT_DATE_MODIFIED_DESCENDING, EVERYTHING_SORT_NAME_ASCENDING,
    EVERYTHING_SORT_NAME_DESCENDING, EVERYTHING_SORT_PATH_ASCENDING,
    EVERYTHING_SORT_PATH_DESCENDING, EVERYTHING_SORT_RUN_COUNT_ASCENDING,
    EVERYTHING_SORT_RUN_COUNT_DESCENDING, EVERYTHING_SORT_SIZE_ASCENDING,
    EVERYTHING_SORT_SIZE_DESCENDING,
};
use search_bridge_core::{RequestFields, SortBy, SortMode};

const REQUEST_FLAGS: [(RequestFields, u32); 7] = [
    (RequestFields::FILE_NAME, EVERYTHING_REQUEST_FILE_NAME),
    (RequestFields::PATH, EVERYTHING_REQUEST_PATH),
    (RequestFields::SIZE, EVERYTHING_REQUEST_SIZE),
    (RequestFields::DATE_CREATED, EVERYTHING_REQUEST_DATE_CREATED),
    (RequestFields::DATE_MODIFIED, EVERYTHING_REQUEST_DATE_MODIFIED),
    (RequestFields::DATE_ACCESSED, EVERYTHING_REQUEST_DATE_ACCESSED),
    (RequestFields::RUN_COUNT, EVERYTHING_REQUEST_RUN_COUNT),
];

/// `EVERYTHING_SORT_*` value for a sort mode
pub fn sort_code(sort: SortMode) -> DWORD {
    let (ascending, descending) = match sort.axis {
        SortBy::Name => (EVERYTHING_SORT_NAME_ASCENDING, EVERYTHING_SORT_NAME_DESCENDING),
        SortBy::Dir => (EVERYTHING_SORT_PATH_ASCENDING, EVERYTHING_SORT_PATH_DESCENDING),
        SortBy::Size => (EVERYTHING_SORT_SIZE_ASCENDING, EVERYTHING_SORT_SIZE_DESCENDING),
        SortBy::DateCreated => (
            EVERYTHING_SORT_DATE_CREATED_ASCENDING,
            EVERYTHING_SORT_DATE_CREATED_DESCENDING,
        ),
        SortBy::DateModified => (
            EVERYTHING_SORT_DATE_MODIFIED_ASCENDING,
            EVERYTHING_SORT_DATE_MODIFIED_DESCENDING,
        ),
        SortBy::RunCount => (
            EVERYTHING_SORT_RUN_COUNT_ASCENDING,
            EVERYTHING_SORT_RUN_COUNT_DESCENDING,
        ),
        SortBy::DateAccessed => (
            EVERYTHING_SORT_DATE_ACCESSED_ASCENDING,
            EVERYTHING_SORT_DATE_ACCESSED_DESCENDING,
        ),
    };
    if sort.ascending { ascending } else { descending }
}

/// `EVERYTHING_REQUEST_*` mask for a field set
pub fn request_flags(fields: RequestFields) -> DWORD {
    REQUEST_FLAGS
        .iter()
        .filter(|(field, _)| fields.contains(*field))
        .fold(0, |mask, (_, flag)| mask | flag)
}

/// Message for an `Everything_GetLastError` code
pub fn error_message(code: DWORD) -> &'static str {
    match code {
        EVERYTHING_OK => "no error",
        EVERYTHING_ERROR_MEMORY => "out of memory",
        EVERYTHING_ERROR_IPC => "Everything search client is not running",
        EVERYTHING_ERROR_REGISTERCLASSEX => "unable to register window class",
        EVERYTHING_ERROR_CREATEWINDOW => "unable to create listening window",
        EVERYTHING_ERROR_CREATETHREAD => "unable to create listening thread",
        EVERYTHING_ERROR_INVALIDINDEX => "invalid result index",
        EVERYTHING_ERROR_INVALIDCALL => "invalid call",
        EVERYTHING_ERROR_INVALIDREQUEST => "invalid request data",
        EVERYTHING_ERROR_INVALIDPARAMETER => "bad parameter",
        _ => "unknown error",
    }
}
