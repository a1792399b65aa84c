//! Adapter core for external desktop search engines
//!
//! Translates loosely-typed caller options into a configured backend session
//! and marshals the backend's result cursor into portable values. Matching,
//! sorting and filtering all happen inside the backend.
//!
//! ```text
//! caller → binding (argument checks) → options → adapter (configure, execute)
//!        → materialize (convert rows) → SearchResponse → caller
//! ```

pub mod adapter;
pub mod backend;
pub mod binding;
pub mod convert;
pub mod error;
pub mod fixture;
pub mod materialize;
pub mod options;
pub mod result;

pub use adapter::SearchAdapter;
pub use backend::{BackendError, SearchBackend};
pub use error::{AdapterError, Result};
pub use options::{RequestFields, SearchOptions, SortBy, SortMode};
pub use result::{ResultType, SearchResponse, SearchResult};
