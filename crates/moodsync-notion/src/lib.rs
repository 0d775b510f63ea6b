//! Notion-style target store and title generation clients.
//!
//! Transport is `ureq` (blocking, one request in flight at a time, matching
//! the pipeline's sequential model); response decoding lives in [`parse`]
//! as pure functions.

pub mod parse;
pub mod store;
pub mod titles;

pub use parse::{DATE_PROPERTY, parse_query_response, parse_schema_response};
pub use store::StoreClient;
pub use titles::{TitleClient, build_title_prompt, extract_title};
