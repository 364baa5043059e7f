//! Helpers for request parsing and URL handling.
//!
//! - [`slug`] - Slug extraction from the request path and admission rules
//! - [`query`] - Query-string forwarding onto redirect targets
//! - [`client_info`] - Client metadata from request headers

pub mod client_info;
pub mod query;
pub mod slug;
