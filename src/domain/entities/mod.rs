//! Core domain entities of the redirect service.
//!
//! Entities are plain data structures; behaviour lives in the application
//! services.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - Target of a slug as read from the link store
//! - [`RequestContext`] - Client metadata for a single request
//! - [`AccessEvent`] - A redirect as recorded in the access log
//! - [`RedirectDecision`] - The redirect sent back to the client

pub mod access_event;
pub mod link;
pub mod redirect;
pub mod request_context;

pub use access_event::AccessEvent;
pub use link::LinkRecord;
pub use redirect::RedirectDecision;
pub use request_context::RequestContext;
