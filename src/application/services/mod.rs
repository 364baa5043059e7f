//! Services implementing the redirect pipeline.

pub mod challenge_service;
pub mod link_service;
pub mod redirect_service;

pub use challenge_service::ChallengeService;
pub use link_service::LinkService;
pub use redirect_service::RedirectService;
