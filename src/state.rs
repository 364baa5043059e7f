use std::sync::Arc;

use crate::application::services::{ChallengeService, LinkService, RedirectService};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub challenge_service: Arc<ChallengeService>,
    pub redirect_service: Arc<RedirectService>,
    /// Redirect target for `/`; `None` makes `/` a plain miss.
    pub home_url: Option<String>,
    pub behind_proxy: bool,
}
