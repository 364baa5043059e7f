//! Challenge interstitial page.

use askama::Template;
use askama_web::WebTemplate;

/// Page served in place of a gated redirect.
///
/// Renders `templates/interstitial.html`, which runs an invisible Turnstile
/// widget and posts the resulting token back to the same path and query.
#[derive(Template, WebTemplate)]
#[template(path = "interstitial.html")]
pub struct InterstitialTemplate<'a> {
    pub site_key: &'a str,
}
