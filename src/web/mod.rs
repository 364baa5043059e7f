//! Server-rendered HTML pages.
//!
//! Uses Askama templates from `templates/`.

pub mod interstitial;

pub use interstitial::InterstitialTemplate;
