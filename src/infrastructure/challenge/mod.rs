//! Remote challenge verification.

mod turnstile;

pub use turnstile::{SITEVERIFY_URL, TurnstileVerifier};
