//! Embedded templates
//!
//! These are compiled into the binary from .hbs files at build time.

use tracing::debug;

/// Full dashboard page
pub const PAGE: &str = include_str!("../../templates/page.hbs");

/// Plain resolution card
pub const RESOLUTION_CARD: &str = include_str!("../../templates/resolution-card.hbs");

/// Featured running goal card
pub const RUNNING_CARD: &str = include_str!("../../templates/running-card.hbs");

/// Featured gym goal card
pub const GYM_CARD: &str = include_str!("../../templates/gym-card.hbs");

/// Resolutions load failure
pub const ERROR: &str = include_str!("../../templates/error.hbs");

/// Get the embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "page" => Some(PAGE),
        "resolution-card" => Some(RESOLUTION_CARD),
        "running-card" => Some(RUNNING_CARD),
        "gym-card" => Some(GYM_CARD),
        "error" => Some(ERROR),
        _ => {
            debug!(%name, "get_embedded: no match found");
            None
        }
    }
}
