//! Card rendering
//!
//! Handlebars templates for the dashboard page and its cards. Values reach
//! the markup only through `{{value}}` slots, so user text is escaped by the
//! engine rather than at individual call sites.

pub mod embedded;
mod loader;
mod views;

pub use loader::{CardRenderer, TEMPLATE_NAMES, TemplateLoader};
pub use views::{ErrorView, GymCard, PageView, ResolutionCard, RunningCard, safe_link};
