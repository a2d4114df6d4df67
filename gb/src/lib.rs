//! goalboard - goal progress dashboard from CSV files
//!
//! Reads a resolutions list plus optional running and gym logs, computes how
//! each goal is tracking for the current year, and renders the result as a
//! static HTML page of cards.
//!
//! # Modules
//!
//! - [`csv`] - permissive header-keyed CSV parsing
//! - [`progress`] - running, gym and status progress calculations
//! - [`resolution`] - resolution records and ordering
//! - [`render`] - Handlebars card and page templates
//! - [`fetch`] - local and HTTP source fetching
//! - [`dashboard`] - load state machine tying it all together
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod csv;
pub mod dashboard;
pub mod fetch;
pub mod progress;
pub mod render;
pub mod resolution;

// Re-export commonly used types
pub use config::Config;
pub use csv::{DroppedLine, Field, ParseReport, Row, parse_csv, parse_csv_report};
pub use dashboard::{Dashboard, DashboardData, DashboardOptions, DashboardState, LoadFailure, format_last_updated};
pub use fetch::{FetchError, Fetcher, FileFetcher, HttpFetcher, Location, fetcher_for};
pub use progress::{
    GymProgress, GymVisit, Pace, ResolutionStatus, Run, RunningProgress, calculate_gym_progress,
    calculate_running_progress, status_progress,
};
pub use render::{CardRenderer, ErrorView, PageView, ResolutionCard, TemplateLoader};
pub use resolution::{Resolution, ResolutionOrder};
