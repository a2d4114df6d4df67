//! Progress calculations
//!
//! Pure functions turning parsed CSV rows into summary statistics:
//! - [`running`] - linear target tracking for yearly distance goals
//! - [`gym`] - ISO week-bucketed attendance
//! - [`status`] - fixed percent-complete per resolution status

pub mod gym;
pub mod running;
pub mod status;

pub use gym::{GymProgress, GymVisit, calculate_gym_progress, elapsed_weeks, parse_visit_date};
pub use running::{
    DEFAULT_TARGET_KM, Pace, Run, RunningProgress, calculate_running_progress, days_in_year, is_leap_year,
    parse_distance, round_to,
};
pub use status::{ResolutionStatus, status_progress};
