//! Template contexts
//!
//! Display values are formatted here so templates only substitute text.
//! Every string ends up in a `{{value}}` slot and is escaped by Handlebars.

use serde::Serialize;

use crate::progress::{GymProgress, Pace, RunningProgress};
use crate::resolution::Resolution;

/// Link schemes allowed into an `href`
const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Keep relative links and http/https/mailto links, drop everything else
pub fn safe_link(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    let scheme_end = link.find(':');
    let path_start = link.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (Some(colon), Some(slash)) if slash < colon => Some(link.to_string()),
        (Some(colon), _) => {
            let scheme = link[..colon].to_ascii_lowercase();
            LINK_SCHEMES.contains(&scheme.as_str()).then(|| link.to_string())
        }
        (None, _) => Some(link.to_string()),
    }
}

/// Context for the `resolution-card` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionCard {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status_class: String,
    pub status_label: String,
    pub progress: u8,
    pub counts: Option<String>,
    pub link: Option<String>,
    pub animation_delay: String,
}

impl ResolutionCard {
    /// Build the card for the resolution at `index` in display order
    pub fn new(resolution: &Resolution, index: usize) -> Self {
        let counts = match (&resolution.current, &resolution.target) {
            (Some(current), Some(target)) => Some(format!("{} / {}", current, target)),
            (Some(current), None) => Some(current.clone()),
            (None, Some(target)) => Some(format!("Target: {}", target)),
            (None, None) => None,
        };

        Self {
            title: resolution.title.clone(),
            description: resolution.description.clone(),
            category: resolution.category.clone(),
            status_class: resolution.status.css_class(),
            status_label: resolution.status.label(),
            progress: resolution.progress(),
            counts,
            link: resolution.link.as_deref().and_then(safe_link),
            animation_delay: format!("{:.1}", index as f64 * 0.1),
        }
    }
}

/// Context for the `running-card` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningCard {
    pub total: String,
    pub target: String,
    pub percentage: String,
    pub expected: String,
    pub expected_percentage: String,
    pub bar_width: String,
    pub pace_class: String,
    pub pace_label: String,
    pub summary: String,
}

impl RunningCard {
    pub fn new(progress: &RunningProgress) -> Self {
        let pace = progress.pace();
        let gap = format!("{:.1}", progress.difference.abs());
        let summary = match pace {
            Pace::Ahead => format!("{} km ahead of schedule", gap),
            Pace::Behind => format!("{} km behind schedule", gap),
            Pace::OnTrack => "Right on schedule".to_string(),
        };

        Self {
            total: format!("{:.1}", progress.total_distance),
            target: format_number(progress.target),
            percentage: format!("{:.1}", progress.percentage),
            expected: format!("{:.1}", progress.expected_distance),
            expected_percentage: format!("{:.1}", progress.expected_percentage),
            bar_width: format!("{:.1}", progress.percentage.clamp(0.0, 100.0)),
            pace_class: pace.to_string().replace(' ', "-"),
            pace_label: pace.to_string(),
            summary,
        }
    }
}

/// Context for the `gym-card` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GymCard {
    pub weeks_with_visits: u32,
    pub weeks_without_visits: u32,
    pub total_visits: u32,
    pub total_weeks: u32,
    pub average_visits_per_week: String,
    pub bar_width: String,
}

impl GymCard {
    pub fn new(progress: &GymProgress) -> Self {
        let ratio = if progress.total_weeks > 0 {
            f64::from(progress.weeks_with_visits) / f64::from(progress.total_weeks) * 100.0
        } else {
            0.0
        };

        Self {
            weeks_with_visits: progress.weeks_with_visits,
            weeks_without_visits: progress.weeks_without_visits,
            total_visits: progress.total_visits,
            total_weeks: progress.total_weeks,
            average_visits_per_week: format!("{:.2}", progress.average_visits_per_week),
            bar_width: format!("{:.1}", ratio.clamp(0.0, 100.0)),
        }
    }
}

/// Context for the `error` template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub headline: String,
    pub detail: String,
    pub command: Option<String>,
}

/// Context for the `page` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub title: String,
    pub running: Option<RunningCard>,
    pub gym: Option<GymCard>,
    /// Spacer after each featured card when more than one is shown
    pub show_spacer: bool,
    pub resolutions: Vec<ResolutionCard>,
    pub error: Option<ErrorView>,
    pub last_updated: Option<String>,
}

impl PageView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            running: None,
            gym: None,
            show_spacer: false,
            resolutions: Vec::new(),
            error: None,
            last_updated: None,
        }
    }
}

/// Whole numbers without a trailing `.0`, otherwise one decimal
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
