//! Dashboard orchestration
//!
//! Fetches the three CSV sources, runs each through parse -> calculate, and
//! holds the result as a [`DashboardState`]:
//!
//! ```text
//! Init -> Loading -> Displayed
//!                 -> Error
//! ```
//!
//! Runs and gym visits are optional: a failed fetch just leaves their card
//! out. Resolutions are mandatory: a failed fetch replaces the whole
//! resolutions section with an error view.

use std::sync::Arc;

use chrono::NaiveDateTime;
use eyre::Result;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::csv::parse_csv;
use crate::fetch::{FetchError, Fetcher};
use crate::progress::{
    GymProgress, GymVisit, Run, RunningProgress, calculate_gym_progress, calculate_running_progress,
};
use crate::render::{CardRenderer, ErrorView, GymCard, PageView, ResolutionCard, RunningCard};
use crate::resolution::{Resolution, ResolutionOrder};

/// Settings the dashboard needs from the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    pub title: String,
    pub resolutions_source: String,
    pub runs_source: String,
    pub gym_source: String,
    pub running_target_km: f64,
    pub resolution_order: ResolutionOrder,
}

impl DashboardOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.display.title.clone(),
            resolutions_source: config.sources.resolutions.clone(),
            runs_source: config.sources.runs.clone(),
            gym_source: config.sources.gym.clone(),
            running_target_km: config.running.target_km,
            resolution_order: config.display.resolution_order,
        }
    }
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Data ready to be shown
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub running: Option<RunningProgress>,
    pub gym: Option<GymProgress>,
    pub resolutions: Vec<Resolution>,
    pub last_updated: NaiveDateTime,
}

impl DashboardData {
    /// Number of featured cards (running, gym) present
    pub fn featured_count(&self) -> usize {
        usize::from(self.running.is_some()) + usize::from(self.gym.is_some())
    }
}

/// Why the mandatory resolutions source could not be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub view: ErrorView,
    pub cause: String,
}

impl LoadFailure {
    /// Build the user-facing message
    ///
    /// A local source that exists but could not be read gets serving
    /// guidance; a missing file or any remote failure gets the generic text.
    pub fn new(source: &str, error: &FetchError, local: bool) -> Self {
        let view = if local && !error.is_not_found() {
            ErrorView {
                headline: format!("Error loading {}", source),
                detail: "The file could not be read from disk. Serve this directory with a \
                         minimal HTTP server and pass --base http://localhost:8000/ instead:"
                    .to_string(),
                command: Some("python3 -m http.server 8000".to_string()),
            }
        } else {
            ErrorView {
                headline: format!("Error loading {}", source),
                detail: "Make sure the file exists and is properly formatted.".to_string(),
                command: None,
            }
        };

        Self {
            view,
            cause: error.to_string(),
        }
    }
}

/// Lifecycle of one dashboard load
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Init,
    Loading,
    Displayed(DashboardData),
    Error(LoadFailure),
}

impl DashboardState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Loading => "loading",
            Self::Displayed(_) => "displayed",
            Self::Error(_) => "error",
        }
    }
}

/// Loads goal data through a [`Fetcher`] and renders it
pub struct Dashboard {
    fetcher: Arc<dyn Fetcher>,
    options: DashboardOptions,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(fetcher: Arc<dyn Fetcher>, options: DashboardOptions) -> Self {
        debug!(location = %fetcher.location(), ?options, "Dashboard::new: called");
        Self {
            fetcher,
            options,
            state: DashboardState::Init,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    fn transition(&mut self, next: DashboardState) {
        info!("Dashboard state {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// Fetch all sources concurrently and settle into Displayed or Error
    pub async fn load(&mut self, now: NaiveDateTime) -> &DashboardState {
        debug!(%now, "Dashboard::load: called");
        self.transition(DashboardState::Loading);

        let fetcher = Arc::clone(&self.fetcher);
        let (runs_text, gym_text, resolutions_text) = tokio::join!(
            fetcher.fetch_text(&self.options.runs_source),
            fetcher.fetch_text(&self.options.gym_source),
            fetcher.fetch_text(&self.options.resolutions_source),
        );

        let today = now.date();
        let running = match runs_text {
            Ok(text) => {
                let runs: Vec<Run> = parse_csv(&text).iter().map(Run::from_row).collect();
                debug!(runs = runs.len(), "Dashboard::load: running data loaded");
                Some(calculate_running_progress(&runs, self.options.running_target_km, today))
            }
            Err(e) => {
                warn!("Running data unavailable ({}): {}", self.options.runs_source, e);
                None
            }
        };

        let gym = match gym_text {
            Ok(text) => {
                let visits: Vec<GymVisit> = parse_csv(&text).iter().map(GymVisit::from_row).collect();
                debug!(visits = visits.len(), "Dashboard::load: gym data loaded");
                Some(calculate_gym_progress(&visits, today))
            }
            Err(e) => {
                warn!("Gym data unavailable ({}): {}", self.options.gym_source, e);
                None
            }
        };

        let next = match resolutions_text {
            Ok(text) => {
                let mut resolutions: Vec<Resolution> = parse_csv(&text).iter().map(Resolution::from_row).collect();
                self.options.resolution_order.apply(&mut resolutions);
                info!(
                    "Loaded {} resolutions (running: {}, gym: {})",
                    resolutions.len(),
                    running.is_some(),
                    gym.is_some()
                );
                DashboardState::Displayed(DashboardData {
                    running,
                    gym,
                    resolutions,
                    last_updated: now,
                })
            }
            Err(e) => {
                error!("Error loading {}: {}", self.options.resolutions_source, e);
                DashboardState::Error(LoadFailure::new(
                    &self.options.resolutions_source,
                    &e,
                    self.fetcher.location().is_local(),
                ))
            }
        };

        self.transition(next);
        &self.state
    }

    /// Build the page context for the current state
    pub fn page_view(&self) -> PageView {
        debug!(state = self.state.name(), "Dashboard::page_view: called");
        let mut page = PageView::new(self.options.title.clone());
        match &self.state {
            DashboardState::Displayed(data) => {
                page.running = data.running.as_ref().map(RunningCard::new);
                page.gym = data.gym.as_ref().map(GymCard::new);
                page.show_spacer = data.featured_count() > 1;
                page.resolutions = data
                    .resolutions
                    .iter()
                    .enumerate()
                    .map(|(index, r)| ResolutionCard::new(r, index))
                    .collect();
                page.last_updated = Some(format_last_updated(data.last_updated));
            }
            DashboardState::Error(failure) => {
                page.error = Some(failure.view.clone());
            }
            DashboardState::Init | DashboardState::Loading => {}
        }
        page
    }

    /// Render the full HTML page for the current state
    pub fn render(&self, renderer: &CardRenderer) -> Result<String> {
        renderer.render_page(&self.page_view())
    }
}

/// Long US-style timestamp, e.g. `October 17, 2026 at 03:04 PM`
pub fn format_last_updated(now: NaiveDateTime) -> String {
    now.format("%B %-d, %Y at %I:%M %p").to_string()
}
