//! Template loading and card rendering
//!
//! Template loading chain:
//! 1. `{templates-dir}/{name}.hbs` (user override, when configured)
//! 2. Embedded fallback in code

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use super::views::{ErrorView, GymCard, PageView, ResolutionCard, RunningCard};
use crate::progress::{GymProgress, RunningProgress};

/// Every template the renderer registers; cards double as page partials
pub const TEMPLATE_NAMES: &[&str] = &["page", "resolution-card", "running-card", "gym-card", "error"];

/// Finds template sources, preferring a user override directory
#[derive(Debug, Clone, Default)]
pub struct TemplateLoader {
    user_dir: Option<PathBuf>,
}

impl TemplateLoader {
    /// Create a loader that checks `dir` before the embedded templates
    pub fn new(dir: Option<&Path>) -> Self {
        debug!(?dir, "TemplateLoader::new: called");
        let user_dir = dir.and_then(|d| {
            if d.is_dir() {
                debug!(?d, "TemplateLoader::new: override directory found");
                Some(d.to_path_buf())
            } else {
                debug!(?d, "TemplateLoader::new: override directory missing, using embedded");
                None
            }
        });
        Self { user_dir }
    }

    /// Create a loader that only uses embedded templates
    pub fn embedded_only() -> Self {
        Self { user_dir: None }
    }

    /// Load a template by name
    pub fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "TemplateLoader::load_template: called");
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.hbs", name));
            if path.exists() {
                debug!(?path, "TemplateLoader::load_template: found in override directory");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read template {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "TemplateLoader::load_template: using embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Template not found: {}", name))
    }
}

/// Renders cards and pages; all `{{value}}` output is HTML-escaped
pub struct CardRenderer {
    hbs: Handlebars<'static>,
}

impl CardRenderer {
    /// Register every template from the loader
    pub fn new(loader: &TemplateLoader) -> Result<Self> {
        debug!("CardRenderer::new: called");
        let mut hbs = Handlebars::new();
        for name in TEMPLATE_NAMES {
            let source = loader.load_template(name)?;
            hbs.register_template_string(name, source)
                .map_err(|e| eyre!("Failed to compile template {}: {}", name, e))?;
        }
        info!("Registered {} templates", TEMPLATE_NAMES.len());
        Ok(Self { hbs })
    }

    /// Renderer backed only by the embedded templates
    pub fn embedded() -> Result<Self> {
        Self::new(&TemplateLoader::embedded_only())
    }

    fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        debug!(%name, "CardRenderer::render: called");
        self.hbs
            .render(name, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", name, e))
    }

    pub fn render_resolution_card(&self, card: &ResolutionCard) -> Result<String> {
        self.render("resolution-card", card)
    }

    pub fn render_running_card(&self, progress: &RunningProgress) -> Result<String> {
        self.render("running-card", &RunningCard::new(progress))
    }

    pub fn render_gym_card(&self, progress: &GymProgress) -> Result<String> {
        self.render("gym-card", &GymCard::new(progress))
    }

    pub fn render_error(&self, view: &ErrorView) -> Result<String> {
        self.render("error", view)
    }

    pub fn render_page(&self, page: &PageView) -> Result<String> {
        self.render("page", page)
    }
}
