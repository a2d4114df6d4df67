//! goalboard - goal progress dashboard
//!
//! CLI entry point for rendering the dashboard page and printing summaries.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use goalboard::cli::{BaseArgs, Cli, Command, OutputFormat, SourceArgs, get_log_path};
use goalboard::config::Config;
use goalboard::csv::parse_csv_report;
use goalboard::dashboard::{Dashboard, DashboardOptions, DashboardState};
use goalboard::fetch::{Location, fetcher_for};
use goalboard::progress::Pace;
use goalboard::render::{CardRenderer, TemplateLoader};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Render {
            sources,
            output,
            order,
            strict,
        } => {
            let mut config = apply_source_args(config, &sources)?;
            if let Some(order) = order {
                config.display.resolution_order = order;
            }
            cmd_render(&config, now_for(&sources), &output, strict).await
        }
        Command::Summary { sources, format } => {
            let config = apply_source_args(config, &sources)?;
            cmd_summary(&config, now_for(&sources), format).await
        }
        Command::Check { location } => {
            let config = apply_base_args(config, &location)?;
            cmd_check(&config).await
        }
    }
}

/// Fold a `--base` override into the loaded configuration and validate
fn apply_base_args(mut config: Config, args: &BaseArgs) -> Result<Config> {
    if let Some(base) = &args.base {
        config.sources.base = base.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Fold command-line overrides into the loaded configuration and validate
fn apply_source_args(mut config: Config, args: &SourceArgs) -> Result<Config> {
    if let Some(target_km) = args.target_km {
        config.running.target_km = target_km;
    }
    apply_base_args(config, &args.location)
}

fn now_for(args: &SourceArgs) -> NaiveDateTime {
    let now = Local::now().naive_local();
    match args.as_of {
        Some(date) => date.and_time(now.time()),
        None => now,
    }
}

async fn load_dashboard(config: &Config, now: NaiveDateTime) -> Result<Dashboard> {
    let location = Location::parse(&config.sources.base)?;
    info!("Loading goal data from {}", location);
    let fetcher = fetcher_for(location, config.fetch.timeout())?;
    let mut dashboard = Dashboard::new(fetcher, DashboardOptions::from_config(config));
    dashboard.load(now).await;
    Ok(dashboard)
}

/// Render the dashboard page to a file or stdout
async fn cmd_render(config: &Config, now: NaiveDateTime, output: &Path, strict: bool) -> Result<()> {
    debug!(?output, strict, "cmd_render: called");
    let dashboard = load_dashboard(config, now).await?;
    let renderer = CardRenderer::new(&TemplateLoader::new(config.display.templates_dir.as_deref()))?;
    let html = dashboard.render(&renderer)?;

    if output.as_os_str() == "-" {
        print!("{}", html);
    } else {
        fs::write(output, &html).context(format!("Failed to write {}", output.display()))?;
        eprintln!("{} Wrote {}", "✓".green(), output.display().to_string().cyan());
    }

    if let DashboardState::Error(failure) = dashboard.state() {
        eprintln!("{} {}: {}", "✗".red(), failure.view.headline, failure.cause);
        if strict {
            return Err(eyre::eyre!("{}", failure.view.headline));
        }
    }
    Ok(())
}

/// Print running, gym and resolution summaries
async fn cmd_summary(config: &Config, now: NaiveDateTime, format: OutputFormat) -> Result<()> {
    debug!(%format, "cmd_summary: called");
    let dashboard = load_dashboard(config, now).await?;

    let data = match dashboard.state() {
        DashboardState::Displayed(data) => data,
        DashboardState::Error(failure) => {
            return Err(eyre::eyre!("{}: {}", failure.view.headline, failure.cause));
        }
        other => return Err(eyre::eyre!("Dashboard did not finish loading (state: {})", other.name())),
    };

    if format == OutputFormat::Json {
        let resolutions: Vec<serde_json::Value> = data
            .resolutions
            .iter()
            .map(|r| {
                serde_json::json!({
                    "title": r.title,
                    "status": r.status.as_str(),
                    "progress": r.progress(),
                    "category": r.category,
                })
            })
            .collect();
        let summary = serde_json::json!({
            "running": data.running,
            "gym": data.gym,
            "resolutions": resolutions,
            "last_updated": data.last_updated.format("%Y-%m-%dT%H:%M:%S").to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some(running) = &data.running {
        let pace = running.pace();
        let pace_text = match pace {
            Pace::Ahead => format!("{} by {:.1} km", pace, running.difference.abs()).green(),
            Pace::Behind => format!("{} by {:.1} km", pace, running.difference.abs()).red(),
            Pace::OnTrack => pace.to_string().yellow(),
        };
        println!("{}", "Running".bold());
        println!(
            "  {:.1} / {} km ({:.1}%)",
            running.total_distance, running.target, running.percentage
        );
        println!(
            "  Expected: {:.1} km ({:.1}%), {}",
            running.expected_distance, running.expected_percentage, pace_text
        );
    }

    if let Some(gym) = &data.gym {
        println!("{}", "Gym".bold());
        println!(
            "  {} / {} weeks with a visit, {} missed",
            gym.weeks_with_visits, gym.total_weeks, gym.weeks_without_visits
        );
        println!(
            "  {} visits, {:.2} per week",
            gym.total_visits, gym.average_visits_per_week
        );
    }

    println!("{}", "Resolutions".bold());
    if data.resolutions.is_empty() {
        println!("  {}", "No resolutions found".dimmed());
    }
    for r in &data.resolutions {
        println!("  {:>3}% {} {}", r.progress(), r.title, format!("[{}]", r.status.label()).dimmed());
    }

    Ok(())
}

/// Parse every source and report accepted/dropped rows
async fn cmd_check(config: &Config) -> Result<()> {
    debug!("cmd_check: called");
    let location = Location::parse(&config.sources.base)?;
    let fetcher = fetcher_for(location, config.fetch.timeout())?;

    let sources = [
        (config.sources.resolutions.as_str(), true),
        (config.sources.runs.as_str(), false),
        (config.sources.gym.as_str(), false),
    ];

    let mut missing_required = false;
    for (name, required) in sources {
        match fetcher.fetch_text(name).await {
            Ok(text) => {
                let report = parse_csv_report(&text);
                println!(
                    "{} {}: {} rows, {} dropped",
                    "✓".green(),
                    name.cyan(),
                    report.rows.len(),
                    report.dropped.len()
                );
                for dropped in &report.dropped {
                    println!(
                        "    line {}: expected {} fields, found {}",
                        dropped.line_number, dropped.expected, dropped.found
                    );
                }
            }
            Err(e) if required => {
                println!("{} {}: {}", "✗".red(), name.cyan(), e);
                missing_required = true;
            }
            Err(e) => {
                println!("{} {}: {} (optional)", "-".yellow(), name.cyan(), e);
            }
        }
    }

    if missing_required {
        return Err(eyre::eyre!("Required source {} is unavailable", config.sources.resolutions));
    }
    Ok(())
}
