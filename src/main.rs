//! Command-line entry point for the `sensor-dashboard` client.
//!
//! This binary drives the two screens end to end:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing (on stderr)
//! - Logging in with the configured credentials
//! - Opening the graph screen with the configured time range and chart variant
//! - Waiting for the first fetch to settle and printing the chart document
//!   as JSON on stdout
//!
//! # Environment Variables
//! - `DASHBOARD_USERNAME` / `DASHBOARD_PASSWORD` (**required**) – credentials
//! - `API_BASE_URL` (optional) – server address (default: `http://localhost:3000`)
//! - `LOG_LEVEL` (optional) – log verbosity (default: `info`)
//! - `LOG_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See `config.rs` for the full list.
use std::{env, io::IsTerminal, process::ExitCode, sync::Arc};

use chrono::{Local, Utc};
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;

use sensor_dashboard::chart::CHART_TITLE;
use sensor_dashboard::config;
use sensor_dashboard::screens::{GraphScreen, LoginScreen};
use sensor_dashboard::{Route, SensorClient, SessionClient};

// ---

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let http = cfg.http_client()?;

    let mut login = LoginScreen::new(SessionClient::new(http.clone(), &cfg.api_base_url));
    login.set_username(&cfg.username);
    login.set_password(&cfg.password);

    let token = match login.submit().await {
        Some(Route::Graph { token }) => token,
        _ => {
            let message = login.state().error_message.clone().unwrap_or_default();
            eprintln!("{message}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let source = Arc::new(SensorClient::new(http, &cfg.api_base_url));
    let mut graph = GraphScreen::with_selection(
        source,
        token,
        cfg.time_range.clone(),
        cfg.chart_variant,
    );
    let state = graph.settle().await;
    tracing::info!(
        "{} - {} ({:?}, {} readings fetched)",
        CHART_TITLE,
        state.time_range.label(),
        state.status,
        state.readings.len()
    );

    let chart = graph.view(Utc::now(), &Local);
    println!("{}", serde_json::to_string_pretty(&chart)?);

    Ok(ExitCode::SUCCESS)
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Output on stderr, so stdout carries only the chart document
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `LOG_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by `RUST_LOG`, falling back to `LOG_LEVEL`
///
/// This should be called once at application startup before any logging
/// or tracing macros are invoked.
fn init_tracing() {
    // ---
    let span_events = match env::var("LOG_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stderr().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "info",
        };
        EnvFilter::new(format!("{level},reqwest=warn,hyper=warn,hyper_util=warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
