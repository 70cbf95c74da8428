//! Timetable Board Binary
//!
//! Terminal front end for the timetabling engine: fetches the prepared
//! problem, renders the schedule grids, and drives solve / stop / analyze
//! against the engine's REST API.
//!
//! # Usage
//!
//! ```bash
//! # Render the prepared demo problem
//! timetable-board show
//!
//! # Solve for up to 30 seconds, polling and printing the score
//! timetable-board solve 30
//!
//! # Score breakdown of the current solution
//! timetable-board analyze
//!
//! # List constraint settings, toggle one, change a weight
//! timetable-board constraints
//! timetable-board toggle 3 off
//! timetable-board weight 3 -5
//!
//! # List known solve jobs
//! timetable-board jobs
//! ```
//!
//! # Environment Variables
//!
//! - `ENGINE_URL`: engine base URL (default: http://localhost:8080)
//! - `POLL_INTERVAL_MS`: refresh cadence while solving (default: 2000)
//! - `REQUEST_TIMEOUT_SECS`: per-request timeout (default: 20)
//! - `BOARD_CONFIG`: optional path to a TOML config file
//! - `RUST_LOG`: log level (default: info)

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use timetable_client::client::{HttpEngineClient, SolverEngine};
use timetable_client::config::ClientConfig;
use timetable_client::services::SchedulePoller;
use timetable_client::view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let config_path = env::var("BOARD_CONFIG").ok().map(PathBuf::from);
    let config = ClientConfig::load(config_path.as_deref())?;
    info!(engine_url = %config.engine.base_url, "connecting to timetabling engine");

    let engine = Arc::new(HttpEngineClient::new(
        &config.engine.base_url,
        config.request_timeout(),
    )?);
    let poller = SchedulePoller::new(engine.clone(), config.poll_interval());

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("show");

    match command {
        "show" => {
            if poller.load_problem().await.is_err() {
                // Absence of demo data is a degraded state, not a crash.
                println!("No test data available");
                return Ok(());
            }
            print_schedule(&poller);
        }
        "solve" => {
            let max_secs: u64 = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .unwrap_or(30);
            poller.load_problem().await?;
            let job_id = poller.start().await?;
            info!(%job_id, "solving, press Ctrl-C to abort");

            let deadline = Instant::now() + Duration::from_secs(max_secs);
            while poller.is_solving() {
                tokio::time::sleep(config.poll_interval()).await;
                if let Some(view) = poller.view() {
                    println!("Score: {}", view.score.as_deref().unwrap_or("?"));
                }
                if Instant::now() >= deadline && poller.is_solving() {
                    info!("time budget reached, stopping the solver");
                    poller.stop().await?;
                    break;
                }
            }
            if let Some(error) = poller.last_error() {
                warn!(%error, "last refresh error");
            }
            print_schedule(&poller);
        }
        "analyze" => {
            poller.load_problem().await?;
            match poller.analyze().await {
                Ok(ranked) => print!("{}", view::render_analysis(&ranked)),
                Err(e) => println!("{}", e),
            }
        }
        "constraints" => {
            let constraints = engine.list_constraints().await?;
            for c in &constraints {
                println!(
                    "[{}] {} ({}, weight {}) {} - {}",
                    c.id,
                    c.constraint_name,
                    c.constraint_type,
                    c.constraint_weight,
                    if c.enable_flag { "on" } else { "off" },
                    c.description
                );
            }
        }
        "toggle" => {
            let id: i64 = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| anyhow::anyhow!("usage: timetable-board toggle <id> <on|off>"))?;
            let enabled = match args.get(2).map(String::as_str) {
                Some("on") => true,
                Some("off") => false,
                _ => anyhow::bail!("usage: timetable-board toggle <id> <on|off>"),
            };
            engine.toggle_constraint(id, enabled).await?;
            println!("Constraint {} set to {}", id, if enabled { "on" } else { "off" });
        }
        "weight" => {
            let id: i64 = args
                .get(1)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| anyhow::anyhow!("usage: timetable-board weight <id> <value>"))?;
            let value: i64 = args
                .get(2)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| anyhow::anyhow!("usage: timetable-board weight <id> <value>"))?;
            engine.update_constraint_weight(id, value).await?;
            println!("Constraint {} weight set to {}", id, value);
        }
        "jobs" => {
            let jobs = engine.list_jobs().await?;
            if jobs.is_empty() {
                println!("No solve jobs");
            }
            for job_id in &jobs {
                println!("{}", job_id);
            }
        }
        other => {
            anyhow::bail!(
                "unknown command {:?}; expected show, solve, analyze, constraints, toggle, weight or jobs",
                other
            );
        }
    }

    Ok(())
}

fn print_schedule(poller: &SchedulePoller) {
    match poller.view() {
        Some(view) => print!("{}", view::render_schedule(&view)),
        None => println!("No schedule loaded"),
    }
}
