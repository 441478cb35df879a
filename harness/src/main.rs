//! Skipcheck - compares reflective and precompiled JSON serialization.
//!
//! Runs the standard battery of records and skip policies under each configured
//! profile and prints what both strategies produced, whether they agree, and
//! which keys diverge when they don't.

mod battery;
mod config;
mod error;
mod report;
mod runner;

use crate::battery::standard_battery;
use crate::config::Config;
use crate::report::{JsonReporter, Reporter, TextReporter};
use crate::runner::{Profile, Runner};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so the transcript on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skipcheck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    run(&config)?;
    Ok(())
}

fn run(config: &Config) -> error::Result<()> {
    let battery = standard_battery();

    let mut reporters: Vec<Box<dyn Reporter>> = Vec::new();
    if config.format.text() {
        reporters.push(Box::new(TextReporter::new(io::stdout())));
    }
    if config.format.json() {
        reporters.push(Box::new(JsonReporter::new(io::stdout())));
    }

    for name in &config.profiles {
        let profile = Profile::by_name(name)
            .ok_or_else(|| config::ConfigError::UnknownProfile(name.clone()))?;
        let runner = Runner::new(profile).with_pretty(config.pretty);
        tracing::debug!(profile = %runner.profile().name, "Profile selected");

        let report = runner.run(&battery);
        for reporter in reporters.iter_mut() {
            reporter.report(&report)?;
        }
    }

    Ok(())
}
