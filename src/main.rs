mod config;
mod core;
mod models;
mod services;

use config::Settings;
use core::DecisionEngine;
use models::{ProfileInfo, SwipeDirection, UserPreferences};
use services::{EndpointCache, LlmJudge};
use tracing::{error, info};

/// Batch harness standing in for the browser-automation loop: reads
/// preferences and a list of scraped profiles from JSON files, runs the
/// engine over them sequentially, and prints the session stats.
#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting swipe engine...");

    let mut args = std::env::args().skip(1);
    let (prefs_path, profiles_path) = match (args.next(), args.next()) {
        (Some(prefs), Some(profiles)) => (prefs, profiles),
        _ => {
            eprintln!("usage: swipe-engine <preferences.json> <profiles.json>");
            std::process::exit(2);
        }
    };

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    let prefs: UserPreferences = read_json(&prefs_path)?;
    let profiles: Vec<ProfileInfo> = read_json(&profiles_path)?;

    info!(
        profiles = profiles.len(),
        llm_enabled = prefs.llm.enabled,
        "loaded session inputs"
    );

    // The LLM judge is only constructed when preferences ask for it.
    let llm = if prefs.llm.enabled {
        let cache = match &settings.llm.endpoint_cache_file {
            Some(path) => EndpointCache::with_file(path),
            None => EndpointCache::in_memory(),
        };
        Some(LlmJudge::new(settings.llm_config(), cache))
    } else {
        None
    };

    let mut engine = DecisionEngine::new(settings.scoring_config(), llm);

    for profile in &profiles {
        let decision = engine.decide(profile, &prefs).await;
        let arrow = match decision.direction {
            SwipeDirection::Right => "RIGHT",
            SwipeDirection::Left => "LEFT",
        };
        println!(
            "{:<6} {:<20} score={:.2}  {}",
            arrow, profile.name, decision.score, decision.reason
        );
    }

    let stats = engine.stats();
    info!(
        total = stats.total,
        right = stats.right,
        alignment_right = stats.alignment_right,
        fallback_right = stats.fallback_right,
        right_ratio = format!("{:.2}", stats.right_ratio()),
        "session complete"
    );

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> std::io::Result<T> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
