// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vertex Tracker startup binary.
//!
//! Opens the local store and logs the current dashboard summary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vertex_tracker::{config::Config, services::DashboardSummary, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), model = %config.gemini_model, "Starting Vertex Tracker");

    let state = AppState::from_config(config)?;

    let summary = DashboardSummary::build(&state.store.snapshot(), chrono::Utc::now());
    tracing::info!(
        profile = %state.store.profile().name,
        goal = %summary.goal_label,
        intake = summary.intake_today,
        calorie_goal = summary.calorie_goal,
        percent = summary.calorie_percent,
        workouts = state.store.workouts().len(),
        meals = state.store.meals().len(),
        "Dashboard"
    );

    for workout in &summary.recent_workouts {
        tracing::info!(
            name = %workout.name,
            exercises = workout.exercises.len(),
            completed = workout.completed,
            "Recent workout"
        );
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vertex_tracker=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
