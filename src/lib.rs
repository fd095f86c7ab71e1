// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Vertex Tracker: personal workout and meal tracking with an AI coach
//!
//! This crate provides the application core for a single local user:
//! the persisted store, progress metrics, and the AI advice and
//! meal-plan clients.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{FileSlots, FitnessStore, SlotStorage};
use services::{
    AdviceClient, AdviceService, ConversationSession, GeminiClient, MealPlanClient,
    MealPlanService,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: FitnessStore,
    pub advice: AdviceClient,
    pub meal_plan: MealPlanClient,
}

impl AppState {
    /// Build the state from configuration: file-backed slots and Gemini.
    pub fn from_config(config: Config) -> error::Result<Self> {
        let slots = Arc::new(FileSlots::open(&config.data_dir)?);
        let gemini = Arc::new(GeminiClient::from_config(&config));
        if !gemini.is_configured() {
            tracing::warn!("GEMINI_API_KEY not set; AI coach and meal plans will use fallbacks");
        }
        Ok(Self::with_services(config, slots, gemini.clone(), gemini))
    }

    /// Build the state from explicit collaborators.
    pub fn with_services(
        config: Config,
        slots: Arc<dyn SlotStorage>,
        advice: Arc<dyn AdviceService>,
        meal_plans: Arc<dyn MealPlanService>,
    ) -> Self {
        Self {
            config,
            store: FitnessStore::open(slots),
            advice: AdviceClient::new(advice),
            meal_plan: MealPlanClient::new(meal_plans),
        }
    }

    /// Start a coach conversation greeting the current profile.
    pub fn coach_session(&self) -> ConversationSession {
        ConversationSession::new(self.advice.clone(), &self.store.profile())
    }
}
