// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vertex_tracker::config::Config;
use vertex_tracker::db::{FitnessStore, MemorySlots};
use vertex_tracker::error::{AppError, Result};
use vertex_tracker::models::Profile;
use vertex_tracker::services::{AdviceService, MealPlanService};
use vertex_tracker::AppState;

/// Advice/meal-plan stand-in replying with a fixed result.
#[allow(dead_code)]
pub struct FakeAi {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeAi {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(AppError::AiService)
    }
}

#[async_trait]
impl AdviceService for FakeAi {
    async fn advise(&self, _question: &str, _profile: &Profile) -> Result<String> {
        self.respond()
    }
}

#[async_trait]
impl MealPlanService for FakeAi {
    async fn plan_day(&self, _profile: &Profile) -> Result<String> {
        self.respond()
    }
}

/// Fresh in-memory store.
#[allow(dead_code)]
pub fn test_store() -> (FitnessStore, MemorySlots) {
    let slots = MemorySlots::new();
    (FitnessStore::open(Arc::new(slots.clone())), slots)
}

/// App state over in-memory slots and the given AI stand-in.
#[allow(dead_code)]
pub fn create_test_app(ai: Arc<FakeAi>) -> (AppState, MemorySlots) {
    let slots = MemorySlots::new();
    let state = AppState::with_services(
        Config::test_default(),
        Arc::new(slots.clone()),
        ai.clone(),
        ai,
    );
    (state, slots)
}
