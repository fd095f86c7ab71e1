// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod advice;
pub mod coach;
pub mod gemini;
pub mod meal_plan;
pub mod metrics;

pub use advice::{AdviceClient, AdviceService, ADVICE_FALLBACK};
pub use coach::{ConversationSession, SubmitOutcome};
pub use gemini::GeminiClient;
pub use meal_plan::{MealPlanClient, MealPlanService};
pub use metrics::DashboardSummary;
