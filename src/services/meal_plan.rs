// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal-plan client.
//!
//! Handles:
//! - Requesting a one-day plan from a [`MealPlanService`]
//! - Parsing and schema-validating the raw response
//! - Single-flight: one outstanding plan request per client
//!
//! The client never writes to the store. Accepting a suggestion is a
//! separate caller action (see [`crate::models::Meal::from_suggestion`]).

use crate::error::{AppError, Result};
use crate::models::{MealPlan, PlanMeal, Profile};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use validator::Validate;

/// Remote service generating a structured one-day meal plan.
#[async_trait]
pub trait MealPlanService: Send + Sync {
    /// Return the raw JSON document produced for `profile`.
    async fn plan_day(&self, profile: &Profile) -> Result<String>;
}

/// Expected top-level response document.
#[derive(Debug, Deserialize)]
struct PlanResponse {
    #[serde(default)]
    meals: Vec<PlanMeal>,
}

/// Caller-facing meal-plan client.
#[derive(Clone)]
pub struct MealPlanClient {
    service: Arc<dyn MealPlanService>,
    in_flight: Arc<AtomicBool>,
}

impl MealPlanClient {
    pub fn new(service: Arc<dyn MealPlanService>) -> Self {
        Self {
            service,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a plan request is outstanding.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Request a plan for `profile`.
    ///
    /// Returns `AlreadyRunning` without contacting the service if another
    /// request from this client is still outstanding.
    pub async fn generate_plan(&self, profile: &Profile) -> MealPlan {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Meal plan already in flight");
            return MealPlan::AlreadyRunning;
        }
        let _guard = InFlightGuard(&self.in_flight);

        match self.service.plan_day(profile).await {
            Ok(raw) => match parse_plan(&raw) {
                Ok(meals) => {
                    tracing::info!(count = meals.len(), "Meal plan generated");
                    MealPlan::Suggested(meals)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding invalid meal plan");
                    MealPlan::Unavailable
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Meal plan request failed");
                MealPlan::Unavailable
            }
        }
    }
}

/// Clears the in-flight flag when the request finishes or is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Parse and validate a raw plan document.
///
/// An empty body counts as a plan with no meals. Any meal that violates
/// the schema invalidates the whole response.
pub fn parse_plan(raw: &str) -> Result<Vec<PlanMeal>> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let response: PlanResponse = serde_json::from_str(body)
        .map_err(|e| AppError::InvalidResponse(format!("Plan is not valid JSON: {}", e)))?;

    for (index, meal) in response.meals.iter().enumerate() {
        meal.validate().map_err(|e| {
            AppError::InvalidResponse(format!("Meal {} failed validation: {}", index, e))
        })?;
    }

    Ok(response.meals)
}

/// Remove a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
