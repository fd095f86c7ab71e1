// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AI meal-plan suggestion model and its validated outcome.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// One meal suggested by the meal-plan service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanMeal {
    #[validate(length(max = 200), custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub calories: f64,
    #[validate(range(min = 0.0))]
    pub protein: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub fats: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Result of a meal-plan request.
///
/// Only `Suggested` carries meals; everything else means "no suggestions"
/// and is a normal, silent outcome for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum MealPlan {
    /// Schema-valid suggestions (may be empty if the service planned nothing)
    Suggested(Vec<PlanMeal>),
    /// Transport failure, remote error, or a response that failed validation
    Unavailable,
    /// Another plan request was still outstanding
    AlreadyRunning,
}

impl MealPlan {
    /// Suggested meals, empty for every non-`Suggested` outcome.
    pub fn meals(&self) -> &[PlanMeal] {
        match self {
            MealPlan::Suggested(meals) => meals,
            MealPlan::Unavailable | MealPlan::AlreadyRunning => &[],
        }
    }

    pub fn into_meals(self) -> Vec<PlanMeal> {
        match self {
            MealPlan::Suggested(meals) => meals,
            MealPlan::Unavailable | MealPlan::AlreadyRunning => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meals().is_empty()
    }
}
