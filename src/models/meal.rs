// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal log model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{new_record_id, null_as_default, DraftError, PlanMeal};

/// A logged or planned food intake record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Meal {
    /// Unique within the meal collection
    pub id: String,
    pub name: String,
    /// Energy in kcal; `null` reads as 0 but the key is required
    #[serde(deserialize_with = "null_as_default")]
    pub calories: f64,
    /// Grams of protein
    #[serde(default, deserialize_with = "null_as_default")]
    pub protein: f64,
    /// Grams of carbohydrate
    #[serde(default, deserialize_with = "null_as_default")]
    pub carbs: f64,
    /// Grams of fat
    #[serde(default, deserialize_with = "null_as_default")]
    pub fats: f64,
    /// When the meal was logged
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub time: DateTime<Utc>,
    /// True once actually eaten; false while only planned/logged
    #[serde(default)]
    pub completed: bool,
}

impl Meal {
    /// Build a meal from manual entry.
    pub fn manual(
        name: &str,
        calories: f64,
        protein: Option<f64>,
        now: DateTime<Utc>,
    ) -> Result<Self, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }
        if !calories.is_finite() || calories <= 0.0 {
            return Err(DraftError::InvalidCalories(calories));
        }

        Ok(Self {
            id: new_record_id(),
            name: name.to_string(),
            calories,
            protein: protein.filter(|p| p.is_finite() && *p >= 0.0).unwrap_or(0.0),
            carbs: 0.0,
            fats: 0.0,
            time: now,
            completed: false,
        })
    }

    /// Accept an AI-suggested meal into the log.
    pub fn from_suggestion(suggestion: &PlanMeal, now: DateTime<Utc>) -> Self {
        Self {
            id: new_record_id(),
            name: suggestion.name.clone(),
            calories: suggestion.calories,
            protein: suggestion.protein,
            carbs: suggestion.carbs.unwrap_or(0.0),
            fats: suggestion.fats.unwrap_or(0.0),
            time: now,
            completed: false,
        }
    }
}
