// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The single local user's biometric and goal data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    /// Body weight in kg
    pub weight: f64,
    /// Height in cm
    pub height: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub goal: Goal,
}

impl Default for Profile {
    /// Profile used when no stored profile exists.
    fn default() -> Self {
        Self {
            name: "Intern".to_string(),
            age: 22,
            weight: 75.0,
            height: 175.0,
            goal: Goal::MuscleGain,
        }
    }
}

/// Training goal.
///
/// Stored as its snake_case string. Values written by other versions of the
/// app are kept verbatim in `Other` so they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    Other(String),
}

impl Goal {
    pub fn as_str(&self) -> &str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::MuscleGain => "muscle_gain",
            Goal::Maintenance => "maintenance",
            Goal::Other(raw) => raw,
        }
    }

    /// Human-readable label ("weight loss").
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        match value.as_str() {
            "weight_loss" => Goal::WeightLoss,
            "muscle_gain" => Goal::MuscleGain,
            "maintenance" => Goal::Maintenance,
            _ => Goal::Other(value),
        }
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        goal.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_parses_known_values() {
        let profile: Profile = serde_json::from_str(
            r#"{"name":"Sam","age":30,"weight":80,"height":180,"goal":"weight_loss"}"#,
        )
        .unwrap();
        assert_eq!(profile.goal, Goal::WeightLoss);
        assert_eq!(profile.weight, 80.0);
    }

    #[test]
    fn test_unknown_goal_survives_round_trip() {
        let profile: Profile = serde_json::from_str(
            r#"{"name":"Sam","age":30,"weight":80,"height":180,"goal":"bulk_season"}"#,
        )
        .unwrap();
        assert_eq!(profile.goal, Goal::Other("bulk_season".to_string()));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["goal"], "bulk_season");
    }

    #[test]
    fn test_goal_label() {
        assert_eq!(Goal::MuscleGain.label(), "muscle gain");
        assert_eq!(Goal::Maintenance.label(), "maintenance");
    }
}
