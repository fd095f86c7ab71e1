// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived progress metrics.
//!
//! Pure functions over store snapshots. Nothing here touches storage.

use crate::db::StoreSnapshot;
use crate::models::{Goal, Meal, Profile, Workout};
use crate::time_utils::{day_label, same_day};
use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Daily kcal target for weight loss.
pub const WEIGHT_LOSS_CALORIES: u32 = 2000;
/// Daily kcal target for muscle gain.
pub const MUSCLE_GAIN_CALORIES: u32 = 2800;
/// Daily kcal target for maintenance and any unrecognized goal.
pub const MAINTENANCE_CALORIES: u32 = 2400;

/// Meals shown in the intake chart.
pub const CHART_MEAL_COUNT: usize = 7;
/// Workouts shown in the recent list.
pub const RECENT_WORKOUT_COUNT: usize = 3;

/// Sum of calories eaten (completed meals) on the reference date's day.
pub fn todays_completed_calories(meals: &[Meal], reference: DateTime<Utc>) -> f64 {
    meals
        .iter()
        .filter(|m| m.completed && same_day(m.time, reference))
        .map(|m| m.calories)
        .sum()
}

/// Daily calorie target for the profile's goal.
///
/// This is a fixed policy table, never zero.
pub fn calorie_goal(profile: &Profile) -> u32 {
    match profile.goal {
        Goal::WeightLoss => WEIGHT_LOSS_CALORIES,
        Goal::MuscleGain => MUSCLE_GAIN_CALORIES,
        Goal::Maintenance | Goal::Other(_) => MAINTENANCE_CALORIES,
    }
}

/// Intake as a whole percentage of the goal, clamped to `0..=100`.
pub fn calorie_percent(intake: f64, goal: u32) -> u8 {
    debug_assert!(goal > 0, "calorie goal must come from the policy table");
    if goal == 0 || !intake.is_finite() {
        return 0;
    }
    let percent = (intake / f64::from(goal) * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// One bar of the intake chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealPoint {
    /// `YYYY-MM-DD`
    pub day: String,
    pub calories: f64,
}

/// The last `n` meals in insertion order, reduced to chart points.
pub fn recent_meal_series(meals: &[Meal], n: usize) -> Vec<MealPoint> {
    let start = meals.len().saturating_sub(n);
    meals[start..]
        .iter()
        .map(|m| MealPoint {
            day: day_label(m.time),
            calories: m.calories,
        })
        .collect()
}

/// The last `n` workouts, most recent first.
pub fn recent_workouts(workouts: &[Workout], n: usize) -> Vec<Workout> {
    workouts.iter().rev().take(n).cloned().collect()
}

/// Everything the dashboard renders, computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub intake_today: f64,
    pub calorie_goal: u32,
    pub calorie_percent: u8,
    /// Never empty: a single `Today`/0 point stands in when no meals exist
    pub meal_chart: Vec<MealPoint>,
    pub recent_workouts: Vec<Workout>,
    pub goal_label: String,
}

impl DashboardSummary {
    pub fn build(snapshot: &StoreSnapshot, now: DateTime<Utc>) -> Self {
        let intake_today = todays_completed_calories(&snapshot.meals, now);
        let goal = calorie_goal(&snapshot.profile);

        let mut meal_chart = recent_meal_series(&snapshot.meals, CHART_MEAL_COUNT);
        if meal_chart.is_empty() {
            meal_chart.push(MealPoint {
                day: "Today".to_string(),
                calories: 0.0,
            });
        }

        Self {
            intake_today,
            calorie_goal: goal,
            calorie_percent: calorie_percent(intake_today, goal),
            meal_chart,
            recent_workouts: recent_workouts(&snapshot.workouts, RECENT_WORKOUT_COUNT),
            goal_label: snapshot.profile.goal.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn make_meal(id: &str, calories: f64, completed: bool, time: DateTime<Utc>) -> Meal {
        Meal {
            id: id.to_string(),
            name: format!("Meal {}", id),
            calories,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
            time,
            completed,
        }
    }

    fn make_workout(id: &str) -> Workout {
        Workout {
            id: id.to_string(),
            name: format!("Workout {}", id),
            date: Utc::now(),
            exercises: vec![],
            completed: false,
        }
    }

    fn profile_with(goal: Goal) -> Profile {
        Profile {
            goal,
            ..Profile::default()
        }
    }

    #[test]
    fn test_todays_calories_counts_only_completed_today() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let meals = vec![
            make_meal("1", 500.0, true, now),
            make_meal("2", 300.0, false, now),
            make_meal("3", 700.0, true, now - Duration::days(1)),
        ];

        assert_eq!(todays_completed_calories(&meals, now), 500.0);
    }

    #[test]
    fn test_calorie_goal_table() {
        assert_eq!(calorie_goal(&profile_with(Goal::WeightLoss)), 2000);
        assert_eq!(calorie_goal(&profile_with(Goal::MuscleGain)), 2800);
        assert_eq!(calorie_goal(&profile_with(Goal::Maintenance)), 2400);
        assert_eq!(
            calorie_goal(&profile_with(Goal::Other("recomp".to_string()))),
            2400
        );
    }

    #[test]
    fn test_calorie_percent_clamped() {
        assert_eq!(calorie_percent(5000.0, 2000), 100);
        assert_eq!(calorie_percent(0.0, 2000), 0);
        assert_eq!(calorie_percent(1000.0, 2000), 50);
        assert_eq!(calorie_percent(-50.0, 2000), 0);
        // 2400 * 0.333.. rounds to 33
        assert_eq!(calorie_percent(800.0, 2400), 33);
    }

    #[test]
    fn test_recent_meal_series_keeps_insertion_order() {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let meals: Vec<Meal> = (0..10)
            .map(|i| make_meal(&i.to_string(), 100.0 * i as f64, true, base + Duration::days(i)))
            .collect();

        let series = recent_meal_series(&meals, 7);

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].day, "2024-03-04");
        assert_eq!(series[0].calories, 300.0);
        assert_eq!(series[6].day, "2024-03-10");
    }

    #[test]
    fn test_recent_meal_series_does_not_resort() {
        let late = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let meals = vec![make_meal("a", 1.0, true, late), make_meal("b", 2.0, true, early)];

        let series = recent_meal_series(&meals, 7);
        assert_eq!(series[0].day, "2024-03-05");
        assert_eq!(series[1].day, "2024-03-01");
    }

    #[test]
    fn test_recent_workouts_most_recent_first() {
        let workouts: Vec<Workout> = ["a", "b", "c", "d"].iter().map(|id| make_workout(id)).collect();

        let recent = recent_workouts(&workouts, 3);

        let ids: Vec<&str> = recent.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c", "b"]);
    }
}
