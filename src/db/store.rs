// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistent store for the profile, workouts, and meals.
//!
//! Collections are held as immutable `Arc` snapshots. Every mutator builds
//! a new snapshot, swaps it in, and writes it through to its slot before
//! returning. Readers holding an older snapshot are unaffected.
//!
//! Write failures are logged and otherwise ignored: the in-memory state is
//! authoritative for the rest of the session.

use crate::db::keys;
use crate::db::SlotStorage;
use crate::models::{Meal, Profile, Workout};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Records that carry a collection-unique id.
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for Workout {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Meal {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Point-in-time view of all store data.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub profile: Arc<Profile>,
    pub workouts: Arc<Vec<Workout>>,
    pub meals: Arc<Vec<Meal>>,
}

/// The application's single data store.
pub struct FitnessStore {
    slots: Arc<dyn SlotStorage>,
    profile: Arc<Profile>,
    workouts: Arc<Vec<Workout>>,
    meals: Arc<Vec<Meal>>,
}

impl FitnessStore {
    /// Load every collection from its slot, substituting defaults for
    /// absent or corrupt slots.
    pub fn open(slots: Arc<dyn SlotStorage>) -> Self {
        let profile = load_profile(slots.as_ref());
        let workouts: Vec<Workout> = load_collection(slots.as_ref(), keys::WORKOUTS);
        let meals: Vec<Meal> = load_collection(slots.as_ref(), keys::MEALS);

        tracing::info!(
            workouts = workouts.len(),
            meals = meals.len(),
            "Store loaded"
        );

        Self {
            slots,
            profile: Arc::new(profile),
            workouts: Arc::new(workouts),
            meals: Arc::new(meals),
        }
    }

    // ─── Snapshots ───────────────────────────────────────────────

    pub fn profile(&self) -> Arc<Profile> {
        Arc::clone(&self.profile)
    }

    pub fn workouts(&self) -> Arc<Vec<Workout>> {
        Arc::clone(&self.workouts)
    }

    pub fn meals(&self) -> Arc<Vec<Meal>> {
        Arc::clone(&self.meals)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            profile: self.profile(),
            workouts: self.workouts(),
            meals: self.meals(),
        }
    }

    // ─── Profile ─────────────────────────────────────────────────

    /// Overwrite the profile.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Arc::new(profile);
        self.persist(keys::PROFILE, &*self.profile);
    }

    // ─── Workouts ────────────────────────────────────────────────

    /// Append a finished workout.
    ///
    /// Returns false (and leaves the collection untouched) if a workout with
    /// the same id is already stored.
    pub fn add_workout(&mut self, workout: Workout) -> bool {
        match appended(&self.workouts, workout) {
            Some(next) => {
                self.workouts = Arc::new(next);
                self.persist(keys::WORKOUTS, &*self.workouts);
                true
            }
            None => false,
        }
    }

    /// Delete a workout. Unknown ids are a no-op.
    pub fn remove_workout(&mut self, id: &str) -> bool {
        match removed(&self.workouts, id) {
            Some(next) => {
                self.workouts = Arc::new(next);
                self.persist(keys::WORKOUTS, &*self.workouts);
                true
            }
            None => false,
        }
    }

    /// Flip a workout's completed flag. Unknown ids are a no-op.
    pub fn toggle_workout_completion(&mut self, id: &str) -> bool {
        match toggled(&self.workouts, id, |w| w.completed = !w.completed) {
            Some(next) => {
                self.workouts = Arc::new(next);
                self.persist(keys::WORKOUTS, &*self.workouts);
                true
            }
            None => false,
        }
    }

    // ─── Meals ───────────────────────────────────────────────────

    /// Append a meal. Duplicate ids are rejected like `add_workout`.
    pub fn add_meal(&mut self, meal: Meal) -> bool {
        match appended(&self.meals, meal) {
            Some(next) => {
                self.meals = Arc::new(next);
                self.persist(keys::MEALS, &*self.meals);
                true
            }
            None => false,
        }
    }

    /// Delete a meal. Unknown ids are a no-op.
    pub fn remove_meal(&mut self, id: &str) -> bool {
        match removed(&self.meals, id) {
            Some(next) => {
                self.meals = Arc::new(next);
                self.persist(keys::MEALS, &*self.meals);
                true
            }
            None => false,
        }
    }

    /// Flip a meal's eaten flag. Unknown ids are a no-op.
    pub fn toggle_meal_completion(&mut self, id: &str) -> bool {
        match toggled(&self.meals, id, |m| m.completed = !m.completed) {
            Some(next) => {
                self.meals = Arc::new(next);
                self.persist(keys::MEALS, &*self.meals);
                true
            }
            None => false,
        }
    }

    /// Best-effort write-through of one slot.
    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(crate::error::AppError::from)
            .and_then(|json| self.slots.write(key, &json));

        if let Err(e) = result {
            tracing::error!(slot = key, error = %e, "Failed to persist slot");
        }
    }
}

/// New collection with `record` appended, or None if its id is taken.
fn appended<T: HasId + Clone>(current: &[T], record: T) -> Option<Vec<T>> {
    if current.iter().any(|r| r.id() == record.id()) {
        tracing::warn!(id = record.id(), "Ignoring record with duplicate id");
        return None;
    }
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.push(record);
    Some(next)
}

/// New collection without `id`, or None if it was not present.
fn removed<T: HasId + Clone>(current: &[T], id: &str) -> Option<Vec<T>> {
    if !current.iter().any(|r| r.id() == id) {
        tracing::debug!(id, "Remove of unknown id ignored");
        return None;
    }
    Some(current.iter().filter(|r| r.id() != id).cloned().collect())
}

/// New collection with `update` applied to `id`, or None if it was not present.
fn toggled<T: HasId + Clone>(current: &[T], id: &str, update: impl Fn(&mut T)) -> Option<Vec<T>> {
    let index = match current.iter().position(|r| r.id() == id) {
        Some(index) => index,
        None => {
            tracing::debug!(id, "Toggle of unknown id ignored");
            return None;
        }
    };
    let mut next = current.to_vec();
    update(&mut next[index]);
    Some(next)
}

/// Load the profile slot, falling back to the default profile.
fn load_profile(slots: &dyn SlotStorage) -> Profile {
    match read_slot(slots, keys::PROFILE) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(slot = keys::PROFILE, error = %e, "Corrupt profile slot, using default");
            Profile::default()
        }),
        None => Profile::default(),
    }
}

/// Load a collection slot.
///
/// A slot that is absent or not a JSON array yields an empty collection.
/// Individual records that fail to parse, or repeat an earlier id, are
/// skipped so one bad entry does not discard the rest.
fn load_collection<T: DeserializeOwned + HasId>(slots: &dyn SlotStorage, key: &str) -> Vec<T> {
    let raw = match read_slot(slots, key) {
        Some(raw) => raw,
        None => return Vec::new(),
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "Corrupt collection slot, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0usize;

    for value in values {
        match serde_json::from_value::<T>(value) {
            Ok(record) if seen.insert(record.id().to_string()) => records.push(record),
            Ok(_) | Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(slot = key, skipped, "Skipped malformed or duplicate records");
    }

    records
}

fn read_slot(slots: &dyn SlotStorage, key: &str) -> Option<String> {
    match slots.read(key) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "Failed to read slot");
            None
        }
    }
}
