//! Durable storage layer.
//!
//! The store keeps three independently keyed slots. Each slot holds one
//! JSON document: the workout array, the meal array, or the profile object.

pub mod slots;
pub mod store;

pub use slots::{FileSlots, MemorySlots, SlotStorage};
pub use store::{FitnessStore, StoreSnapshot};

/// Slot keys as constants.
pub mod keys {
    pub const WORKOUTS: &str = "vertex_workouts";
    pub const MEALS: &str = "vertex_meals";
    pub const PROFILE: &str = "vertex_profile";
}
