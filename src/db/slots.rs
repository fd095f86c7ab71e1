// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Slot storage backends.
//!
//! - `FileSlots`: one `<key>.json` file per slot, replaced atomically
//! - `MemorySlots`: in-process slots for tests, with injectable write failures

use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A keyed slot store holding serialized documents.
pub trait SlotStorage: Send + Sync {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace a slot's contents.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed slots inside a data directory.
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    /// Use `dir` for slot files, creating it if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::Storage(format!("Failed to create data dir {:?}: {}", dir, e))
        })?;
        tracing::debug!(path = %dir.display(), "Opened slot directory");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SlotStorage for FileSlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read slot {:?}: {}",
                path, e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value)
            .map_err(|e| AppError::Storage(format!("Failed to write {:?}: {}", temp_path, e)))?;

        // Rename so readers never see a half-written slot
        fs::rename(&temp_path, &path).map_err(|e| {
            AppError::Storage(format!(
                "Failed to rename {:?} to {:?}: {}",
                temp_path, path, e
            ))
        })
    }
}

/// In-memory slots. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    slots: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot with raw content.
    pub fn with_slot(self, key: &str, value: &str) -> Self {
        self.lock().insert(key.to_string(), value.to_string());
        self
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw slot content, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStorage for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!(
                "Simulated write failure for slot {}",
                key
            )));
        }
        self.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_slot_absent_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let slots = FileSlots::open(temp_dir.path()).unwrap();

        assert!(slots.read("vertex_meals").unwrap().is_none());
    }

    #[test]
    fn test_file_slot_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let slots = FileSlots::open(temp_dir.path().join("nested")).unwrap();

        slots.write("vertex_meals", "[]").unwrap();
        slots.write("vertex_meals", r#"[{"id":"1"}]"#).unwrap();

        assert_eq!(
            slots.read("vertex_meals").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
        assert!(!temp_dir.path().join("nested/vertex_meals.json.tmp").exists());
    }

    #[test]
    fn test_memory_slots_simulated_failure() {
        let slots = MemorySlots::new();
        slots.set_fail_writes(true);
        assert!(slots.write("vertex_profile", "{}").is_err());
        assert_eq!(slots.write_count(), 0);

        slots.set_fail_writes(false);
        slots.write("vertex_profile", "{}").unwrap();
        assert_eq!(slots.write_count(), 1);
    }
}
