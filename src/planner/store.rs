//! Study plan store
//!
//! Owns a user's in-memory plan and keeps a serialized mirror in the
//! configured key-value backend under `studyPlan_<userId>`. Every mutation
//! is applied and written back under one lock, so concurrent callers see
//! atomic read-modify-write steps. Persistence problems never poison the
//! store: the in-memory plan stays authoritative and the error is returned.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::dates;
use super::models::{Goal, PlanProgress, StudyPlan};
use crate::storage::KeyValueStore;

/// Storage key prefix; the full key is the prefix plus the user id
const PLAN_KEY_PREFIX: &str = "studyPlan_";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to load study plan: {0}")]
    Load(String),

    #[error("Failed to save study plan: {0}")]
    Save(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The study plan store: one plan per user identity, write-through persisted.
pub struct PlanStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
    plan: Mutex<StudyPlan>,
    load_error: Option<StoreError>,
}

impl PlanStore {
    /// Open the plan for `user_id`, seeding an empty plan when none is stored.
    ///
    /// Never fails. Read, parse, and seed-write problems degrade to a fresh
    /// in-memory plan and are reported through [`PlanStore::load_error`].
    pub fn open(backend: Box<dyn KeyValueStore>, user_id: &str) -> Self {
        let key = format!("{}{}", PLAN_KEY_PREFIX, user_id);

        let mut load_error = None;
        let plan = match Self::read_stored(backend.as_ref(), &key) {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                // First run for this user: persist an empty plan right away.
                let plan = StudyPlan::new(user_id.to_string());
                if let Err(e) = Self::write_plan(backend.as_ref(), &key, &plan) {
                    log::warn!("Failed to persist initial study plan: {}", e);
                    load_error = Some(e);
                }
                plan
            }
            Err(e) => {
                log::warn!("Failed to load study plan, starting fresh: {}", e);
                let plan = StudyPlan::new(user_id.to_string());
                if let Err(seed_err) = Self::write_plan(backend.as_ref(), &key, &plan) {
                    log::warn!("Failed to persist replacement study plan: {}", seed_err);
                }
                load_error = Some(e);
                plan
            }
        };

        Self {
            backend,
            key,
            plan: Mutex::new(plan),
            load_error,
        }
    }

    /// The problem encountered while opening the store, if any.
    ///
    /// Informational: the store is fully usable either way.
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    /// Snapshot of the current plan
    pub fn plan(&self) -> StudyPlan {
        self.lock_plan().clone()
    }

    /// Derived progress numbers for the current plan
    pub fn progress(&self) -> PlanProgress {
        self.lock_plan().progress()
    }

    // ===== Mutations =====

    /// Add a goal. Descriptions that trim empty are ignored.
    ///
    /// The target date accepts RFC 3339 or plain `YYYY-MM-DD` (midnight UTC);
    /// anything else stores no date rather than rejecting the goal.
    pub fn add_goal(&self, description: &str, target_date: Option<&str>) -> Result<StudyPlan> {
        let description = description.trim();
        if description.is_empty() {
            return Ok(self.plan());
        }

        let description = description.to_string();
        let target = target_date.and_then(dates::parse_target_date);
        self.mutate(move |plan| {
            plan.goals.push(Goal::new(description, target));
            true
        })
    }

    /// Flip a goal's completed flag. Unknown ids are ignored.
    pub fn toggle_goal(&self, id: Uuid) -> Result<StudyPlan> {
        self.mutate(move |plan| match plan.goals.iter_mut().find(|g| g.id == id) {
            Some(goal) => {
                goal.completed = !goal.completed;
                true
            }
            None => false,
        })
    }

    /// Remove a goal. Unknown ids are ignored.
    pub fn delete_goal(&self, id: Uuid) -> Result<StudyPlan> {
        self.mutate(move |plan| {
            let len_before = plan.goals.len();
            plan.goals.retain(|g| g.id != id);
            plan.goals.len() != len_before
        })
    }

    /// Track a subject. Names that trim empty and exact duplicates are ignored.
    pub fn add_subject(&self, name: &str) -> Result<StudyPlan> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(self.plan());
        }

        let name = name.to_string();
        self.mutate(move |plan| {
            if plan.subjects.contains(&name) {
                return false;
            }
            plan.subjects.push(name);
            true
        })
    }

    /// Stop tracking a subject (exact match). Unknown names are ignored.
    pub fn delete_subject(&self, name: &str) -> Result<StudyPlan> {
        let name = name.to_string();
        self.mutate(move |plan| {
            let len_before = plan.subjects.len();
            plan.subjects.retain(|s| *s != name);
            plan.subjects.len() != len_before
        })
    }

    // ===== Internals =====

    fn lock_plan(&self) -> MutexGuard<'_, StudyPlan> {
        // A poisoned lock still holds a structurally valid plan.
        self.plan.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply `change` under the lock and persist when it reports a change.
    ///
    /// No-ops leave `lastUpdated` and the stored copy untouched. When the
    /// write fails the in-memory change is kept and the error returned; the
    /// next successful mutation re-persists the full plan.
    fn mutate<F>(&self, change: F) -> Result<StudyPlan>
    where
        F: FnOnce(&mut StudyPlan) -> bool,
    {
        let mut plan = self.lock_plan();

        if !change(&mut plan) {
            return Ok(plan.clone());
        }

        // Clamped so a wall-clock step backwards cannot rewind the stamp.
        plan.last_updated = Utc::now().max(plan.last_updated);

        let snapshot = plan.clone();
        Self::write_plan(self.backend.as_ref(), &self.key, &snapshot)?;
        Ok(snapshot)
    }

    fn read_stored(backend: &dyn KeyValueStore, key: &str) -> Result<Option<StudyPlan>> {
        let raw = backend
            .get(key)
            .map_err(|e| StoreError::Load(e.to_string()))?;

        match raw {
            Some(raw) => {
                let plan =
                    serde_json::from_str(&raw).map_err(|e| StoreError::Load(e.to_string()))?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    fn write_plan(backend: &dyn KeyValueStore, key: &str, plan: &StudyPlan) -> Result<()> {
        let json =
            serde_json::to_string_pretty(plan).map_err(|e| StoreError::Save(e.to_string()))?;
        backend
            .set(key, &json)
            .map_err(|e| StoreError::Save(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{self, FileKvStore, StorageError};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_store() -> (PlanStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileKvStore::new(temp_dir.path().to_path_buf()).unwrap();
        let store = PlanStore::open(Box::new(backend), "localUser123");
        (store, temp_dir)
    }

    fn read_persisted(temp: &TempDir) -> serde_json::Value {
        let path = temp.path().join("studyPlan_localUser123.json");
        let raw = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    /// Backend whose writes can be switched to fail mid-test
    struct FlakyStore {
        fail_writes: Arc<AtomicBool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, _key: &str) -> storage::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> storage::Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                Err(StorageError::Io(std::io::Error::other("disk full")))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_open_seeds_and_persists_default_plan() {
        let (store, temp) = create_test_store();

        let plan = store.plan();
        assert_eq!(plan.user_id, "localUser123");
        assert!(plan.goals.is_empty());
        assert!(plan.subjects.is_empty());
        assert!(store.load_error().is_none());

        let persisted = read_persisted(&temp);
        assert_eq!(persisted["userId"], "localUser123");
        assert_eq!(persisted["goals"].as_array().unwrap().len(), 0);
        assert_eq!(persisted["subjects"].as_array().unwrap().len(), 0);
        assert!(persisted["lastUpdated"].is_string());
    }

    #[test]
    fn test_open_adopts_stored_plan() {
        let temp = TempDir::new().unwrap();
        {
            let backend = FileKvStore::new(temp.path().to_path_buf()).unwrap();
            let store = PlanStore::open(Box::new(backend), "localUser123");
            store.add_goal("Master React Hooks", Some("2025-06-01")).unwrap();
            store.add_subject("Biology").unwrap();
        }

        let backend = FileKvStore::new(temp.path().to_path_buf()).unwrap();
        let reopened = PlanStore::open(Box::new(backend), "localUser123");
        let plan = reopened.plan();

        assert!(reopened.load_error().is_none());
        assert_eq!(plan.goals.len(), 1);
        assert_eq!(plan.goals[0].description, "Master React Hooks");
        assert_eq!(plan.subjects, vec!["Biology"]);
    }

    #[test]
    fn test_open_recovers_from_corrupt_stored_plan() {
        let temp = TempDir::new().unwrap();
        let backend = FileKvStore::new(temp.path().to_path_buf()).unwrap();
        backend.set("studyPlan_localUser123", "{not json").unwrap();

        let store = PlanStore::open(Box::new(backend), "localUser123");

        assert!(matches!(store.load_error(), Some(StoreError::Load(_))));
        let plan = store.plan();
        assert_eq!(plan.user_id, "localUser123");
        assert!(plan.goals.is_empty());

        // The unreadable value was replaced with the fresh plan.
        let persisted = read_persisted(&temp);
        assert_eq!(persisted["userId"], "localUser123");
    }

    #[test]
    fn test_open_reports_seed_write_failure() {
        let store = PlanStore::open(
            Box::new(FlakyStore {
                fail_writes: Arc::new(AtomicBool::new(true)),
            }),
            "localUser123",
        );

        assert!(matches!(store.load_error(), Some(StoreError::Save(_))));
        assert_eq!(store.plan().user_id, "localUser123");
    }

    #[test]
    fn test_add_goal_stores_midnight_utc_target() {
        let (store, temp) = create_test_store();

        let plan = store.add_goal("Master React Hooks", Some("2025-06-01")).unwrap();
        assert_eq!(plan.goals.len(), 1);
        assert!(!plan.goals[0].completed);
        assert_eq!(
            plan.goals[0].target_date.unwrap().to_rfc3339(),
            "2025-06-01T00:00:00+00:00"
        );

        let persisted = read_persisted(&temp);
        let target = persisted["goals"][0]["targetDate"].as_str().unwrap();
        assert!(target.starts_with("2025-06-01T00:00:00"));
    }

    #[test]
    fn test_add_goal_without_date_stores_null() {
        let (store, temp) = create_test_store();
        store.add_goal("Read ahead", None).unwrap();

        let persisted = read_persisted(&temp);
        assert!(persisted["goals"][0]["targetDate"].is_null());
    }

    #[test]
    fn test_add_goal_unparseable_date_stores_none() {
        let (store, _temp) = create_test_store();
        let plan = store.add_goal("Revise notes", Some("sometime soon")).unwrap();
        assert_eq!(plan.goals.len(), 1);
        assert!(plan.goals[0].target_date.is_none());
    }

    #[test]
    fn test_add_goal_empty_description_is_noop() {
        let (store, _temp) = create_test_store();
        let before = store.plan().last_updated;

        let plan = store.add_goal("   ", None).unwrap();
        assert!(plan.goals.is_empty());
        assert_eq!(store.plan().last_updated, before);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let (store, _temp) = create_test_store();
        let plan = store.add_goal("Finish problem set", None).unwrap();
        let id = plan.goals[0].id;

        let toggled = store.toggle_goal(id).unwrap();
        assert!(toggled.goals[0].completed);

        let restored = store.toggle_goal(id).unwrap();
        assert!(!restored.goals[0].completed);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let (store, _temp) = create_test_store();
        store.add_goal("Finish problem set", None).unwrap();
        let before = store.plan().last_updated;

        let plan = store.toggle_goal(Uuid::new_v4()).unwrap();
        assert!(!plan.goals[0].completed);
        assert_eq!(plan.last_updated, before);
    }

    #[test]
    fn test_delete_goal_removes_only_match() {
        let (store, _temp) = create_test_store();
        let plan = store.add_goal("first", None).unwrap();
        let first_id = plan.goals[0].id;
        store.add_goal("second", None).unwrap();

        let plan = store.delete_goal(first_id).unwrap();
        assert_eq!(plan.goals.len(), 1);
        assert_eq!(plan.goals[0].description, "second");

        // Deleting again is a quiet no-op.
        let plan = store.delete_goal(first_id).unwrap();
        assert_eq!(plan.goals.len(), 1);
    }

    #[test]
    fn test_add_subject_trims_and_dedupes() {
        let (store, _temp) = create_test_store();

        store.add_subject("Biology").unwrap();
        let after_first = store.plan().last_updated;

        // A duplicate is a full no-op: membership and timestamp unchanged.
        let plan = store.add_subject("  Biology  ").unwrap();
        assert_eq!(plan.last_updated, after_first);

        let plan = store.add_subject("Chemistry").unwrap();
        assert_eq!(plan.subjects, vec!["Biology", "Chemistry"]);
    }

    #[test]
    fn test_add_subject_is_case_sensitive() {
        let (store, _temp) = create_test_store();
        store.add_subject("biology").unwrap();
        let plan = store.add_subject("Biology").unwrap();
        assert_eq!(plan.subjects, vec!["biology", "Biology"]);
    }

    #[test]
    fn test_add_subject_empty_is_noop() {
        let (store, _temp) = create_test_store();
        let plan = store.add_subject("   ").unwrap();
        assert!(plan.subjects.is_empty());
    }

    #[test]
    fn test_delete_subject_exact_match_only() {
        let (store, _temp) = create_test_store();
        store.add_subject("Biology").unwrap();

        let plan = store.delete_subject("biology").unwrap();
        assert_eq!(plan.subjects, vec!["Biology"]);

        let plan = store.delete_subject("Biology").unwrap();
        assert!(plan.subjects.is_empty());
    }

    #[test]
    fn test_progress_tracks_store_mutations() {
        let (store, _temp) = create_test_store();
        let plan = store.add_goal("first", None).unwrap();
        store.add_goal("second", None).unwrap();
        store.add_subject("Biology").unwrap();
        store.toggle_goal(plan.goals[0].id).unwrap();

        let progress = store.progress();
        assert_eq!(progress.total_goals, 2);
        assert_eq!(progress.completed_goals, 1);
        assert_eq!(progress.incomplete_goals, 1);
        assert_eq!(progress.subjects, 1);
        assert_eq!(progress.completion_ratio, 0.5);
    }

    #[test]
    fn test_last_updated_never_decreases() {
        let (store, _temp) = create_test_store();

        let mut previous = store.plan().last_updated;
        for i in 0..5 {
            let plan = store.add_goal(&format!("goal {}", i), None).unwrap();
            assert!(plan.last_updated >= previous);
            previous = plan.last_updated;
        }
    }

    #[test]
    fn test_save_failure_keeps_in_memory_state() {
        let fail_writes = Arc::new(AtomicBool::new(false));
        let store = PlanStore::open(
            Box::new(FlakyStore {
                fail_writes: fail_writes.clone(),
            }),
            "localUser123",
        );
        assert!(store.load_error().is_none());

        fail_writes.store(true, Ordering::SeqCst);
        let result = store.add_goal("Master React Hooks", None);
        assert!(matches!(result, Err(StoreError::Save(_))));

        // The mutation survived in memory.
        let plan = store.plan();
        assert_eq!(plan.goals.len(), 1);
        assert_eq!(plan.goals[0].description, "Master React Hooks");

        // Once the backend recovers, mutations persist again.
        fail_writes.store(false, Ordering::SeqCst);
        let plan = store.add_subject("Biology").unwrap();
        assert_eq!(plan.subjects, vec!["Biology"]);
    }
}
