//! Study plan data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single study goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier, assigned at creation and never reused
    pub id: Uuid,
    /// What the goal is; always non-empty
    pub description: String,
    /// Optional target completion date; serialized as ISO-8601 or null
    pub target_date: Option<DateTime<Utc>>,
    /// Whether the goal has been marked done
    pub completed: bool,
}

impl Goal {
    /// Create a new incomplete goal
    pub fn new(description: String, target_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            target_date,
            completed: false,
        }
    }
}

/// A user's study plan: goals plus tracked subjects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// Owner identity; also embedded in the storage key
    pub user_id: String,
    /// Goals in insertion order
    pub goals: Vec<Goal>,
    /// Tracked subject names, duplicate-free, in first-added order
    pub subjects: Vec<String>,
    /// When the plan last changed; never moves backwards
    pub last_updated: DateTime<Utc>,
}

impl StudyPlan {
    /// Create an empty plan for a user
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            goals: Vec::new(),
            subjects: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    /// Number of goals marked done
    pub fn completed_goals(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }

    /// Number of goals still open
    pub fn incomplete_goals(&self) -> usize {
        self.goals.len() - self.completed_goals()
    }

    /// Completed fraction, 0.0 - 1.0; an empty plan counts as 0.0
    pub fn completion_ratio(&self) -> f64 {
        if self.goals.is_empty() {
            return 0.0;
        }
        (self.completed_goals() as f64 / self.goals.len() as f64).clamp(0.0, 1.0)
    }

    /// Snapshot of the derived progress numbers
    pub fn progress(&self) -> PlanProgress {
        PlanProgress {
            total_goals: self.goals.len(),
            completed_goals: self.completed_goals(),
            incomplete_goals: self.incomplete_goals(),
            subjects: self.subjects.len(),
            completion_ratio: self.completion_ratio(),
        }
    }
}

/// Derived progress summary, recomputed on demand and never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub incomplete_goals: usize,
    pub subjects: usize,
    pub completion_ratio: f64,
}
