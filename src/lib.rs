//! Personal study planner and AI study-aid companion.
//!
//! The heart of the crate is [`planner::PlanStore`], which owns a user's
//! study plan (goals and tracked subjects) and writes every change through
//! to a pluggable [`storage::KeyValueStore`] backend. [`study_tools`] talks
//! to the external flashcard/quiz/study-buddy endpoints.

pub mod config;
pub mod planner;
pub mod storage;
pub mod study_tools;
