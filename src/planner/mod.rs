//! Study planner module

pub mod dates;
pub mod models;
pub mod store;

pub use models::*;
pub use store::{PlanStore, StoreError};
