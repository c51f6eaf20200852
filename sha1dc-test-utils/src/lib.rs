//! Test utilities for the sha1dc workspace
//!
//! This crate provides deterministic test-data builders, chunk-plan
//! helpers for streaming tests, and loading of external collision
//! fixtures.

pub mod builders;
pub mod fixtures;

// Re-export commonly used types
pub use builders::{ChunkPlan, TestDataBuilder};
pub use fixtures::collision_fixture;
