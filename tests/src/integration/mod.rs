//! Cross-crate bring-up scenarios.

pub mod concurrency;
pub mod failures;
pub mod scenarios;
