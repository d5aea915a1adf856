//! Test support utilities for the Howler backend
//!
//! Unified logging initialization and Problem Details assertions shared by
//! unit and integration tests.

pub mod logging;
pub mod problem_details;
