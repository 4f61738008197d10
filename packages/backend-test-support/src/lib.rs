//! Backend test support utilities
//!
//! Logging initialization shared by unit and integration tests, unique test
//! data, and assertions over the JSON error contract.

pub mod error_body;
pub mod logging;
pub mod unique_helpers;
