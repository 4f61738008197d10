//! Error handling for the Bug Shield backend.

pub mod error_code;

pub use error_code::ErrorCode;
