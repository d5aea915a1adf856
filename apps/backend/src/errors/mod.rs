//! Error handling for the Howler backend.

pub mod error_code;

pub use error_code::ErrorCode;
