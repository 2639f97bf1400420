//! Utilities module
//!
//! Contains error handling, deserialization and logging helpers

pub mod de;
pub mod error;
pub mod logging;
