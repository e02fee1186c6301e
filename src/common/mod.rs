//! Common utilities and types shared across the application.

pub mod callback;
pub mod error;
pub mod types;
