//! Error translation for the HTTP layer.

pub mod error;
