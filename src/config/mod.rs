//! Configuration module for ledgerlens
//!
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LensPaths;
pub use settings::{DefaultRange, Settings};
