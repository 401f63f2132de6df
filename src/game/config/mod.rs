//! Config Module
//!
//! Centralized configuration for the editing session.

pub mod editor_config;

pub use editor_config::{ConfigError, EditorConfig};
