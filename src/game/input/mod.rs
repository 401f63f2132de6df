//! Input Module
//!
//! Editor commands produced by the host's input handling.

pub mod actions;

pub use actions::EditorCommand;
