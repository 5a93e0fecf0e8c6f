//! CLI interface for dict-translate
//!
//! Provides command-line utilities for inspecting dictionary files and
//! translating tokens.

pub mod args;
pub mod commands;
pub mod paths;

pub use args::{Cli, Commands};
pub use paths::{config_dir, default_data_dir, PersistentConfig};
