//! Configuration module for callscribe
//!
//! Handles loading application settings from a TOML file and the environment.

mod settings;

pub use settings::Settings;
