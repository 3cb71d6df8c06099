//! Configuration loading and management for the Attendance Engine.
//!
//! This module provides functionality to load deployment metadata, facilities
//! and effective-dated leave policies from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineMetadata, FacilitiesConfig, Facility, PolicyConfig};
