//! ---
//! pw_section: "03-configuration-logging"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Shared runtime utilities for the PlantWatch workspace."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
//! Shared runtime plumbing for the PlantWatch workspace: configuration
//! loading, tracing setup, and the fixed-offset display clock shown in the
//! dashboard header.

pub mod config;
pub mod logging;
pub mod time;

pub use config::{ApiConfig, AppConfig, LoadedAppConfig, RefreshConfig, UiConfig};
pub use logging::init_tracing;
pub use time::DisplayClock;
