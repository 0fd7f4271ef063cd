//! Application configuration.

mod config;
mod paths;

pub use config::AppConfig;
pub use paths::resolve_config_path;
