use std::sync::OnceLock;

use super::StaticConfig;

static CONFIG: OnceLock<StaticConfig> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static StaticConfig {
    CONFIG.get_or_init(StaticConfig::load)
}

/// Initialize the global configuration
pub fn init_config() {
    CONFIG.get_or_init(StaticConfig::load);
}
