use serde::{Deserialize, Serialize};

/// Static configuration loaded at startup.
///
/// Priority: ENV > config.toml > defaults.
/// ENV prefix: GU, separator: __
/// Example: GU__SERVER__PORT=9999
///
/// `RESERVED_WORDS` (comma-separated) is additionally honored as a flat
/// override of `[reserved].words` for parity with container deployments.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub reserved: ReservedConfig,
    #[serde(default)]
    pub routes: RouteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("GU")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut loaded = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        };

        loaded.override_with_env();
        loaded
    }

    /// Flat env overrides kept for compatibility with the deployment scripts
    fn override_with_env(&mut self) {
        if let Ok(words) = std::env::var("RESERVED_WORDS") {
            self.reserved.words = words
                .split(',')
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect();
        }
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            self.database.database_url = database_url;
        }
        if let Ok(backend) = std::env::var("DATABASE_BACKEND") {
            self.database.backend = backend;
        }
    }

    /// Generate a sample TOML configuration file
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_backend")]
    pub backend: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_database_backend(),
            database_url: default_database_url(),
        }
    }
}

/// Identity resolution settings. This is convention, not authentication:
/// the resolved name is a plain string trusted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IdentityConfig {
    /// Static identity override, consulted after header and env sources
    #[serde(default)]
    pub default_user: Option<String>,
}

/// Short names that may never be claimed. The service refuses to start
/// when this list resolves to empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReservedConfig {
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_health_prefix")]
    pub health_prefix: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            api_prefix: default_api_prefix(),
            health_prefix: default_health_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            enable_rotation: default_enable_rotation(),
            max_backups: default_max_backups(),
        }
    }
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_backend() -> String {
    "sqlite".to_string()
}

fn default_database_url() -> String {
    "sqlite://gourls.db?mode=rwc".to_string()
}

fn default_api_prefix() -> String {
    "/api/urls".to_string()
}

fn default_health_prefix() -> String {
    "/health".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_enable_rotation() -> bool {
    false
}

fn default_max_backups() -> u32 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.routes.api_prefix, "/api/urls");
        assert!(config.reserved.words.is_empty());
        assert!(config.identity.default_user.is_none());
    }

    #[test]
    fn sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();
        let parsed: StaticConfig = toml::from_str(&sample).expect("sample config must parse");
        assert_eq!(parsed.server.host, "127.0.0.1");
    }
}
