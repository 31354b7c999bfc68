use dayplan_core::query::{DEFAULT_PAGE_SIZE, DEFAULT_UPCOMING_DAYS};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "dayplan.toml";

/// Settings resolved from defaults, `dayplan.toml` (or the file named by
/// `DAYPLAN_CONFIG`) and `DAYPLAN_*` environment variables, in that order.
/// Nested keys use a double underscore, e.g. `DAYPLAN_SERVER__PORT=9000`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: String,
    pub page_size: i64,
    pub upcoming_days: u32,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow any origin, method and header. Handy for a local frontend.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_permissive: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "dayplan.db".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        let file = std::env::var("DAYPLAN_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
        Self::figment(&file).extract()
    }

    fn figment(file: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("DAYPLAN_").ignore(&["config"]).split("__"))
    }
}
