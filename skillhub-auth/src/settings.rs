use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_webapp_url")]
    pub webapp_url: String,
}

fn default_api_url() -> String {
    "http://localhost:8086/api/v1".to_string()
}

fn default_auth_url() -> String {
    "http://localhost:8087".to_string()
}

fn default_webapp_url() -> String {
    "http://localhost:3000".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("SKILLHUB_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("SKILLHUB").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("api_url", &self.api_url),
            ("auth_url", &self.auth_url),
            ("webapp_url", &self.webapp_url),
        ] {
            if value.is_empty() {
                return Err(format!("{} is required", name));
            }
            if !value.starts_with("http") {
                return Err(format!("{} must be a valid HTTP(S) URL", name));
            }
        }
        Ok(())
    }
}
