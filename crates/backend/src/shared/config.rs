use contracts::shared::paging::{PageRequest, DEFAULT_PAGE_LIMIT};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: 500,
        }
    }
}

impl PagingConfig {
    /// Builds a page request from optional query values, capped at `max_limit`.
    pub fn resolve(&self, page: Option<usize>, limit: Option<usize>) -> PageRequest {
        PageRequest::new(page.unwrap_or(1), limit.unwrap_or(self.default_limit))
            .capped(self.max_limit)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    pub demo_data: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { demo_data: true }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[paging]
default_limit = 10
max_limit = 500

[seed]
demo_data = true
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.paging, PagingConfig::default());
        assert!(config.seed.demo_data);
    }

    #[test]
    fn test_optional_sections_default() {
        let config: Config = toml::from_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.paging.default_limit, DEFAULT_PAGE_LIMIT);
        assert!(config.seed.demo_data);
    }

    #[test]
    fn test_resolve_applies_defaults_and_cap() {
        let paging = PagingConfig {
            default_limit: 25,
            max_limit: 100,
        };
        assert_eq!(paging.resolve(None, None), PageRequest::new(1, 25));
        assert_eq!(paging.resolve(Some(3), Some(1000)), PageRequest::new(3, 100));
        assert_eq!(paging.resolve(Some(0), Some(0)), PageRequest::new(1, 1));
    }
}
