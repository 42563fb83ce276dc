use once_cell::sync::OnceCell;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: Option<UpstreamConfig>,
    #[serde(default)]
    pub derivation: DerivationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Remote metrics API. When this section is absent the service falls
/// back to the built-in demo metric generator.
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Constants feeding the order-status bucketing. The upstream has no
/// real in-transit / cancelled tracking yet, so these stand in for it;
/// a backend that does track them can override here.
#[derive(Debug, Deserialize, Clone)]
pub struct DerivationConfig {
    #[serde(default = "default_in_transit")]
    pub in_transit_orders: f64,
    #[serde(default = "default_cancelled")]
    pub cancelled_orders: f64,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            in_transit_orders: default_in_transit(),
            cancelled_orders: default_cancelled(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_in_transit() -> f64 {
    10.0
}

fn default_cancelled() -> f64 {
    5.0
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
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

/// Load the config once and make it process-visible.
pub fn initialize() -> anyhow::Result<&'static Config> {
    let config = load_config()?;
    Ok(CONFIG.get_or_init(|| config))
}

/// Access the loaded configuration. Falls back to the embedded default
/// when `initialize` has not run (unit tests).
pub fn get() -> &'static Config {
    CONFIG.get_or_init(|| {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    })
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
        assert!(config.upstream.is_none());
        assert_eq!(config.derivation.in_transit_orders, 10.0);
        assert_eq!(config.derivation.cancelled_orders, 5.0);
    }

    #[test]
    fn test_upstream_section_parses() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [upstream]
            base_url = "http://localhost:5000"

            [derivation]
            in_transit_orders = 7
            cancelled_orders = 3
            "#,
        )
        .unwrap();
        let upstream = config.upstream.unwrap();
        assert_eq!(upstream.base_url, "http://localhost:5000");
        assert_eq!(upstream.timeout_secs, 5);
        assert_eq!(config.derivation.in_transit_orders, 7.0);
        assert_eq!(config.derivation.cancelled_orders, 3.0);
    }
}
