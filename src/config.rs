use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::env;
use std::net::IpAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
    pub leaderboard_limit: usize,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => anyhow::bail!("Unknown environment: {other}"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Server configuration
        let host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .context("Failed to parse SERVER_HOST")?;

        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        // Application configuration
        let name = env::var("APP_NAME").unwrap_or_else(|_| "campus-events-backend".to_string());

        let environment = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse::<Environment>()
            .context("Failed to parse APP_ENVIRONMENT")?;

        let leaderboard_limit = match env::var("LEADERBOARD_DEFAULT_LIMIT") {
            Ok(val) => val.parse().context("Failed to parse LEADERBOARD_DEFAULT_LIMIT")?,
            Err(_) => 10,
        };

        Ok(Config {
            server: ServerConfig { host, port },
            app: AppConfig {
                name,
                environment,
                leaderboard_limit,
            },
        })
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load the process-wide configuration from the environment. Subsequent
/// calls return the already-loaded instance.
pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
}
