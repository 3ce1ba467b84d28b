use std::{net::SocketAddr, path::PathBuf};

use thiserror::Error;
use time::Duration;

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://tunga-notes-frontend.vercel.app",
    "http://localhost:5173",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    /// `APP_ENV` unset: no error details and no SPA serving.
    Unspecified,
}

impl Environment {
    /// Whether internal error details may be sent to clients.
    pub fn exposes_error_details(self) -> bool {
        self == Environment::Development
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref().map(str::trim) {
            None | Some("") => Environment::Unspecified,
            Some("development") | Some("dev") => Environment::Development,
            Some("production") | Some("prod") => Environment::Production,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "APP_ENV",
                    value: other.to_string(),
                });
            }
        };

        let database_url = required(&lookup, "DATABASE_URL")?;
        let jwt_secret = required(&lookup, "JWT_SECRET")?;

        let database_max_connections = parsed(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;
        let ttl_minutes = parsed(&lookup, "TOKEN_TTL_MINUTES", 30i64)?;
        if ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_MINUTES",
                value: ttl_minutes.to_string(),
            });
        }

        let host = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parsed(&lookup, "PORT", 5000u16)?;
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    name: "BIND_ADDR",
                    value: host,
                })?;

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("client/dist"));

        Ok(Self {
            environment,
            database_url,
            database_max_connections,
            jwt_secret,
            token_ttl: Duration::minutes(ttl_minutes),
            bind_addr,
            cors_origins,
            static_dir,
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
        None => Ok(default),
    }
}
