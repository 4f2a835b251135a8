use std::fmt;

/// Which client the backend is deployed for. The two deployments share every
/// rule and differ only in the labels reported by the service endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Android,
}

impl Platform {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "web" => Some(Platform::Web),
            "android" => Some(Platform::Android),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Web => "Web",
            Platform::Android => "Android",
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing required environment variable {key}"),
            ConfigError::Invalid { key, value } => write!(f, "Invalid value for {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub session_cookie_secure: bool,
    pub platform: Platform,
    pub db_max_connections: u32,
    pub audit_retention_days: i64,
    pub seed_admin_password: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env`, if any,
    /// has been loaded by the caller).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8000".to_string());

        let platform = match lookup("API_PLATFORM") {
            Some(v) => Platform::parse(&v).ok_or(ConfigError::Invalid {
                key: "API_PLATFORM",
                value: v,
            })?,
            None => Platform::Web,
        };

        let session_cookie_secure = match lookup("SESSION_COOKIE_SECURE") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                key: "SESSION_COOKIE_SECURE",
                value: v,
            })?,
            None => false,
        };

        let db_max_connections = parse_number(&lookup, "DB_MAX_CONNECTIONS", 8u32)?;
        let audit_retention_days = parse_number(&lookup, "AUDIT_RETENTION_DAYS", 90i64)?;

        Ok(AppConfig {
            database_url,
            bind_addr,
            session_key: lookup("SESSION_KEY"),
            session_cookie_secure,
            platform,
            db_max_connections,
            audit_retention_days,
            seed_admin_password: lookup("SEED_ADMIN_PASSWORD").filter(|v| !v.is_empty()),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}
