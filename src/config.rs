use std::net::IpAddr;

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_upload_size: usize,
    pub db_max_connections: u32,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env_required = |key: &str| match lookup(key) {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(format!("Missing required environment variable: {key}")),
        };
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("INTAKE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_HOST: {e}"))?;

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let max_upload_size: usize =
            env_or("INTAKE_MAX_UPLOAD_SIZE", &DEFAULT_MAX_UPLOAD_SIZE.to_string())
                .parse()
                .map_err(|e| format!("Invalid INTAKE_MAX_UPLOAD_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("INTAKE_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid INTAKE_DB_MAX_CONNECTIONS: {e}"))?;

        let cors_origins = parse_list(&env_or("INTAKE_CORS_ORIGINS", ""));

        let log_level = env_or("INTAKE_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            max_upload_size,
            db_max_connections,
            cors_origins,
            log_level,
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
