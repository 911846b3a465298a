use deal4bank_core::site::DEFAULT_CATALOG_HEADING;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Lifetime of the cached site-data payload (default: `60`).
    pub site_cache_ttl_secs: u64,
    /// Heading served above the catalog tabs.
    pub catalog_heading: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                            |
    /// |------------------------|------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                          |
    /// | `PORT`                 | `3000`                             |
    /// | `CORS_ORIGINS`         | `http://localhost:9002`            |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                               |
    /// | `DATABASE_URL`         | unset (in-memory store)            |
    /// | `SITE_CACHE_TTL_SECS`  | `60`                               |
    /// | `CATALOG_HEADING`      | `Explore Our Financial Products`   |
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:9002")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parsed_env("PORT", 3000),
            cors_origins,
            request_timeout_secs: parsed_env("REQUEST_TIMEOUT_SECS", 30),
            database_url,
            site_cache_ttl_secs: parsed_env("SITE_CACHE_TTL_SECS", 60),
            catalog_heading: env_or("CATALOG_HEADING", DEFAULT_CATALOG_HEADING),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse a numeric variable. A present but malformed value aborts startup.
fn parsed_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid number: {e}")),
        Err(_) => default,
    }
}
