use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Runtime configuration, read once at startup.
///
/// Defaults suit local development; production overrides everything via
/// the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind, `0.0.0.0` by default.
    pub host: String,
    /// TCP port, `8000` by default.
    pub port: u16,
    /// Origins allowed by CORS, from the comma-separated `CORS_ORIGINS`
    /// variable.
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds, `30` by default.
    pub request_timeout_secs: u64,
    /// Token signing settings, see [`JwtConfig`].
    pub jwt: JwtConfig,
}

/// Read `var` from the environment, falling back to `default`.
fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.into())
}

/// Read `var` with a fallback and parse it into `T`.
fn parsed_env<T: FromStr>(var: &str, default: &str) -> T {
    let raw = env_or(var, default);
    raw.parse()
        .unwrap_or_else(|_| panic!("{var} must be numeric, got '{raw}'"))
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// | Variable               | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `8000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    ///
    /// JWT settings load alongside; see [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// A numeric variable that is set but unparseable aborts startup.
    pub fn from_env() -> Self {
        let origins = env_or("CORS_ORIGINS", "http://localhost:5173");
        let cors_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parsed_env("PORT", "8000"),
            cors_origins,
            request_timeout_secs: parsed_env("REQUEST_TIMEOUT_SECS", "30"),
            jwt: JwtConfig::from_env(),
        }
    }
}
