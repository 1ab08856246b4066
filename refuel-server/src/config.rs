//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// SQLite connection URL, e.g. `sqlite:refuel.db`
    pub database_url: String,
    /// HTTP listen port
    pub http_port: u16,
    /// HMAC secret for user tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// Reverse geocoding service base URL
    pub geocoder_base_url: String,
    /// User-Agent sent to the geocoding service
    pub geocoder_user_agent: String,
    /// Structured JSON log output (`LOG_FORMAT=json`)
    pub log_json: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:refuel.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiry_hours: std::env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h: &i64| *h > 0)
                .unwrap_or(24),
            geocoder_base_url: std::env::var("GEOCODER_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "https://nominatim.openstreetmap.org".into()),
            geocoder_user_agent: std::env::var("GEOCODER_USER_AGENT")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "RefuelNow/1.0 (contact@refuelnow.com)".into()),
            log_json: std::env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            environment,
        })
    }

    /// Development defaults with no environment lookups
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            environment: "test".into(),
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            jwt_secret: "test-secret".into(),
            jwt_expiry_hours: 24,
            geocoder_base_url: "http://127.0.0.1:9".into(),
            geocoder_user_agent: "RefuelNow/1.0 (test)".into(),
            log_json: false,
        }
    }
}
