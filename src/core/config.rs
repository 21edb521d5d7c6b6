use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub routing: RoutingConfig,
    pub map_session: MapSessionConfig,
    pub rate_limit: RateLimitConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// OpenRouteService directions API settings
#[derive(Clone)]
pub struct RoutingConfig {
    pub api_key: String,
    pub base_url: String,
    /// Quiet period after the last map search edit before a directions request is issued
    pub debounce: Duration,
    pub request_timeout: Duration,
}

// Keeps the API key out of logs
impl std::fmt::Debug for RoutingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("debounce", &self.debounce)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Lifetime limits for server-held map sessions
#[derive(Debug, Clone)]
pub struct MapSessionConfig {
    /// Sessions untouched for this long are torn down
    pub idle_ttl: Duration,
    pub sweep_interval: Duration,
    pub max_sessions: usize,
}

/// Fixed-window limit applied per client address to `/api/*`
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
    /// Key on the first `X-Forwarded-For` hop instead of the socket peer.
    /// Only safe behind a proxy that overwrites the header.
    pub trust_proxy: bool,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            routing: RoutingConfig::from_env()?,
            map_session: MapSessionConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 0;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl RoutingConfig {
    const DEFAULT_BASE_URL: &'static str = "https://api.openrouteservice.org";
    const DEFAULT_DEBOUNCE_MS: u64 = 500;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("ORS_API_KEY")
            .map_err(|_| "ORS_API_KEY environment variable is required".to_string())?;

        let base_url = env::var("ORS_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let debounce_ms = env::var("ROUTE_DEBOUNCE_MS")
            .unwrap_or_else(|_| Self::DEFAULT_DEBOUNCE_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "ROUTE_DEBOUNCE_MS must be a valid number".to_string())?;

        let request_timeout_secs = env::var("ORS_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ORS_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_key,
            base_url,
            debounce: Duration::from_millis(debounce_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

impl MapSessionConfig {
    const DEFAULT_IDLE_TTL_SECS: u64 = 30 * 60;
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
    const DEFAULT_MAX_SESSIONS: usize = 10_000;

    pub fn from_env() -> Result<Self, String> {
        let idle_ttl_secs = env::var("MAP_SESSION_IDLE_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "MAP_SESSION_IDLE_TTL_SECS must be a valid number".to_string())?;

        let sweep_interval_secs = env::var("MAP_SESSION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "MAP_SESSION_SWEEP_INTERVAL_SECS must be a valid number".to_string())?;

        let max_sessions = env::var("MAP_SESSION_MAX")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_SESSIONS.to_string())
            .parse::<usize>()
            .map_err(|_| "MAP_SESSION_MAX must be a valid number".to_string())?;

        if sweep_interval_secs == 0 {
            return Err("MAP_SESSION_SWEEP_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(Self {
            idle_ttl: Duration::from_secs(idle_ttl_secs),
            sweep_interval: Duration::from_secs(sweep_interval_secs),
            max_sessions,
        })
    }
}

impl Default for MapSessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(Self::DEFAULT_IDLE_TTL_SECS),
            sweep_interval: Duration::from_secs(Self::DEFAULT_SWEEP_INTERVAL_SECS),
            max_sessions: Self::DEFAULT_MAX_SESSIONS,
        }
    }
}

impl RateLimitConfig {
    const DEFAULT_WINDOW_SECS: u64 = 15 * 60;
    const DEFAULT_MAX_REQUESTS: u32 = 100;

    pub fn from_env() -> Result<Self, String> {
        let window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_WINDOW_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "RATE_LIMIT_WINDOW_SECS must be a valid number".to_string())?;

        let max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUESTS.to_string())
            .parse::<u32>()
            .map_err(|_| "RATE_LIMIT_MAX_REQUESTS must be a valid number".to_string())?;

        if max_requests == 0 {
            return Err("RATE_LIMIT_MAX_REQUESTS must be greater than zero".to_string());
        }

        let trust_proxy = env::var("RATE_LIMIT_TRUST_PROXY")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            window: Duration::from_secs(window_secs),
            max_requests,
            trust_proxy,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Campus Access Map API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Accessible campus routing, map sessions and user preferences".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
