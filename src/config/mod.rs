use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub filter: FilterConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub max_limit: Option<i32>,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment-specific defaults first, then specific env var overrides
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("FILTER_MAX_LIMIT") {
            self.filter.max_limit = v.parse().ok();
        }
        if let Ok(v) = env::var("FILTER_DEBUG_LOGGING") {
            self.filter.debug_logging = v.parse().unwrap_or(self.filter.debug_logging);
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging =
                v.parse().unwrap_or(self.database.enable_query_logging);
        }

        if let Ok(v) = env::var("API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging =
                v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            filter: FilterConfig {
                max_limit: Some(1000),
                debug_logging: true,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout_secs: 30,
                enable_query_logging: true,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
                jwt_secret: "dev-only-secret".to_string(),
                jwt_expiry_hours: 24 * 7,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            filter: FilterConfig {
                max_limit: Some(500),
                debug_logging: false,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout_secs: 10,
                enable_query_logging: true,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![],
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            filter: FilterConfig {
                max_limit: Some(100),
                debug_logging: false,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout_secs: 5,
                enable_query_logging: false,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![],
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.filter.max_limit, Some(1000));
        assert!(config.database.enable_query_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.filter.max_limit, Some(100));
        assert!(!config.api.enable_request_logging);
        assert!(config.security.jwt_secret.is_empty());
    }
}
