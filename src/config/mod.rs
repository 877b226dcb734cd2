use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub rows_per_page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub seed_demo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token issuer, e.g. https://agency.eu.auth0.com/
    pub issuer: String,
    pub audience: String,
    /// Explicit JWKS endpoint. When unset, derived from the issuer.
    pub jwks_url: Option<String>,
    /// Inline JWKS document. Takes precedence over the URL; used for
    /// offline development and tests.
    pub jwks_json: Option<String>,
    pub jwks_refresh_secs: u64,
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Resolved JWKS endpoint (explicit URL, or the issuer's well-known path).
    pub fn jwks_endpoint(&self) -> String {
        match &self.jwks_url {
            Some(url) => url.clone(),
            None => {
                let issuer = self.issuer.trim_end_matches('/');
                format!("{}/.well-known/jwks.json", issuer)
            }
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("AGENCY_API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("ROWS_PER_PAGE") {
            self.api.rows_per_page = v.parse().unwrap_or(self.api.rows_per_page);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Ok(v) = env::var("DB_SEED_DEMO") {
            self.database.seed_demo = v.parse().unwrap_or(self.database.seed_demo);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_ISSUER") {
            self.auth.issuer = v;
        }
        if let Ok(v) = env::var("AUTH_AUDIENCE") {
            self.auth.audience = v;
        }
        if let Ok(v) = env::var("AUTH_JWKS_URL") {
            self.auth.jwks_url = Some(v);
        }
        if let Ok(v) = env::var("AUTH_JWKS_JSON") {
            self.auth.jwks_json = Some(v);
        }
        if let Ok(v) = env::var("AUTH_JWKS_REFRESH_SECS") {
            self.auth.jwks_refresh_secs = v.parse().unwrap_or(self.auth.jwks_refresh_secs);
        }
        if let Ok(v) = env::var("AUTH_LEEWAY_SECS") {
            self.auth.leeway_secs = v.parse().unwrap_or(self.auth.leeway_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                port: 8080,
                rows_per_page: 10,
            },
            database: DatabaseConfig {
                max_connections: 5,
                connect_timeout_secs: 30,
                seed_demo: false,
            },
            auth: AuthConfig {
                issuer: "https://agency-dev.example.com/".to_string(),
                audience: "agency".to_string(),
                jwks_url: None,
                jwks_json: None,
                jwks_refresh_secs: 3600,
                leeway_secs: 0,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                port: 8080,
                rows_per_page: 10,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 5,
                seed_demo: false,
            },
            auth: AuthConfig {
                issuer: "https://agency.example.com/".to_string(),
                audience: "agency".to_string(),
                jwks_url: None,
                jwks_json: None,
                jwks_refresh_secs: 3600,
                leeway_secs: 0,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.rows_per_page, 10);
        assert_eq!(config.database.max_connections, 5);
        assert!(!config.database.seed_demo);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.connect_timeout_secs, 5);
    }

    #[test]
    fn test_jwks_endpoint_derived_from_issuer() {
        let mut auth = AppConfig::development().auth;
        auth.jwks_url = None;
        auth.issuer = "https://agency.eu.auth0.com/".to_string();
        assert_eq!(
            auth.jwks_endpoint(),
            "https://agency.eu.auth0.com/.well-known/jwks.json"
        );

        auth.jwks_url = Some("https://keys.internal/jwks.json".to_string());
        assert_eq!(auth.jwks_endpoint(), "https://keys.internal/jwks.json");
    }
}
