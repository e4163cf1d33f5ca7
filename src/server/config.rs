//! Environment-driven application configuration.
//!
//! `APP_ENV` selects a named profile (`development` or `production`) that supplies
//! defaults; any explicitly set variable overrides the profile value. Object storage and
//! SMTP are optional groups that are only enabled when every variable in the group is set.

use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

/// Longest token lifetime accepted from the environment, one year in minutes
pub const MAX_TOKEN_MINUTES: i64 = 525_600;

/// Named configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvVar {
                name: "APP_ENV".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Credentials for the object storage HTTP API.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage service, without a trailing slash
    pub url: String,
    pub service_key: String,
    pub bucket: String,
}

/// Credentials for the outgoing SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Libris <no-reply@libris.app>`
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,

    pub database_url: String,
    pub secret_key: String,
    pub debug: bool,

    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,

    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_minutes: i64,
    pub password_reset_expire_minutes: i64,

    /// Requests slower than this produce a performance log entry
    pub slow_request_threshold_ms: u64,

    pub default_page_size: u64,
    pub max_page_size: u64,

    pub show_docs: bool,
    pub frontend_url: String,

    pub storage: Option<StorageConfig>,
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Builds a configuration holding the profile defaults.
    ///
    /// # Arguments
    /// - `environment` - Profile supplying the defaults
    /// - `database_url` - Database connection string
    /// - `secret_key` - HMAC secret used to sign tokens
    ///
    /// # Returns
    /// - `Config` - Profile defaults with storage and SMTP disabled
    pub fn for_environment(
        environment: Environment,
        database_url: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        let development = environment == Environment::Development;

        Self {
            environment,
            database_url: database_url.into(),
            secret_key: secret_key.into(),
            debug: development,
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: if development {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            } else {
                Vec::new()
            },
            access_token_expire_minutes: if development { 60 } else { 15 },
            refresh_token_expire_minutes: 7 * 24 * 60,
            password_reset_expire_minutes: 60,
            slow_request_threshold_ms: 500,
            default_page_size: if development { 10 } else { 20 },
            max_page_size: if development { 50 } else { 100 },
            show_docs: development,
            frontend_url: "http://localhost:3000".to_string(),
            storage: None,
            smtp: None,
        }
    }

    /// Loads configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - Profile defaults overridden by any variables that are set
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is malformed
    pub fn from_env() -> Result<Self, AppError> {
        let environment = match optional("APP_ENV") {
            Some(value) => value.parse::<Environment>()?,
            None => Environment::Development,
        };

        let mut config =
            Self::for_environment(environment, required("DATABASE_URL")?, required("SECRET_KEY")?);

        config.debug = parsed("DEBUG", config.debug)?;
        config.host = optional("HOST").unwrap_or(config.host);
        config.port = parsed("PORT", config.port)?;
        if let Some(origins) = optional("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        config.access_token_expire_minutes =
            parsed("ACCESS_TOKEN_EXPIRE_MINUTES", config.access_token_expire_minutes)?;
        config.refresh_token_expire_minutes =
            parsed("REFRESH_TOKEN_EXPIRE_MINUTES", config.refresh_token_expire_minutes)?;
        config.password_reset_expire_minutes =
            parsed("PASSWORD_RESET_EXPIRE_MINUTES", config.password_reset_expire_minutes)?;
        config.slow_request_threshold_ms =
            parsed("SLOW_REQUEST_THRESHOLD_MS", config.slow_request_threshold_ms)?;
        config.default_page_size = parsed("DEFAULT_PAGE_SIZE", config.default_page_size)?;
        config.max_page_size = parsed("MAX_PAGE_SIZE", config.max_page_size)?;
        config.show_docs = parsed("SHOW_DOCS", config.show_docs)?;

        config.frontend_url = match environment {
            Environment::Development => optional("FRONTEND_URL").unwrap_or(config.frontend_url),
            Environment::Production => required("FRONTEND_URL")?,
        };

        config.storage = match (
            optional("STORAGE_URL"),
            optional("STORAGE_SERVICE_KEY"),
            optional("STORAGE_BUCKET"),
        ) {
            (Some(url), Some(service_key), Some(bucket)) => Some(StorageConfig {
                url: url.trim_end_matches('/').to_string(),
                service_key,
                bucket,
            }),
            _ => None,
        };

        config.smtp = match (
            optional("SMTP_HOST"),
            optional("SMTP_USERNAME"),
            optional("SMTP_PASSWORD"),
            optional("EMAIL_FROM"),
        ) {
            (Some(host), Some(username), Some(password), Some(from)) => Some(SmtpConfig {
                host,
                port: parsed("SMTP_PORT", 587)?,
                username,
                password,
                from,
            }),
            _ => None,
        };

        config.validate()?;

        Ok(config)
    }

    /// Rejects numeric settings outside the ranges the server can work with.
    ///
    /// # Returns
    /// - `Ok(())` - Page sizes and token lifetimes are usable
    /// - `Err(ConfigError::InvalidEnvVar)` - Names the first offending variable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name: &str, value: String| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        };

        if self.max_page_size < 1 {
            return Err(invalid("MAX_PAGE_SIZE", self.max_page_size.to_string()));
        }
        if self.default_page_size < 1 || self.default_page_size > self.max_page_size {
            return Err(invalid(
                "DEFAULT_PAGE_SIZE",
                self.default_page_size.to_string(),
            ));
        }

        for (name, minutes) in [
            ("ACCESS_TOKEN_EXPIRE_MINUTES", self.access_token_expire_minutes),
            ("REFRESH_TOKEN_EXPIRE_MINUTES", self.refresh_token_expire_minutes),
            ("PASSWORD_RESET_EXPIRE_MINUTES", self.password_reset_expire_minutes),
        ] {
            if !(1..=MAX_TOKEN_MINUTES).contains(&minutes) {
                return Err(invalid(name, minutes.to_string()));
            }
        }

        Ok(())
    }

    /// Resolves a requested page size against the configured default and maximum.
    pub fn page_size(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
