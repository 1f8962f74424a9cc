//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `INVCTL_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `INVCTL_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `INVCTL_INVENTORY__PAGE_SIZE=10` sets the `inventory.page_size` field.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use invctl::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//!
//! println!("Server will bind to {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Structure
//!
//! - **Server**: `host`, `port`
//! - **Storage**: `data.products_file` - JSON file holding the product list
//! - **Inventory**: `inventory.page_size` - rows per page in the inventory table
//! - **Authentication**: `auth.session`, `auth.password`, `auth.users`, `auth.cors`
//! - **Security**: `secret_key` - signs session cookies
//! - **Limits**: `limits.max_image_bytes`, `limits.max_body_bytes`
//! - **Features**: `enable_metrics`, `enable_otel_export`
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! INVCTL_PORT=8080
//! INVCTL_SECRET_KEY="change-me"
//! INVCTL_DATA__PRODUCTS_FILE=/var/lib/invctl/products.json
//! INVCTL_AUTH__SESSION__COOKIE_SECURE=true
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use url::Url;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "INVCTL_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment variables.
/// All fields have sensible defaults defined in the `Default` implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Secret key for signing session cookies (required)
    pub secret_key: Option<String>,
    /// Where products are persisted
    pub data: DataConfig,
    /// Inventory table settings
    pub inventory: InventoryConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Request size limits
    pub limits: LimitsConfig,
    /// Enable Prometheus metrics endpoint at `/internal/metrics`
    pub enable_metrics: bool,
    /// Enable OpenTelemetry OTLP export for distributed tracing
    pub enable_otel_export: bool,
}

/// Product storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// JSON file holding the product array. Created with `[]` if missing.
    pub products_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventoryConfig {
    /// Rows per page in the inventory listing
    pub page_size: usize,
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Session cookie settings
    pub session: SessionConfig,
    /// Password rules
    pub password: PasswordConfig,
    /// Users allowed to sign in. Passwords are hashed at startup.
    pub users: Vec<UserConfig>,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Session lifetime; also the cookie Max-Age
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Cookie name for session token
    pub cookie_name: String,
    /// Set Secure flag on cookies (HTTPS only)
    pub cookie_secure: bool,
    /// SameSite cookie attribute ("strict", "lax", or "none")
    pub cookie_same_site: String,
}

/// Password validation rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordConfig {
    /// Minimum password length
    pub min_length: usize,
    /// Maximum password length
    pub max_length: usize,
    /// Argon2 memory cost in KiB (default: 19456 KiB = 19 MB)
    pub argon2_memory_kib: u32,
    /// Argon2 iterations (default: 2)
    pub argon2_iterations: u32,
    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

/// A user that may sign in.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests. Empty means same-origin only.
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials (cookies) in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

/// CORS origin specification.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `https://shop.example.com`)
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum size of an embedded product image data URL, in bytes
    pub max_image_bytes: usize,
    /// Maximum request body size, in bytes
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            secret_key: None,
            data: DataConfig::default(),
            inventory: InventoryConfig::default(),
            auth: AuthConfig::default(),
            limits: LimitsConfig::default(),
            enable_metrics: false,
            enable_otel_export: false,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            products_file: PathBuf::from("data/products.json"),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(7 * 24 * 60 * 60), // 7 days
            cookie_name: "inv_session".to_string(),
            cookie_secure: false,
            cookie_same_site: "lax".to_string(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 64,
            // Argon2id RFC recommendations
            argon2_memory_kib: 19456, // 19 MB
            argon2_iterations: 2,
            argon2_parallelism: 1,
        }
    }
}

impl Default for UserConfig {
    /// The demo account shipped with the sample data
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            name: "Roshan Raviraj".to_string(),
            email: "roshan@example.com".to_string(),
            role: "Admin".to_string(),
            password: "password123".to_string(),
            phone: "+91 98765 43210".to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allow_credentials: true,
            max_age: Some(3600), // Cache preflight for 1 hour
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 2 * 1024 * 1024,  // 2MB
            max_body_bytes: 4 * 1024 * 1024, // base64 inflates images by a third
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        if config.auth.users.is_empty() {
            config.auth.users.push(UserConfig::default());
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.secret_key.as_deref().is_none_or(str::is_empty) {
            return Err(Error::Internal {
                operation: "Config validation: secret_key is not configured. \
                     Please set INVCTL_SECRET_KEY environment variable or add secret_key to config file."
                    .to_string(),
            });
        }

        if self.auth.users.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: auth.users must contain at least one user".to_string(),
            });
        }

        for user in &self.auth.users {
            if !user.email.contains('@') {
                return Err(Error::Internal {
                    operation: format!("Config validation: user '{}' has an invalid email '{}'", user.id, user.email),
                });
            }
        }

        if self.inventory.page_size < 1 {
            return Err(Error::Internal {
                operation: "Config validation: inventory.page_size must be at least 1".to_string(),
            });
        }

        let password = &self.auth.password;
        if password.min_length < 1 || password.min_length > password.max_length {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: Invalid password configuration: min_length ({}) must be between 1 and max_length ({})",
                    password.min_length, password.max_length
                ),
            });
        }

        // Validate session lifetime is reasonable
        if self.auth.session.timeout.as_secs() < 300 {
            // Less than 5 minutes
            return Err(Error::Internal {
                operation: "Config validation: session timeout is too short (minimum 5 minutes)".to_string(),
            });
        }

        if self.auth.session.timeout.as_secs() > 86400 * 30 {
            // More than 30 days
            return Err(Error::Internal {
                operation: "Config validation: session timeout is too long (maximum 30 days)".to_string(),
            });
        }

        if !matches!(self.auth.session.cookie_same_site.to_lowercase().as_str(), "strict" | "lax" | "none") {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: cookie_same_site must be one of strict, lax or none (got '{}')",
                    self.auth.session.cookie_same_site
                ),
            });
        }

        // Validate that wildcard is not used with credentials
        let has_wildcard = self
            .auth
            .cors
            .allowed_origins
            .iter()
            .any(|origin| matches!(origin, CorsOrigin::Wildcard));
        if has_wildcard && self.auth.cors.allow_credentials {
            return Err(Error::Internal {
                operation: "Config validation: CORS cannot use wildcard origin '*' with allow_credentials=true. Specify explicit origins."
                    .to_string(),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("INVCTL_").split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
