//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate, with serde defaults for every field so an empty
//! environment still yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings.
    #[serde(default)]
    pub app: ApplicationConfig,
    /// Invitation lifecycle settings.
    #[serde(default)]
    pub invitations: InvitationConfig,
    /// Photo storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Outbound mail settings.
    #[serde(default)]
    pub mail: MailConfig,
}

/// Application-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Public origin used to build invitation links (`<origin>?invite=<code>`).
    #[serde(default = "default_origin")]
    pub origin: String,
}

/// Invitation lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationConfig {
    /// How many days an invitation stays redeemable.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,
    /// Length of generated share codes, in alphanumeric characters.
    #[serde(default = "default_share_code_length")]
    pub share_code_length: usize,
}

/// Photo storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path prefix under which diary photos are stored.
    #[serde(default = "default_photo_prefix")]
    pub photo_prefix: String,
}

/// Outbound mail (SMTP) settings.
///
/// Mail is best-effort throughout the application; when `enabled` is false
/// the null mailer is used and invitations are delivered by sharing the
/// link manually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether outbound mail is configured at all.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay hostname.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP relay port. 465 selects implicit TLS, anything else STARTTLS.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: String,
    /// SMTP password.
    #[serde(default)]
    pub password: String,
    /// Display name for the From header.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Address for the From header.
    #[serde(default = "default_from_email")]
    pub from_email: String,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CUADERNO__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CUADERNO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: ApplicationConfig::default(),
            invitations: InvitationConfig::default(),
            storage: StorageConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            expiry_days: default_expiry_days(),
            share_code_length: default_share_code_length(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            photo_prefix: default_photo_prefix(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_name: default_from_name(),
            from_email: default_from_email(),
        }
    }
}

fn default_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_expiry_days() -> i64 {
    7
}

fn default_share_code_length() -> usize {
    24
}

fn default_photo_prefix() -> String {
    "diary-photos".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "Cuaderno".to_string()
}

fn default_from_email() -> String {
    "no-reply@cuaderno.local".to_string()
}
