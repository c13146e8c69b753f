//! Layered loading of the environment record.
//!
//! Sources are applied in order, later ones overriding earlier ones:
//! built-in literals, `{config_dir}/default.yaml`, `{config_dir}/{profile}.yaml`
//! and finally `APP_`-prefixed environment variables (`APP_AUTH0__CLIENT_ID`).

use std::env;
use std::path::PathBuf;

use config::{Config, ConfigBuilder, Map, builder::DefaultState};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::environment::{
    AlreadyInstalled, DEFAULT_API_SERVER_URL, DEFAULT_AUTH0_AUDIENCE, DEFAULT_AUTH0_CALLBACK_URL,
    DEFAULT_AUTH0_CLIENT_ID, DEFAULT_AUTH0_URL, Environment,
};
use crate::models::config::{ConfigFieldError, EnvironmentConfig};

/// Profile used when `APP_ENV` is not set.
pub const DEFAULT_PROFILE: &str = "local";
/// Directory searched for configuration files.
pub const DEFAULT_CONFIG_DIR: &str = "config";

#[derive(Debug, Error)]
/// Errors that can occur while resolving the environment record.
pub enum SettingsError {
    #[error("error loading settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Field(#[from] ConfigFieldError),

    #[error("`{field}` must use https in production")]
    InsecureUrl { field: &'static str },

    #[error(transparent)]
    AlreadyInstalled(#[from] AlreadyInstalled),
}

/// Where settings are read from.
#[derive(Clone, Debug)]
pub struct SettingsSources {
    pub config_dir: PathBuf,
    pub profile: String,
    /// Variables to read instead of the process environment.
    pub env_overrides: Option<Map<String, String>>,
}

impl Default for SettingsSources {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            profile: DEFAULT_PROFILE.to_string(),
            env_overrides: None,
        }
    }
}

impl SettingsSources {
    /// Selects the profile from `APP_ENV` (defaults to `local`).
    pub fn from_env() -> Self {
        Self {
            profile: env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_PROFILE.into()),
            ..Self::default()
        }
    }
}

fn with_builtin_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("production", false)?
        .set_default("api_server_url", DEFAULT_API_SERVER_URL)?
        .set_default("auth0.url", DEFAULT_AUTH0_URL)?
        .set_default("auth0.audience", DEFAULT_AUTH0_AUDIENCE)?
        .set_default("auth0.client_id", DEFAULT_AUTH0_CLIENT_ID)?
        .set_default("auth0.callback_url", DEFAULT_AUTH0_CALLBACK_URL)
}

/// Rejects plain-http endpoints when the record is flagged for production.
fn check_production(environment: &Environment) -> Result<(), SettingsError> {
    if !environment.production() {
        return Ok(());
    }
    if !environment.api_server_url().is_https() {
        return Err(SettingsError::InsecureUrl {
            field: "api_server_url",
        });
    }
    if !environment.auth0().callback_url().is_https() {
        return Err(SettingsError::InsecureUrl {
            field: "auth0.callback_url",
        });
    }
    Ok(())
}

/// Resolves and validates the environment record from `sources`.
pub fn load(sources: &SettingsSources) -> Result<Environment, SettingsError> {
    let default_file = sources.config_dir.join("default");
    let profile_file = sources.config_dir.join(&sources.profile);

    let settings = with_builtin_defaults(Config::builder())?
        .add_source(config::File::with_name(&default_file.to_string_lossy()).required(false))
        .add_source(config::File::with_name(&profile_file.to_string_lossy()).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .source(sources.env_overrides.clone()),
        )
        .build()?;

    let raw = settings.try_deserialize::<EnvironmentConfig>()?;
    if let Err(err) = raw.validate() {
        log::error!("Failed to validate settings: {err}");
        return Err(err.into());
    }

    let environment = Environment::try_from(raw)?;
    check_production(&environment)?;

    log::debug!(
        "Resolved environment for profile `{}` (production: {})",
        sources.profile,
        environment.production()
    );

    Ok(environment)
}

/// Loads the record and installs it as the process-wide instance.
pub fn init(sources: &SettingsSources) -> Result<&'static Environment, SettingsError> {
    let environment = load(sources)?;
    Ok(crate::domain::environment::install(environment)?)
}
