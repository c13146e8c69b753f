//! Configuration model loaded from external sources.

use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::environment::{Auth0Settings, Environment};
use crate::domain::types::{
    ApiServerUrl, Audience, Auth0Domain, CallbackUrl, ClientId, TypeConstraintError,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid `{field}`: {source}")]
/// A source value that did not satisfy its value-object constraints.
pub struct ConfigFieldError {
    pub field: &'static str,
    #[source]
    pub source: TypeConstraintError,
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Identity-provider block as written in configuration files.
pub struct Auth0Config {
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(length(min = 1))]
    pub audience: String,
    #[validate(length(min = 1))]
    pub client_id: String,
    #[validate(length(min = 1))]
    pub callback_url: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Environment settings before domain validation.
pub struct EnvironmentConfig {
    pub production: bool,
    #[validate(length(min = 1))]
    pub api_server_url: String,
    #[validate(nested)]
    pub auth0: Auth0Config,
}

fn field<T>(
    name: &'static str,
    value: Result<T, TypeConstraintError>,
) -> Result<T, ConfigFieldError> {
    value.map_err(|source| ConfigFieldError {
        field: name,
        source,
    })
}

impl TryFrom<EnvironmentConfig> for Environment {
    type Error = ConfigFieldError;

    fn try_from(config: EnvironmentConfig) -> Result<Self, Self::Error> {
        let auth0 = Auth0Settings::new(
            field("auth0.url", Auth0Domain::new(config.auth0.url))?,
            field("auth0.audience", Audience::new(config.auth0.audience))?,
            field("auth0.client_id", ClientId::new(config.auth0.client_id))?,
            field(
                "auth0.callback_url",
                CallbackUrl::new(config.auth0.callback_url),
            )?,
        );

        Ok(Environment::new(
            config.production,
            field("api_server_url", ApiServerUrl::new(config.api_server_url))?,
            auth0,
        ))
    }
}
