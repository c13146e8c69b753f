//! The environment record read by the rest of the application.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{ApiServerUrl, Audience, Auth0Domain, CallbackUrl, ClientId};

/// Default API server the front end talks to.
pub const DEFAULT_API_SERVER_URL: &str = "http://127.0.0.1:5000";
/// Default Auth0 tenant domain prefix.
pub const DEFAULT_AUTH0_URL: &str = "dev-5biwot8b";
/// Default audience set for the Auth0 API.
pub const DEFAULT_AUTH0_AUDIENCE: &str = "coffee";
/// Default client id generated for the Auth0 application.
pub const DEFAULT_AUTH0_CLIENT_ID: &str = "AbjqglZv0nc2G6tVcNy0MC9z80R6ISq1";
/// Default base URL of the running Ionic application.
pub const DEFAULT_AUTH0_CALLBACK_URL: &str = "http://127.0.0.1:8100";

/// Identity-provider settings of the environment record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth0Settings {
    url: Auth0Domain,
    audience: Audience,
    client_id: ClientId,
    #[serde(rename = "callbackURL")]
    callback_url: CallbackUrl,
}

impl Auth0Settings {
    pub fn new(
        url: Auth0Domain,
        audience: Audience,
        client_id: ClientId,
        callback_url: CallbackUrl,
    ) -> Self {
        Self {
            url,
            audience,
            client_id,
            callback_url,
        }
    }

    /// Tenant domain prefix, without scheme or `.auth0.com` suffix.
    pub fn url(&self) -> &Auth0Domain {
        &self.url
    }

    pub fn audience(&self) -> &Audience {
        &self.audience
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn callback_url(&self) -> &CallbackUrl {
        &self.callback_url
    }

    /// Token issuer of the tenant, `https://{url}.auth0.com/`.
    pub fn issuer(&self) -> String {
        format!("https://{}.auth0.com/", self.url)
    }
}

/// Immutable environment configuration record.
///
/// Fields are private and only exposed through borrowing accessors, so a
/// constructed record cannot change for the rest of its lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    production: bool,
    api_server_url: ApiServerUrl,
    auth0: Auth0Settings,
}

impl Environment {
    pub fn new(production: bool, api_server_url: ApiServerUrl, auth0: Auth0Settings) -> Self {
        Self {
            production,
            api_server_url,
            auth0,
        }
    }

    /// Record built from the literal template values.
    pub fn builtin() -> Self {
        Self::new(
            false,
            ApiServerUrl::from_trusted(DEFAULT_API_SERVER_URL),
            Auth0Settings::new(
                Auth0Domain::from_trusted(DEFAULT_AUTH0_URL),
                Audience::from_trusted(DEFAULT_AUTH0_AUDIENCE),
                ClientId::from_trusted(DEFAULT_AUTH0_CLIENT_ID),
                CallbackUrl::from_trusted(DEFAULT_AUTH0_CALLBACK_URL),
            ),
        )
    }

    /// Deployment mode flag.
    pub fn production(&self) -> bool {
        self.production
    }

    pub fn api_server_url(&self) -> &ApiServerUrl {
        &self.api_server_url
    }

    pub fn auth0(&self) -> &Auth0Settings {
        &self.auth0
    }
}

/// Process-wide record, set at most once.
static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

#[derive(Debug, Error, PartialEq, Eq)]
#[error("environment is already installed for this process")]
/// Returned when a second record is installed into the process slot.
pub struct AlreadyInstalled;

/// Stores `environment` as the process-wide record. Only the first call wins.
pub fn install(environment: Environment) -> Result<&'static Environment, AlreadyInstalled> {
    let mut candidate = Some(environment);
    let installed = ENVIRONMENT.get_or_init(|| {
        candidate
            .take()
            .unwrap_or_else(Environment::builtin)
    });
    match candidate {
        None => Ok(installed),
        Some(_) => Err(AlreadyInstalled),
    }
}

/// Returns the process-wide record, installing the built-in one on first read.
pub fn environment() -> &'static Environment {
    ENVIRONMENT.get_or_init(Environment::builtin)
}
