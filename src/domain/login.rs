//! Auth0 `/authorize` link assembled from the environment record.

use thiserror::Error;
use url::Url;

use crate::domain::environment::Auth0Settings;

#[derive(Debug, Error)]
/// Errors that can occur while assembling a login link.
pub enum LoginLinkError {
    #[error("invalid authorize endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Builder for the implicit-flow login link used by the front end.
#[derive(Clone, Debug)]
pub struct LoginLink<'a> {
    settings: &'a Auth0Settings,
    callback_path: &'a str,
}

impl<'a> LoginLink<'a> {
    pub fn new(settings: &'a Auth0Settings) -> Self {
        Self {
            settings,
            callback_path: "",
        }
    }

    /// Appends `path` to the callback URL in the `redirect_uri` parameter.
    pub fn with_callback_path(mut self, path: &'a str) -> Self {
        self.callback_path = path;
        self
    }

    /// Returns `https://{url}.auth0.com/authorize?...` with the configured
    /// audience, client id and redirect URI.
    pub fn build(&self) -> Result<Url, LoginLinkError> {
        let mut url = Url::parse(&format!(
            "https://{}.auth0.com/authorize",
            self.settings.url()
        ))?;

        let redirect_uri = format!("{}{}", self.settings.callback_url(), self.callback_path);
        url.query_pairs_mut()
            .append_pair("audience", self.settings.audience())
            .append_pair("response_type", "token")
            .append_pair("client_id", self.settings.client_id())
            .append_pair("redirect_uri", &redirect_uri);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::environment::Environment;

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn embeds_audience_unmodified() {
        let env = Environment::builtin();
        let link = LoginLink::new(env.auth0()).build().unwrap();

        assert_eq!(link.scheme(), "https");
        assert_eq!(link.host_str(), Some("dev-5biwot8b.auth0.com"));
        assert_eq!(link.path(), "/authorize");

        let params = query(&link);
        assert_eq!(params["audience"], "coffee");
        assert_eq!(params["response_type"], "token");
        assert_eq!(params["client_id"], "AbjqglZv0nc2G6tVcNy0MC9z80R6ISq1");
        assert_eq!(params["redirect_uri"], "http://127.0.0.1:8100");
    }

    #[test]
    fn appends_callback_path_to_redirect_uri() {
        let env = Environment::builtin();
        let link = LoginLink::new(env.auth0())
            .with_callback_path("/tabs/user-page")
            .build()
            .unwrap();

        assert_eq!(
            query(&link)["redirect_uri"],
            "http://127.0.0.1:8100/tabs/user-page"
        );
    }
}
