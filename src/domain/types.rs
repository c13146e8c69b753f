//! Strongly-typed value objects backing the environment record.
//!
//! Every wrapper rejects blank input and stores the accepted value verbatim,
//! so a consumer reads back exactly what was configured.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Provided tenant domain contained characters outside a host name.
    #[error("invalid tenant domain: {0}")]
    InvalidDomain(String),
}

/// Rejects values without any non-whitespace character.
fn non_blank(value: String) -> Result<String, TypeConstraintError> {
    if value.trim().is_empty() {
        Err(TypeConstraintError::EmptyString)
    } else {
        Ok(value)
    }
}

/// Implements the shared accessors and conversions of a string newtype.
macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Wraps a compile-time literal already known to satisfy the constraints.
            pub(crate) fn from_trusted(value: &'static str) -> Self {
                Self(value.to_string())
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

macro_rules! non_blank_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wraps a non-blank value without altering it.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                Ok(Self(non_blank(value.into())?))
            }
        }

        string_newtype_impls!($name);
    };
}

macro_rules! url_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Ensures the value is a well-formed URL before wrapping it untouched.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let url = non_blank(value.into())?;
                if !url.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl);
                }
                Ok(Self(url))
            }

            /// Returns `true` when the URL uses the `https` scheme.
            pub fn is_https(&self) -> bool {
                self.0
                    .get(..8)
                    .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
            }
        }

        string_newtype_impls!($name);
    };
}

url_newtype!(
    ApiServerUrl,
    "Base URL of the backend API, kept exactly as configured."
);

url_newtype!(
    CallbackUrl,
    "Redirect URL registered with the identity provider."
);

non_blank_string_newtype!(
    Audience,
    "Identifier of the protected API issued tokens must target."
);

non_blank_string_newtype!(
    ClientId,
    "Public identifier of the registered client application."
);

/// Auth0 tenant domain prefix, e.g. `dev-5biwot8b`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Auth0Domain(String);

impl Auth0Domain {
    /// Accepts host-name characters only; schemes and paths are rejected.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let domain = non_blank(value.into())?;
        let valid = domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
            && !domain.starts_with(['.', '-'])
            && !domain.ends_with('.');
        if !valid {
            return Err(TypeConstraintError::InvalidDomain(domain));
        }
        Ok(Self(domain))
    }
}

string_newtype_impls!(Auth0Domain);
