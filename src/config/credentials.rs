//! Backend credentials served to the browser.

use serde::Serialize;
use thiserror::Error;

/// Environment variable holding the backend URL.
pub const URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the public anonymous key.
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// `Cache-Control` value for the client configuration response.
pub const CACHE_CONTROL: &str = "no-store, max-age=0";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Environment variable {name} is not set")]
    Missing { name: &'static str },
}

/// Public connection settings for the hosted backend.
///
/// Only the public anonymous key ever goes here, never a service key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendCredentials {
    #[serde(rename = "SUPABASE_URL")]
    pub url: String,
    #[serde(rename = "SUPABASE_ANON_KEY")]
    pub anon_key: String,
}

impl BackendCredentials {
    /// Reads the credentials from the process environment.
    ///
    /// There is no fallback value: a deployment without them is misconfigured.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the credentials through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CredentialsError> {
        let read = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(CredentialsError::Missing { name })
        };

        Ok(Self { url: read(URL_VAR)?, anon_key: read(ANON_KEY_VAR)? })
    }

    /// JSON body of the client configuration response.
    pub fn to_response_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
