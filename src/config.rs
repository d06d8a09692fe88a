use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::v1::Credentials;

pub const ENV_CONSUMER_KEY: &str = "TWITTER_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "TWITTER_CONSUMER_SECRET";
pub const ENV_OAUTH_TOKEN: &str = "TWITTER_OAUTH_TOKEN";
pub const ENV_OAUTH_TOKEN_SECRET: &str = "TWITTER_OAUTH_TOKEN_SECRET";

/// Raw credential strings, as loaded from a file or the environment.
///
/// The file format is a JSON object with `ConsumerKey`, `ConsumerSecret`,
/// `OAuthToken` and `OAuthTokenSecret`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "ConsumerKey")]
    pub consumer_key: Option<String>,
    #[serde(rename = "ConsumerSecret")]
    pub consumer_secret: Option<String>,
    #[serde(rename = "OAuthToken")]
    pub oauth_token: Option<String>,
    #[serde(rename = "OAuthTokenSecret")]
    pub oauth_token_secret: Option<String>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config_invalid(format!("read config {} failed", path.display())).with_source(e)
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::config_invalid("config is not valid json").with_source(e))
    }

    /// Loads from `TWITTER_*` environment variables. Unset variables stay
    /// `None`.
    pub fn from_env() -> Self {
        Config {
            consumer_key: env::var(ENV_CONSUMER_KEY).ok(),
            consumer_secret: env::var(ENV_CONSUMER_SECRET).ok(),
            oauth_token: env::var(ENV_OAUTH_TOKEN).ok(),
            oauth_token_secret: env::var(ENV_OAUTH_TOKEN_SECRET).ok(),
        }
    }

    /// Fills fields that are still unset from `other`.
    pub fn or(self, other: Config) -> Self {
        Config {
            consumer_key: self.consumer_key.or(other.consumer_key),
            consumer_secret: self.consumer_secret.or(other.consumer_secret),
            oauth_token: self.oauth_token.or(other.oauth_token),
            oauth_token_secret: self.oauth_token_secret.or(other.oauth_token_secret),
        }
    }

    /// Builds credentials; with no token pair configured the result is
    /// consumer-only.
    pub fn into_credentials(self) -> Result<Credentials> {
        let consumer = Credentials::consumer_only(
            required(ENV_CONSUMER_KEY, self.consumer_key)?,
            required(ENV_CONSUMER_SECRET, self.consumer_secret)?,
        )?;
        match (self.oauth_token, self.oauth_token_secret) {
            (None, None) => Ok(consumer),
            (token, secret) => consumer.with_token(
                required(ENV_OAUTH_TOKEN, token)?,
                required(ENV_OAUTH_TOKEN_SECRET, secret)?,
            ),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &self.consumer_secret.as_ref().map(|_| "<redacted>"))
            .field("oauth_token", &self.oauth_token)
            .field(
                "oauth_token_secret",
                &self.oauth_token_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::config_invalid(format!("{name} is not configured")))
}
