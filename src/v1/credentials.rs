use std::fmt;

use crate::error::{Error, Result};

/// The consumer key pair plus, once authorized, the access token pair.
///
/// A `Credentials` value never changes after construction; clone it or share
/// it by reference between concurrent signing calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    token: Option<AccessToken>,
}

#[derive(Clone, PartialEq, Eq)]
struct AccessToken {
    token: String,
    secret: String,
}

impl Credentials {
    /// Full credential set for user-context calls. Every field must be
    /// non-empty.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::consumer_only(consumer_key, consumer_secret)?.with_token(token, token_secret)
    }

    /// Consumer-only credentials, as used to obtain a request token.
    pub fn consumer_only(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Result<Self> {
        Ok(Credentials {
            consumer_key: non_empty("consumer key", consumer_key.into())?,
            consumer_secret: non_empty("consumer secret", consumer_secret.into())?,
            token: None,
        })
    }

    /// Attaches an access token pair, replacing any previous one.
    pub fn with_token(
        self,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self> {
        Ok(Credentials {
            token: Some(AccessToken {
                token: non_empty("access token", token.into())?,
                secret: non_empty("access token secret", token_secret.into())?,
            }),
            ..self
        })
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.token.as_str())
    }

    /// The token secret, or `""` for consumer-only credentials.
    pub fn token_secret(&self) -> &str {
        self.token.as_ref().map_or("", |t| t.secret.as_str())
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `consumer_secret&token_secret`; the `&` is present even without a
    /// token.
    pub(crate) fn signing_key(&self) -> String {
        format!("{}&{}", self.consumer_secret, self.token_secret())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token())
            .field("token_secret", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(field: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(Error::config_invalid(format!("{field} must not be empty")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_full_credentials() {
        let c = Credentials::new("ck", "cs", "tk", "ts").unwrap();
        assert_eq!(c.consumer_key(), "ck");
        assert_eq!(c.token(), Some("tk"));
        assert_eq!(c.signing_key(), "cs&ts");
    }

    #[test]
    fn test_consumer_only_signing_key_keeps_separator() {
        let c = Credentials::consumer_only("ck", "cs").unwrap();
        assert!(!c.has_token());
        assert_eq!(c.token_secret(), "");
        assert_eq!(c.signing_key(), "cs&");
    }

    #[test]
    fn test_empty_fields_are_config_errors() {
        for (ck, cs, t, ts) in [
            ("", "cs", "t", "ts"),
            ("ck", "", "t", "ts"),
            ("ck", "cs", "", "ts"),
            ("ck", "cs", "t", ""),
        ] {
            let err = Credentials::new(ck, cs, t, ts).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let c = Credentials::new("ck", "consumer-secret", "tk", "token-secret").unwrap();
        let debug = format!("{c:?}");
        assert!(debug.contains("ck"));
        assert!(!debug.contains("consumer-secret"));
        assert!(!debug.contains("token-secret"));
    }
}
