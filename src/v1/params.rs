use std::collections::{btree_map, BTreeMap};

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

use super::values::*;
use super::Credentials;
use crate::error::{Error, Result};
use crate::util;

/// A request's parameter set with unique keys.
///
/// Iteration is always in ascending byte-wise key order, which is the order
/// both the signature base string and the header require.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameters(BTreeMap<String, String>);

impl Parameters {
    pub fn new() -> Self {
        Parameters(BTreeMap::new())
    }

    /// The standing protocol parameters for one signed call.
    ///
    /// `oauth_token` is only present when the credentials carry an access
    /// token.
    pub fn standing(credentials: &Credentials, nonce: impl Into<String>, timestamp: i64) -> Self {
        let mut params = Parameters::new()
            .param(OAUTH_PARAM_KEY_CONSUMER_KEY, credentials.consumer_key())
            .param(OAUTH_PARAM_KEY_NONCE, nonce)
            .param(OAUTH_PARAM_KEY_SIGNATURE_METHOD, OAUTH_VALUE_SIGMETHOD_HMACSHA1)
            .param(OAUTH_PARAM_KEY_TIMESTAMP, timestamp.to_string())
            .param(OAUTH_PARAM_KEY_VERSION, OAUTH_VALUE_VERSION);
        if let Some(token) = credentials.token() {
            params.insert(OAUTH_PARAM_KEY_TOKEN, token);
        }
        params
    }

    /// Standing parameters with a fresh nonce and the current time.
    pub fn fresh(credentials: &Credentials) -> Self {
        Self::standing(credentials, nonce(), Utc::now().timestamp())
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Layers `other` over `self`: on a shared key, `other`'s value wins.
    pub fn merge_with<I, K, V>(mut self, other: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extend(other);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Parameters {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        params.extend(iter);
        params
    }
}

impl IntoIterator for Parameters {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Splits `url` into its bare endpoint and merges its query string with
/// `params`.
///
/// `params` wins over a query-string parameter with the same key. The bare
/// endpoint is returned verbatim (not normalized) but must be an absolute
/// URL with a host.
pub fn canonicalize(url: &str, params: &Parameters) -> Result<(String, Parameters)> {
    let (endpoint, query) = util::url_to_endpoint_and_query(url);

    let parsed = url::Url::parse(endpoint)?;
    if !parsed.has_host() {
        return Err(Error::request_invalid(format!(
            "url {endpoint} has no host to sign against"
        )));
    }

    let merged = query
        .map(util::query_to_map)
        .unwrap_or_default()
        .into_iter()
        .collect::<Parameters>()
        .merge_with(params);
    Ok((endpoint.to_string(), merged))
}

/// Generates a nonce: 32 bytes from the OS random source, base64-encoded,
/// with everything outside `[A-Za-z0-9]` stripped.
pub fn nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let mut encoded = BASE64_STANDARD.encode(bytes);
    encoded.retain(|c| c.is_ascii_alphanumeric());
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn credentials() -> Credentials {
        Credentials::new("ck", "cs", "tk", "ts").unwrap()
    }

    #[test]
    fn test_standing_parameters() {
        let params = Parameters::standing(&credentials(), "abc", 1_318_622_958);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "oauth_consumer_key",
                "oauth_nonce",
                "oauth_signature_method",
                "oauth_timestamp",
                "oauth_token",
                "oauth_version",
            ]
        );
        assert_eq!(params.get("oauth_timestamp"), Some("1318622958"));
        assert_eq!(params.get("oauth_signature_method"), Some("HMAC-SHA1"));
        assert_eq!(params.get("oauth_token"), Some("tk"));
    }

    #[test]
    fn test_standing_parameters_without_token() {
        let c = Credentials::consumer_only("ck", "cs").unwrap();
        let params = Parameters::standing(&c, "abc", 1);
        assert_eq!(params.len(), 5);
        assert!(!params.contains_key("oauth_token"));
    }

    #[test]
    fn test_fresh_parameters() {
        let before = Utc::now().timestamp();
        let a = Parameters::fresh(&credentials());
        let b = Parameters::fresh(&credentials());
        let after = Utc::now().timestamp();

        assert_eq!(a.len(), 6);
        assert_eq!(a.get("oauth_consumer_key"), Some("ck"));
        assert_ne!(a.get("oauth_nonce"), b.get("oauth_nonce"));
        let ts: i64 = a.get("oauth_timestamp").unwrap().parse().unwrap();
        assert!(before <= ts && ts <= after);
    }

    #[test]
    fn test_merge_with_explicit_wins() {
        let params = Parameters::standing(&credentials(), "abc", 1)
            .merge_with([("status", "hi"), ("oauth_nonce", "override")]);
        assert_eq!(params.get("status"), Some("hi"));
        assert_eq!(params.get("oauth_nonce"), Some("override"));
    }

    #[test]
    fn test_canonicalize_merges_query_string() {
        let explicit = Parameters::new().param("c", "3");
        let (endpoint, merged) =
            canonicalize("https://api.example.com/x.json?a=1&b=2", &explicit).unwrap();
        assert_eq!(endpoint, "https://api.example.com/x.json");
        assert_eq!(
            merged,
            Parameters::from_iter([("a", "1"), ("b", "2"), ("c", "3")])
        );
    }

    #[test]
    fn test_canonicalize_explicit_beats_query() {
        let explicit = Parameters::new().param("a", "explicit");
        let (_, merged) = canonicalize("https://api.example.com/x?a=query", &explicit).unwrap();
        assert_eq!(merged.get("a"), Some("explicit"));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_canonicalize_splits_at_first_question_mark() {
        let (endpoint, merged) =
            canonicalize("https://api.example.com/x?q=what?&n=1", &Parameters::new()).unwrap();
        assert_eq!(endpoint, "https://api.example.com/x");
        assert_eq!(merged.get("q"), Some("what?"));
        assert_eq!(merged.get("n"), Some("1"));
    }

    #[test]
    fn test_canonicalize_rejects_url_without_scheme() {
        let err = canonicalize("api.example.com/x?a=1", &Parameters::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        let err = canonicalize("mailto:someone@example.com", &Parameters::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_iteration_order_ignores_insertion_order() {
        let forward = Parameters::from_iter([("a", "1"), ("B", "2"), ("a_b", "3"), ("ab", "4")]);
        let reverse = Parameters::from_iter([("ab", "4"), ("a_b", "3"), ("B", "2"), ("a", "1")]);
        let keys: Vec<&str> = forward.iter().map(|(k, _)| k).collect();
        // byte-wise: 'B' (0x42) < 'a' (0x61), '_' (0x5F) < 'b' (0x62)
        assert_eq!(keys, vec!["B", "a", "a_b", "ab"]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_nonce_uniqueness_and_alphabet() {
        let nonces: HashSet<String> = (0..10_000).map(|_| nonce()).collect();
        assert_eq!(nonces.len(), 10_000);
        for n in &nonces {
            assert!(!n.is_empty());
            assert!(n.chars().all(|c| c.is_ascii_alphanumeric()), "bad nonce {n}");
        }
    }
}
