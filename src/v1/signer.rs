use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::debug;
use sha1::Sha1;

use super::values::*;
use super::{canonicalize, nonce, percent_encode, Credentials, Parameters};
use crate::error::{Error, Result};
use crate::request::RestRequest;

type HmacSha1 = Hmac<Sha1>;

/// A request signed with OAuth 1.0a.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedContent {
    /// base64 HMAC-SHA1 signature (not percent-encoded).
    pub signature: String,
    /// Value for the `Authorization` header.
    pub header: String,
    pub base_string: String,
    /// The merged parameter set, `oauth_signature` included.
    pub parameters: Parameters,
}

/// Signs requests on behalf of one credential set.
///
/// Nonce and timestamp are drawn fresh per call unless pinned with
/// [`Signer::nonce`] and [`Signer::timestamp`].
#[derive(Clone, Debug)]
pub struct Signer<'a> {
    credentials: &'a Credentials,
    nonce: Option<String>,
    timestamp: Option<i64>,
}

impl<'a> Signer<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Signer {
            credentials,
            nonce: None,
            timestamp: None,
        }
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Signs `request`: standing parameters, then the request's own
    /// parameters on top, then the URL's query string underneath both.
    pub fn sign(&self, request: &RestRequest) -> Result<SignedContent> {
        let standing = Parameters::standing(
            self.credentials,
            self.nonce.clone().unwrap_or_else(nonce),
            self.timestamp.unwrap_or_else(|| Utc::now().timestamp()),
        );
        let params = standing.merge_with(request.params());
        sign_parameters(
            self.credentials,
            request.method(),
            request.url(),
            &params,
            request.body_str(),
        )
    }
}

/// Computes the `Authorization` header for a request.
///
/// The standing protocol parameters are drawn fresh (see
/// [`Parameters::fresh`]) and `explicit_params` is layered over them, so a
/// map holding only request parameters signs correctly. An explicit
/// `oauth_nonce` or `oauth_timestamp` pins that value. An explicit
/// `oauth_consumer_key`, `oauth_token` or `oauth_signature_method` must
/// agree with `credentials`, and `oauth_signature` may not be supplied.
pub fn compute_authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    explicit_params: &Parameters,
    body: Option<&str>,
) -> Result<String> {
    let params = Parameters::fresh(credentials).merge_with(explicit_params);
    sign_parameters(credentials, method, url, &params, body).map(|signed| signed.header)
}

/// base64(HMAC-SHA1(`consumer_secret&token_secret`, `base_string`)).
pub fn compute_signature(credentials: &Credentials, base_string: &str) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(credentials.signing_key().as_bytes())
        .map_err(|_| Error::unexpected("hmac-sha1 rejected the signing key"))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Builds the signature base string for a request.
pub fn signature_base(
    method: &str,
    url: &str,
    params: &Parameters,
    body: Option<&str>,
) -> Result<String> {
    let (endpoint, merged) = canonicalize(url, params)?;
    Ok(base_string(method, &endpoint, &merged, body))
}

/// Formats the `oauth_`-prefixed parameters as an `Authorization` header.
pub fn authorization_header(params: &Parameters) -> String {
    let fields = params
        .iter()
        .filter(|(k, _)| k.starts_with(OAUTH_PARAM_PREFIX))
        .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
        .collect::<Vec<String>>()
        .join(", ");
    format!("{OAUTH_HEADER_PREFIX}{fields}")
}

fn sign_parameters(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &Parameters,
    body: Option<&str>,
) -> Result<SignedContent> {
    let (endpoint, mut merged) = canonicalize(url, params)?;
    check_protocol_parameters(credentials, &merged)?;
    let base_string = base_string(method, &endpoint, &merged, body);
    debug!("signature base: {base_string}");

    let signature = compute_signature(credentials, &base_string)?;
    merged.insert(OAUTH_PARAM_KEY_SIGNATURE, signature.as_str());
    let header = authorization_header(&merged);
    debug!("authorization header: {header}");

    Ok(SignedContent {
        signature,
        header,
        base_string,
        parameters: merged,
    })
}

// The identifying protocol parameters must describe `credentials`.
fn check_protocol_parameters(credentials: &Credentials, params: &Parameters) -> Result<()> {
    let require = |key: &str, want: Option<&str>| {
        if params.get(key) == want {
            Ok(())
        } else {
            Err(Error::request_invalid(format!(
                "{key} is {:?} but the credentials require {:?}",
                params.get(key),
                want
            )))
        }
    };
    require(OAUTH_PARAM_KEY_CONSUMER_KEY, Some(credentials.consumer_key()))?;
    require(OAUTH_PARAM_KEY_TOKEN, credentials.token())?;
    require(
        OAUTH_PARAM_KEY_SIGNATURE_METHOD,
        Some(OAUTH_VALUE_SIGMETHOD_HMACSHA1),
    )?;
    require(OAUTH_PARAM_KEY_VERSION, Some(OAUTH_VALUE_VERSION))?;
    for key in [OAUTH_PARAM_KEY_NONCE, OAUTH_PARAM_KEY_TIMESTAMP] {
        if params.get(key).map_or(true, str::is_empty) {
            return Err(Error::request_invalid(format!("{key} is missing")));
        }
    }
    if params.contains_key(OAUTH_PARAM_KEY_SIGNATURE) {
        return Err(Error::request_invalid(format!(
            "{OAUTH_PARAM_KEY_SIGNATURE} is computed, not supplied"
        )));
    }
    Ok(())
}

// METHOD&encode(endpoint)&encode(k1=v1&k2=v2[&body])
//
// Keys and values go in as given and each `key=value` pair is encoded as one
// unit together with its separator. The base string never ends in a
// separator.
fn base_string(method: &str, endpoint: &str, params: &Parameters, body: Option<&str>) -> String {
    let mut tail = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<String>>()
        .join("&");
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        if !tail.is_empty() {
            tail.push('&');
        }
        tail.push_str(body);
    }

    let mut base = format!(
        "{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(endpoint)
    );
    if !tail.is_empty() {
        base.push('&');
        base.push_str(&percent_encode(&tail));
    }
    base
}
