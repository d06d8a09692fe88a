//! Request builders and response decoders for the REST endpoints.
//!
//! Nothing here touches the network: each endpoint is a [`RestRequest`]
//! plus a decoder for its body, and [`crate::Twitter`] glues them to a
//! transport.

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{Ids, Privacy, TermsOfService};
use crate::request::RestRequest;
use crate::util;
use crate::v1::percent_encode;
use crate::v1::values::{OAUTH_PARAM_KEY_TOKEN, OAUTH_PARAM_KEY_TOKEN_SECRET};

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";
pub const DEFAULT_OAUTH_BASE: &str = "https://api.twitter.com/oauth";
pub const DEFAULT_SEARCH_BASE: &str = "https://search.twitter.com";

/// `users/lookup` accepts at most this many ids per call.
pub const MAX_LOOKUP_IDS: usize = 100;

/// Base URLs the endpoint paths are joined to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    oauth_base: String,
    search_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            api_base: DEFAULT_API_BASE.to_string(),
            oauth_base: DEFAULT_OAUTH_BASE.to_string(),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
        }
    }
}

impl Endpoints {
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = trim_base(base.into());
        self
    }

    pub fn with_oauth_base(mut self, base: impl Into<String>) -> Self {
        self.oauth_base = trim_base(base.into());
        self
    }

    pub fn with_search_base(mut self, base: impl Into<String>) -> Self {
        self.search_base = trim_base(base.into());
        self
    }

    fn api(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    pub fn user_timeline(&self, screen_name: &str) -> RestRequest {
        RestRequest::get(format!(
            "{}?screen_name={}",
            self.api("statuses/user_timeline.json"),
            percent_encode(screen_name)
        ))
    }

    pub fn update_status(&self, message: &str) -> RestRequest {
        RestRequest::post(self.api("statuses/update.json")).form([("status", message)])
    }

    pub fn follow(&self, screen_name: &str) -> RestRequest {
        RestRequest::post(self.api("friendships/create.json"))
            .form([("screen_name", screen_name)])
    }

    pub fn unfollow(&self, screen_name: &str) -> RestRequest {
        RestRequest::post(self.api("friendships/destroy.json"))
            .form([("screen_name", screen_name)])
    }

    pub fn retweet(&self, id: i64) -> RestRequest {
        RestRequest::post(self.api(&format!("statuses/retweet/{id}.json")))
    }

    pub fn destroy(&self, id: i64) -> RestRequest {
        RestRequest::post(self.api(&format!("statuses/destroy/{id}.json")))
    }

    /// Sent without a signature.
    pub fn search(&self, query: &str) -> RestRequest {
        RestRequest::get(format!(
            "{}/search.json?q={}",
            self.search_base,
            percent_encode(query)
        ))
    }

    pub fn privacy_policy(&self) -> RestRequest {
        RestRequest::get(self.api("help/privacy.json"))
    }

    pub fn terms_of_service(&self) -> RestRequest {
        RestRequest::get(self.api("help/tos.json"))
    }

    pub fn friend_ids(&self, screen_name: &str) -> RestRequest {
        RestRequest::get(format!(
            "{}?screen_name={}",
            self.api("friends/ids.json"),
            percent_encode(screen_name)
        ))
    }

    pub fn lookup_users_by_id(&self, ids: &[i64]) -> Result<RestRequest> {
        if ids.is_empty() {
            return Err(Error::request_invalid("users/lookup needs at least one id"));
        }
        if ids.len() > MAX_LOOKUP_IDS {
            return Err(Error::request_invalid(format!(
                "users/lookup takes at most {MAX_LOOKUP_IDS} ids, got {}",
                ids.len()
            )));
        }
        let ids = ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<String>>()
            .join(",");
        Ok(RestRequest::get(format!(
            "{}?include_entities=false&user_id={}",
            self.api("users/lookup.json"),
            percent_encode(&ids)
        )))
    }

    pub fn direct_messages(&self) -> RestRequest {
        RestRequest::get(self.api("direct_messages.json"))
    }

    pub fn send_direct_message(&self, screen_name: &str, text: &str) -> RestRequest {
        RestRequest::post(self.api("direct_messages/new.json"))
            .form([("screen_name", screen_name), ("text", text)])
    }

    pub fn destroy_direct_message(&self, id: i64) -> RestRequest {
        RestRequest::post(self.api(&format!("direct_messages/destroy/{id}.json")))
    }

    /// Signed with consumer-only credentials.
    pub fn request_token(&self) -> RestRequest {
        RestRequest::post(format!("{}/request_token", self.oauth_base))
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

/// Decodes a JSON body into `T`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

pub fn decode_privacy_policy(body: &str) -> Result<String> {
    decode::<Privacy>(body).map(|p| p.privacy.unwrap_or_default())
}

pub fn decode_terms_of_service(body: &str) -> Result<String> {
    decode::<TermsOfService>(body).map(|t| t.tos.unwrap_or_default())
}

pub fn decode_friend_ids(body: &str) -> Result<Vec<i64>> {
    decode::<Ids>(body).map(|i| i.ids)
}

/// Decodes the form-encoded `request_token` reply into `(token, secret)`.
pub fn decode_request_token(body: &str) -> Result<(String, String)> {
    if body.starts_with("Failed") {
        return Err(Error::api(body.trim().to_string()));
    }
    let map = util::query_to_map(body.trim());
    match (
        map.get(OAUTH_PARAM_KEY_TOKEN),
        map.get(OAUTH_PARAM_KEY_TOKEN_SECRET),
    ) {
        (Some(token), Some(secret)) if !token.is_empty() && !secret.is_empty() => {
            Ok((token.to_string(), secret.to_string()))
        }
        _ => Err(Error::api(format!(
            "request_token reply carries no token pair: {body}"
        ))),
    }
}
