//! Response shapes of the REST API.
//!
//! Fields whose absence means something are `Option`s. Every other field
//! falls back to its default when it is missing or `null`, so bodies are
//! decoded as-is.

use serde::{Deserialize, Deserializer};

// `null` decodes to the field's default instead of failing the whole body.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tweet {
    pub contributors: Option<Vec<Contributor>>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub entities: Entities,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub id_str: String,
    pub in_reply_to_screen_name: Option<String>,
    pub in_reply_to_status_id: Option<i64>,
    pub in_reply_to_user_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub retweet_count: i64,
    pub possibly_sensitive: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub retweeted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub truncated: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub user: User,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Contributor {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub id_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub screen_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Entities {
    #[serde(deserialize_with = "null_as_default")]
    pub hashtags: Vec<HashTag>,
    pub media: Option<Vec<Media>>,
    #[serde(deserialize_with = "null_as_default")]
    pub urls: Vec<Url>,
    #[serde(deserialize_with = "null_as_default")]
    pub user_mentions: Vec<UserMention>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HashTag {
    #[serde(deserialize_with = "null_as_default")]
    pub indices: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Media {
    #[serde(deserialize_with = "null_as_default")]
    pub display_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expanded_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub id_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub indices: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub media_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub media_url_https: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Url {
    pub display_url: Option<String>,
    pub expanded_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub indices: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserMention {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub id_str: String,
    #[serde(deserialize_with = "null_as_default")]
    pub indices: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub screen_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub screen_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub followers_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub friends_count: i64,
    pub lang: Option<String>,
    pub location: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<Tweet>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateLimitStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub remaining_hits: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub reset_time: String,
    #[serde(rename = "reset_time_in_seconds")]
    #[serde(deserialize_with = "null_as_default")]
    pub reset_time_seconds: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hourly_limit: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Totals {
    #[serde(deserialize_with = "null_as_default")]
    pub friends: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub updates: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub followers: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub favorites: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectMessage {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sender_screen_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sender: User,
    #[serde(deserialize_with = "null_as_default")]
    pub sender_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipient_screen_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recipient: User,
    #[serde(deserialize_with = "null_as_default")]
    pub recipient_id: i64,
}

/// `GET help/privacy`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Privacy {
    pub privacy: Option<String>,
}

/// `GET help/tos`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TermsOfService {
    pub tos: Option<String>,
}

/// `GET friends/ids`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Ids {
    #[serde(deserialize_with = "null_as_default")]
    pub ids: Vec<i64>,
}

/// An error payload: `{"errors": [{"code": .., "message": ..}]}`, or the
/// older `{"errors": "..."}` / `{"error": "..."}` forms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiErrors {
    pub errors: Option<ErrorList>,
    pub error: Option<String>,
    pub request: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorList {
    Detailed(Vec<ApiError>),
    Message(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiError {
    #[serde(deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

impl ApiErrors {
    /// Parses `body` as an error payload, if it is one.
    pub fn from_body(body: &str) -> Option<ApiErrors> {
        let parsed: ApiErrors = serde_json::from_str(body).ok()?;
        (parsed.errors.is_some() || parsed.error.is_some()).then_some(parsed)
    }

    pub fn message(&self) -> String {
        let mut parts = Vec::new();
        match &self.errors {
            Some(ErrorList::Detailed(list)) => {
                parts.extend(list.iter().map(|e| format!("{} (code {})", e.message, e.code)))
            }
            Some(ErrorList::Message(m)) => parts.push(m.clone()),
            None => {}
        }
        if let Some(e) = &self.error {
            parts.push(e.clone());
        }
        if let Some(r) = &self.request {
            parts.push(format!("request {r}"));
        }
        parts.join("; ")
    }
}
