pub const OAUTH_VALUE_VERSION: &str = "1.0";
pub const OAUTH_VALUE_SIGMETHOD_HMACSHA1: &str = "HMAC-SHA1";

pub const OAUTH_HEADER_PREFIX: &str = "OAuth ";
/// Only parameters with this prefix travel in the `Authorization` header.
pub const OAUTH_PARAM_PREFIX: &str = "oauth_";

pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_PARAM_KEY_TOKEN: &str = "oauth_token";
pub const OAUTH_PARAM_KEY_TOKEN_SECRET: &str = "oauth_token_secret";
pub const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";

/// Raw bytes drawn for every nonce before base64 encoding.
pub const NONCE_BYTES: usize = 32;
