//! A Twitter REST API client built around an OAuth 1.0a (HMAC-SHA1) request
//! signer.
//!
//! The signer in [`v1`] is usable on its own:
//!
//! ```
//! use twitter_oauthsign::v1::{Credentials, Signer};
//! use twitter_oauthsign::RestRequest;
//!
//! let credentials = Credentials::new("consumer-key", "consumer-secret", "token", "token-secret")?;
//! let request = RestRequest::post("https://api.twitter.com/1.1/statuses/update.json")
//!     .form([("status", "hello")]);
//! let signed = Signer::new(&credentials).sign(&request)?;
//! assert!(signed.header.starts_with("OAuth oauth_consumer_key=\"consumer-key\""));
//! # Ok::<(), twitter_oauthsign::Error>(())
//! ```

pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod v1;

#[cfg(feature = "reqwest")]
mod client;
mod request;
mod util;

#[cfg(feature = "reqwest")]
pub use client::Twitter;
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use request::RestRequest;
