use log::{debug, trace};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;

use crate::endpoints::{self, Endpoints};
use crate::error::{Error, Result};
use crate::models::{ApiErrors, DirectMessage, SearchResult, Tweet, User};
use crate::request::RestRequest;
use crate::v1::{Credentials, Signer};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Async REST client: signs every call with its own credential set.
#[derive(Clone, Debug)]
pub struct Twitter {
    credentials: Credentials,
    endpoints: Endpoints,
    http: reqwest::Client,
}

impl Twitter {
    pub fn new(credentials: Credentials) -> Self {
        Twitter {
            credentials,
            endpoints: Endpoints::default(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Signs `request` with the full credential set, sends it, and returns
    /// the response body.
    pub async fn send(&self, request: &RestRequest) -> Result<String> {
        if !self.credentials.has_token() {
            return Err(Error::credential_invalid(format!(
                "{} {} needs an access token",
                request.method(),
                request.url()
            )));
        }
        self.send_signed(&self.credentials, request).await
    }

    async fn send_signed(&self, credentials: &Credentials, request: &RestRequest) -> Result<String> {
        let signed = Signer::new(credentials).sign(request)?;
        self.execute(request, Some(signed.header)).await
    }

    async fn execute(&self, request: &RestRequest, authorization: Option<String>) -> Result<String> {
        let method = Method::from_bytes(request.method().as_bytes()).map_err(|e| {
            Error::request_invalid(format!("bad http method {}", request.method())).with_source(e)
        })?;
        debug!("{} {}", method, request.url());

        let mut builder = self.http.request(method.clone(), request.url());
        if let Some(header) = authorization {
            builder = builder.header(AUTHORIZATION, header);
        }
        if method == Method::POST {
            builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        }
        if let Some(body) = request.body_str() {
            debug!("body: {body}");
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        trace!("response {status}: {body}");

        if let Some(errors) = ApiErrors::from_body(&body) {
            return Err(Error::api(format!("{status}: {}", errors.message())));
        }
        if !status.is_success() {
            return Err(Error::api(format!("{status}: {}", body.trim())));
        }
        Ok(body)
    }

    pub async fn get_user_timeline(&self, screen_name: &str) -> Result<Vec<Tweet>> {
        let body = self.send(&self.endpoints.user_timeline(screen_name)).await?;
        endpoints::decode(&body)
    }

    /// Posts a status update.
    pub async fn tweet(&self, message: &str) -> Result<Tweet> {
        let body = self.send(&self.endpoints.update_status(message)).await?;
        endpoints::decode(&body)
    }

    pub async fn follow(&self, screen_name: &str) -> Result<User> {
        let body = self.send(&self.endpoints.follow(screen_name)).await?;
        endpoints::decode(&body)
    }

    pub async fn unfollow(&self, screen_name: &str) -> Result<User> {
        let body = self.send(&self.endpoints.unfollow(screen_name)).await?;
        endpoints::decode(&body)
    }

    pub async fn retweet(&self, id: i64) -> Result<Tweet> {
        let body = self.send(&self.endpoints.retweet(id)).await?;
        endpoints::decode(&body)
    }

    pub async fn destroy(&self, id: i64) -> Result<Tweet> {
        let body = self.send(&self.endpoints.destroy(id)).await?;
        endpoints::decode(&body)
    }

    /// Unauthenticated search.
    pub async fn search(&self, query: &str) -> Result<Vec<Tweet>> {
        let body = self.execute(&self.endpoints.search(query), None).await?;
        endpoints::decode::<SearchResult>(&body).map(|r| r.results)
    }

    pub async fn get_privacy_policy(&self) -> Result<String> {
        let body = self.send(&self.endpoints.privacy_policy()).await?;
        endpoints::decode_privacy_policy(&body)
    }

    pub async fn get_tos(&self) -> Result<String> {
        let body = self.send(&self.endpoints.terms_of_service()).await?;
        endpoints::decode_terms_of_service(&body)
    }

    pub async fn get_user_friends(&self, screen_name: &str) -> Result<Vec<i64>> {
        let body = self.send(&self.endpoints.friend_ids(screen_name)).await?;
        endpoints::decode_friend_ids(&body)
    }

    pub async fn lookup_users_by_id(&self, ids: &[i64]) -> Result<Vec<User>> {
        let body = self.send(&self.endpoints.lookup_users_by_id(ids)?).await?;
        endpoints::decode(&body)
    }

    pub async fn get_direct_messages(&self) -> Result<Vec<DirectMessage>> {
        let body = self.send(&self.endpoints.direct_messages()).await?;
        endpoints::decode(&body)
    }

    pub async fn send_direct_message(&self, screen_name: &str, text: &str) -> Result<DirectMessage> {
        let body = self
            .send(&self.endpoints.send_direct_message(screen_name, text))
            .await?;
        endpoints::decode(&body)
    }

    pub async fn delete_direct_message(&self, id: i64) -> Result<DirectMessage> {
        let body = self.send(&self.endpoints.destroy_direct_message(id)).await?;
        endpoints::decode(&body)
    }

    /// Obtains a request token with the consumer key pair alone and returns
    /// credentials carrying it.
    pub async fn request_token(&self) -> Result<Credentials> {
        let consumer = Credentials::consumer_only(
            self.credentials.consumer_key(),
            self.credentials.consumer_secret(),
        )?;
        let body = self
            .send_signed(&consumer, &self.endpoints.request_token())
            .await?;
        let (token, secret) = endpoints::decode_request_token(&body)?;
        consumer.with_token(token, secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_send_without_token_fails_locally() {
        let creds = Credentials::consumer_only("ck", "cs").unwrap();
        let client = Twitter::new(creds)
            .with_endpoints(Endpoints::default().with_api_base("http://127.0.0.1:9/1.1"));
        let err = client.get_direct_messages().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_malformed_url_fails_before_transport() {
        let creds = Credentials::new("ck", "cs", "t", "ts").unwrap();
        let client = Twitter::new(creds)
            .with_endpoints(Endpoints::default().with_api_base("no-scheme/1.1"));
        let err = client.get_tos().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_too_many_ids_fails_before_transport() {
        let creds = Credentials::new("ck", "cs", "t", "ts").unwrap();
        let ids: Vec<i64> = (0..101).collect();
        let err = Twitter::new(creds).lookup_users_by_id(&ids).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
