use crate::v1::{percent_encode, Parameters};

/// Describes one outgoing call: method, URL (which may carry a query
/// string), explicit parameters, and an optional form body that is already
/// percent-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestRequest {
    method: String,
    url: String,
    params: Parameters,
    body: Option<String>,
}

impl RestRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        RestRequest {
            method: method.into().to_ascii_uppercase(),
            url: url.into(),
            params: Parameters::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    /// Adds an explicit parameter that is signed but not sent on the wire.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Sets an already percent-encoded body. An empty body means no body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    /// Sets the body to `k1=v1&k2=v2` with every key and value
    /// percent-encoded.
    pub fn form<'a, I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let body = fields
            .into_iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<String>>()
            .join("&");
        self.body(body)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn body_str(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body_is_encoded() {
        let req = RestRequest::post("https://api.example.com/dm.json")
            .form([("screen_name", "bob"), ("text", "hi there + *")]);
        assert_eq!(req.method(), "POST");
        assert_eq!(
            req.body_str(),
            Some("screen_name=bob&text=hi%20there%20%2B%20%2A")
        );
    }

    #[test]
    fn test_empty_body_is_none() {
        let req = RestRequest::new("post", "https://api.example.com/").body("");
        assert_eq!(req.method(), "POST");
        assert_eq!(req.body_str(), None);
    }
}
