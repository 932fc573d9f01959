//! HTTP request descriptors and raw responses as plain data.
//!
//! # Design
//! `HttpRequest` is built by `OneSignalClient::build_*` and consumed by a
//! transport. It keeps the credential as a bare `token`; the
//! `Authorization` header is derived on demand so a descriptor never
//! carries a half-built header. `HttpResponse` is what a transport hands
//! back before any interpretation of the status code.

use std::fmt;

use serde_json::Value;

use crate::config::redacted;
use crate::JsonMap;

pub const AUTHORIZATION: &str = "Authorization";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully resolved request, ready to hand to a transport.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub token: Option<String>,
    pub query: Option<JsonMap>,
    pub body: Option<JsonMap>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            token: None,
            query: None,
            body: None,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_query(mut self, query: JsonMap) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_body(mut self, body: JsonMap) -> Self {
        self.body = Some(body);
        self
    }

    /// Headers to send. The token goes into the Basic scheme slot verbatim,
    /// without base64 encoding; the service expects the raw key there.
    pub fn headers(&self) -> Vec<(String, String)> {
        match &self.token {
            Some(token) => vec![(AUTHORIZATION.to_string(), format!("Basic {token}"))],
            None => Vec::new(),
        }
    }

    /// Query parameters flattened to strings in the order they are stored.
    ///
    /// Arrays repeat the key once per element; `null` becomes an empty value.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(query) = &self.query else {
            return Vec::new();
        };
        let mut pairs = Vec::with_capacity(query.len());
        for (key, value) in query {
            match value {
                Value::Array(items) => {
                    pairs.extend(items.iter().map(|item| (key.clone(), query_value(item))));
                }
                other => pairs.push((key.clone(), query_value(other))),
            }
        }
        pairs
    }

    /// JSON-encoded body, if the request has one.
    pub fn body_bytes(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        self.body.as_ref().map(serde_json::to_vec).transpose()
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("token", &self.token.as_deref().map(redacted))
            .field("query", &self.query)
            .field("body", &self.body)
            .finish()
    }
}

/// A response as received by a transport, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Value of the first header called `name`, ignoring ASCII case.
    ///
    /// A redirect's target, for example, is `header("location")`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
