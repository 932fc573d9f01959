//! Transports that execute an `HttpRequest` and return the raw `HttpResponse`.
//!
//! # Design
//! Transports never interpret the status code: a 404 comes back as data
//! and is classified later. Anything that prevents a response from being
//! received is returned as the underlying crate's error.
//!
//! Redirects are not followed either. A 3xx is returned to the caller
//! like any other status, so it classifies as an `HttpError`.
//!
//! `UreqTransport` keeps one agent for its lifetime. `ReqwestTransport`
//! creates a client inside each call and drops it when the call returns,
//! on every path.

use std::future::Future;

use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Blocking transport. The calling thread waits for the round-trip.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Non-blocking transport. Yields at the network boundary only.
pub trait AsyncTransport {
    fn send(&self, request: &HttpRequest) -> impl Future<Output = Result<HttpResponse, Error>> + Send;
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-configured agent.
    ///
    /// The agent must have `http_status_as_error(false)` and `max_redirects(0)`,
    /// otherwise error statuses surface as transport errors and redirects are
    /// followed instead of being classified.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in request.headers() {
        builder = builder.header(name, value);
    }
    for (key, value) in request.query_pairs() {
        builder = builder.query(key, value);
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = request.url.as_str();
        let body = request.body_bytes()?;

        let mut response = match (request.method, body) {
            (HttpMethod::Get, _) => decorate(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => decorate(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => decorate(self.agent.post(url), request)
                .content_type(JSON_CONTENT_TYPE)
                .send(body.as_slice()),
            (HttpMethod::Post, None) => decorate(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => decorate(self.agent.put(url), request)
                .content_type(JSON_CONTENT_TYPE)
                .send(body.as_slice()),
            (HttpMethod::Put, None) => decorate(self.agent.put(url), request).send_empty(),
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Async transport backed by `reqwest`, with a fresh client per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }
}

impl AsyncTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let mut builder = client.request(request.method.into(), request.url.as_str());
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        let query = request.query_pairs();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse { status, headers, body })
    }
}
