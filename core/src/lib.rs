//! Client core for the OneSignal push-notification REST API.
//!
//! # Overview
//! Every operation is split in two halves. `OneSignalClient::build_*`
//! produces an `HttpRequest` descriptor without touching the network, and
//! `classify` turns the raw `HttpResponse` into a `OneSignalResponse` or a
//! typed `HttpError`. `BlockingClient` and `AsyncClient` glue the two halves
//! to a transport so callers get one method per API operation.
//!
//! # Design
//! - `OneSignalClient` holds only the read-only `Identity` and
//!   `ClientOptions`; it can be shared freely between threads and tasks.
//! - Request bodies are copied before `app_id` is injected, so a caller's
//!   map is never mutated.
//! - Transport failures (connection errors, malformed success bodies) are
//!   propagated as-is; only received HTTP responses are classified.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod notification;
pub mod paths;
pub mod request;
pub mod response;
pub mod transport;

/// JSON object used for request bodies and query parameters.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

pub use client::OneSignalClient;
pub use config::{ClientOptions, Identity, DEFAULT_API_ROOT};
pub use dispatch::{dispatch, dispatch_async, AsyncClient, BlockingClient};
pub use error::Error;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notification::Notification;
pub use response::{classify, HttpError, OneSignalResponse};
pub use transport::{AsyncTransport, ReqwestTransport, Transport, UreqTransport};
