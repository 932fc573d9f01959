//! Blocking and async dispatch of request descriptors.
//!
//! # Design
//! `dispatch` and `dispatch_async` differ only in how they wait for the
//! transport; both hand the raw response to `classify`. The client types
//! below expose one method per operation, generated from a single list so
//! the two surfaces cannot drift apart.

use tracing::{debug, instrument, Span};

use crate::client::OneSignalClient;
use crate::config::{ClientOptions, Identity};
use crate::error::Error;
use crate::http::HttpRequest;
use crate::response::{classify, OneSignalResponse};
use crate::transport::{AsyncTransport, ReqwestTransport, Transport, UreqTransport};
use crate::JsonMap;

/// Send `request` and wait for the classified result.
#[instrument(
    name = "onesignal_request",
    skip_all,
    fields(
        http.method = %request.method,
        http.url = %request.url,
        http.status_code = tracing::field::Empty,
    )
)]
pub fn dispatch<T>(transport: &T, request: &HttpRequest) -> Result<OneSignalResponse, Error>
where
    T: Transport + ?Sized,
{
    debug!("sending request");
    let response = transport.send(request)?;
    Span::current().record("http.status_code", response.status);
    classify(response)
}

/// Send `request` and await the classified result.
#[instrument(
    name = "onesignal_request",
    skip_all,
    fields(
        http.method = %request.method,
        http.url = %request.url,
        http.status_code = tracing::field::Empty,
    )
)]
pub async fn dispatch_async<T>(transport: &T, request: &HttpRequest) -> Result<OneSignalResponse, Error>
where
    T: AsyncTransport + Sync,
{
    debug!("sending request");
    let response = transport.send(request).await?;
    Span::current().record("http.status_code", response.status);
    classify(response)
}

/// Expand `$mac` with the full operation list.
macro_rules! with_operations {
    ($mac:ident) => {
        $mac! {
            /// Send a notification. `app_id` is added to a copy of `body`.
            send_notification => build_send_notification(body: &JsonMap);
            /// Stop a scheduled or currently outgoing notification.
            cancel_notification => build_cancel_notification(notification_id: &str);
            /// View the details of a single notification.
            view_notification => build_view_notification(notification_id: &str);
            /// View multiple notifications; `query` entries override `app_id`.
            view_notifications => build_view_notifications(query: Option<&JsonMap>);
            /// View the devices a notification was sent to.
            notification_history => build_notification_history(notification_id: &str, body: &JsonMap);
            /// View the devices of the app; `query` takes limit and offset.
            view_devices => build_view_devices(query: Option<&JsonMap>);
            /// View a single device.
            view_device => build_view_device(device_id: &str);
            /// Register a new device.
            add_device => build_add_device(body: &JsonMap);
            /// Update an existing device.
            edit_device => build_edit_device(device_id: &str, body: &JsonMap);
            /// Update the tags of a device by external user id.
            edit_tags => build_edit_tags(external_user_id: &str, body: &JsonMap);
            /// Update a device's session information.
            new_session => build_new_session(device_id: &str, body: &JsonMap);
            /// Record a purchase for a device.
            new_purchase => build_new_purchase(device_id: &str, body: &JsonMap);
            /// Request a CSV export of the app's devices.
            csv_export => build_csv_export(body: &JsonMap);
            /// Create a segment.
            create_segment => build_create_segment(body: &JsonMap);
            /// Delete a segment.
            delete_segment => build_delete_segment(segment_id: &str);
            /// View outcome data for the given outcome names.
            view_outcomes => build_view_outcomes(outcome_names: &[&str], extra_params: Option<&JsonMap>);
            /// View all apps of the account. Needs `user_auth_key`.
            view_apps => build_view_apps();
            /// View a single app. Needs `user_auth_key`.
            view_app => build_view_app(app_id: &str);
            /// Create an app. Needs `user_auth_key`.
            create_app => build_create_app(body: &JsonMap);
            /// Update an app. Needs `user_auth_key`.
            update_app => build_update_app(app_id: &str, body: &JsonMap);
        }
    };
}

macro_rules! blocking_operations {
    ($($(#[$doc:meta])* $name:ident => $build:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, $($arg: $ty),*) -> Result<OneSignalResponse, Error> {
                let request = self.requests.$build($($arg),*)?;
                dispatch(&self.transport, &request)
            }
        )*
    };
}

macro_rules! async_operations {
    ($($(#[$doc:meta])* $name:ident => $build:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            $(#[$doc])*
            pub async fn $name(&self, $($arg: $ty),*) -> Result<OneSignalResponse, Error> {
                let request = self.requests.$build($($arg),*)?;
                dispatch_async(&self.transport, &request).await
            }
        )*
    };
}

/// OneSignal client that blocks the calling thread for each request.
#[derive(Clone)]
pub struct BlockingClient<T = UreqTransport> {
    requests: OneSignalClient,
    transport: T,
}

impl BlockingClient<UreqTransport> {
    pub fn new(identity: Identity) -> Self {
        Self::with_transport(OneSignalClient::new(identity), UreqTransport::new())
    }
}

impl<T: Transport> BlockingClient<T> {
    pub fn with_transport(requests: OneSignalClient, transport: T) -> Self {
        Self { requests, transport }
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.requests = self.requests.with_options(options);
        self
    }

    /// The request builder behind this client.
    pub fn requests(&self) -> &OneSignalClient {
        &self.requests
    }

    with_operations!(blocking_operations);
}

/// OneSignal client that awaits each request.
#[derive(Debug, Clone)]
pub struct AsyncClient<T = ReqwestTransport> {
    requests: OneSignalClient,
    transport: T,
}

impl AsyncClient<ReqwestTransport> {
    pub fn new(identity: Identity) -> Self {
        Self::with_transport(OneSignalClient::new(identity), ReqwestTransport::new())
    }
}

impl<T: AsyncTransport + Sync> AsyncClient<T> {
    pub fn with_transport(requests: OneSignalClient, transport: T) -> Self {
        Self { requests, transport }
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.requests = self.requests.with_options(options);
        self
    }

    /// The request builder behind this client.
    pub fn requests(&self) -> &OneSignalClient {
        &self.requests
    }

    with_operations!(async_operations);
}
