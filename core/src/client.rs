//! Request builders for every OneSignal API operation.
//!
//! # Design
//! `OneSignalClient` holds only the identity and options and carries no
//! mutable state between calls. Each operation is a `build_*` method that
//! checks the credentials it needs, then produces an `HttpRequest`. The
//! caller (or `BlockingClient` / `AsyncClient`) executes the round-trip and
//! passes the raw response to `classify`.
//!
//! App-scoped operations authenticate with the REST API key; app
//! management (`/apps`) authenticates with the user auth key.

use crate::config::{ClientOptions, Identity};
use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest};
use crate::paths;
use crate::request::{inject_fields, merge_query, resolve_path, single};
use crate::JsonMap;

/// Stateless request builder for the OneSignal REST API.
#[derive(Debug, Clone)]
pub struct OneSignalClient {
    identity: Identity,
    options: ClientOptions,
}

/// Credentials of an app-scoped operation.
struct AppScope<'a> {
    app_id: &'a str,
    rest_api_key: &'a str,
}

impl OneSignalClient {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            options: ClientOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn app_scope(&self) -> Result<AppScope<'_>, Error> {
        let app_id = require("app_id", &self.identity.app_id)?;
        let rest_api_key = require("rest_api_key", &self.identity.rest_api_key)?;
        Ok(AppScope { app_id, rest_api_key })
    }

    fn user_auth_key(&self) -> Result<&str, Error> {
        require("user_auth_key", &self.identity.user_auth_key)
    }

    fn url(&self, template: &str, params: &[(&str, &str)]) -> Result<String, Error> {
        resolve_path(self.options.api_root(), template, params)
    }

    // -- notifications ------------------------------------------------------

    /// `POST /notifications` with `app_id` added to a copy of `body`.
    pub fn build_send_notification(&self, body: &JsonMap) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(HttpMethod::Post, self.url(paths::NOTIFICATIONS, &[])?)
            .with_token(scope.rest_api_key)
            .with_body(inject_fields(body, &[("app_id", scope.app_id)])))
    }

    /// `DELETE /notifications/{id}?app_id=..`
    pub fn build_cancel_notification(&self, notification_id: &str) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(
            HttpMethod::Delete,
            self.url(paths::NOTIFICATION, &[("id", notification_id)])?,
        )
        .with_token(scope.rest_api_key)
        .with_query(single("app_id", scope.app_id)))
    }

    /// `GET /notifications/{id}?app_id=..`
    pub fn build_view_notification(&self, notification_id: &str) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(
            HttpMethod::Get,
            self.url(paths::NOTIFICATION, &[("id", notification_id)])?,
        )
        .with_token(scope.rest_api_key)
        .with_query(single("app_id", scope.app_id)))
    }

    /// `GET /notifications`. Entries in `query` override the `app_id` default.
    pub fn build_view_notifications(&self, query: Option<&JsonMap>) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(HttpMethod::Get, self.url(paths::NOTIFICATIONS, &[])?)
            .with_token(scope.rest_api_key)
            .with_query(merge_query(single("app_id", scope.app_id), query)))
    }

    /// `POST /notifications/{id}/history`
    pub fn build_notification_history(
        &self,
        notification_id: &str,
        body: &JsonMap,
    ) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(
            HttpMethod::Post,
            self.url(paths::NOTIFICATION_HISTORY, &[("id", notification_id)])?,
        )
        .with_token(scope.rest_api_key)
        .with_body(inject_fields(body, &[("app_id", scope.app_id)])))
    }

    // -- devices ------------------------------------------------------------

    /// `GET /players`. Entries in `query` (limit, offset) override the `app_id` default.
    pub fn build_view_devices(&self, query: Option<&JsonMap>) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(HttpMethod::Get, self.url(paths::DEVICES, &[])?)
            .with_token(scope.rest_api_key)
            .with_query(merge_query(single("app_id", scope.app_id), query)))
    }

    pub fn build_view_device(&self, device_id: &str) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(
            HttpRequest::new(HttpMethod::Get, self.url(paths::DEVICE, &[("id", device_id)])?)
                .with_token(scope.rest_api_key)
                .with_query(single("app_id", scope.app_id)),
        )
    }

    pub fn build_add_device(&self, body: &JsonMap) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(HttpMethod::Post, self.url(paths::DEVICES, &[])?)
            .with_token(scope.rest_api_key)
            .with_body(inject_fields(body, &[("app_id", scope.app_id)])))
    }

    pub fn build_edit_device(&self, device_id: &str, body: &JsonMap) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(
            HttpRequest::new(HttpMethod::Put, self.url(paths::DEVICE, &[("id", device_id)])?)
                .with_token(scope.rest_api_key)
                .with_body(inject_fields(body, &[("app_id", scope.app_id)])),
        )
    }

    /// `PUT /apps/{app_id}/users/{user_id}`. The body is sent unchanged.
    pub fn build_edit_tags(&self, external_user_id: &str, body: &JsonMap) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        let url = self.url(
            paths::EDIT_TAGS,
            &[("app_id", scope.app_id), ("user_id", external_user_id)],
        )?;
        Ok(HttpRequest::new(HttpMethod::Put, url)
            .with_token(scope.rest_api_key)
            .with_body(body.clone()))
    }

    pub fn build_new_session(&self, device_id: &str, body: &JsonMap) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(
            HttpMethod::Post,
            self.url(paths::NEW_SESSION, &[("id", device_id)])?,
        )
        .with_token(scope.rest_api_key)
        .with_body(inject_fields(body, &[("app_id", scope.app_id)])))
    }

    pub fn build_new_purchase(&self, device_id: &str, body: &JsonMap) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(
            HttpMethod::Post,
            self.url(paths::NEW_PURCHASE, &[("id", device_id)])?,
        )
        .with_token(scope.rest_api_key)
        .with_body(inject_fields(body, &[("app_id", scope.app_id)])))
    }

    /// `POST /players/csv_export?app_id=..`. The body is sent unchanged.
    pub fn build_csv_export(&self, body: &JsonMap) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(HttpMethod::Post, self.url(paths::CSV_EXPORT, &[])?)
            .with_token(scope.rest_api_key)
            .with_query(single("app_id", scope.app_id))
            .with_body(body.clone()))
    }

    // -- segments & outcomes ------------------------------------------------

    pub fn build_create_segment(&self, body: &JsonMap) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        Ok(HttpRequest::new(
            HttpMethod::Post,
            self.url(paths::SEGMENTS, &[("app_id", scope.app_id)])?,
        )
        .with_token(scope.rest_api_key)
        .with_body(body.clone()))
    }

    pub fn build_delete_segment(&self, segment_id: &str) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        let url = self.url(
            paths::SEGMENT,
            &[("app_id", scope.app_id), ("segment_id", segment_id)],
        )?;
        Ok(HttpRequest::new(HttpMethod::Delete, url).with_token(scope.rest_api_key))
    }

    /// `GET /apps/{app_id}/outcomes?outcome_names=a,b`. Entries in
    /// `extra_params` (outcome_time_range, outcome_platforms, ...) are merged
    /// on top and may replace `outcome_names`.
    pub fn build_view_outcomes(
        &self,
        outcome_names: &[&str],
        extra_params: Option<&JsonMap>,
    ) -> Result<HttpRequest, Error> {
        let scope = self.app_scope()?;
        let query = merge_query(single("outcome_names", outcome_names.join(",")), extra_params);
        Ok(HttpRequest::new(
            HttpMethod::Get,
            self.url(paths::OUTCOMES, &[("app_id", scope.app_id)])?,
        )
        .with_token(scope.rest_api_key)
        .with_query(query))
    }

    // -- apps ---------------------------------------------------------------

    pub fn build_view_apps(&self) -> Result<HttpRequest, Error> {
        let token = self.user_auth_key()?;
        Ok(HttpRequest::new(HttpMethod::Get, self.url(paths::APPS, &[])?).with_token(token))
    }

    pub fn build_view_app(&self, app_id: &str) -> Result<HttpRequest, Error> {
        let token = self.user_auth_key()?;
        Ok(HttpRequest::new(HttpMethod::Get, self.url(paths::APP, &[("app_id", app_id)])?)
            .with_token(token))
    }

    pub fn build_create_app(&self, body: &JsonMap) -> Result<HttpRequest, Error> {
        let token = self.user_auth_key()?;
        Ok(HttpRequest::new(HttpMethod::Post, self.url(paths::APPS, &[])?)
            .with_token(token)
            .with_body(body.clone()))
    }

    pub fn build_update_app(&self, app_id: &str, body: &JsonMap) -> Result<HttpRequest, Error> {
        let token = self.user_auth_key()?;
        Ok(HttpRequest::new(HttpMethod::Put, self.url(paths::APP, &[("app_id", app_id)])?)
            .with_token(token)
            .with_body(body.clone()))
    }
}

/// Precondition guard: `value` must be set for the operation to proceed.
fn require<'a>(name: &str, value: &'a str) -> Result<&'a str, Error> {
    if value.is_empty() {
        return Err(Error::MissingParameter(name.to_string()));
    }
    Ok(value)
}
