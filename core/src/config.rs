//! Credentials and client configuration.
//!
//! # Design
//! Nothing is validated here. A missing `app_id` or key is reported by the
//! operation that needs it, right before the request would be built.

use std::fmt;

/// Base URL of the public OneSignal REST API.
pub const DEFAULT_API_ROOT: &str = "https://onesignal.com/api/v1";

/// Environment variable that overrides the API root in `ClientOptions::from_env`.
pub const API_ROOT_ENV: &str = "ONESIGNAL_API_ROOT";

/// The credentials a client is configured with.
///
/// `rest_api_key` authorizes app-scoped operations (notifications, devices,
/// segments, outcomes). `user_auth_key` authorizes account-scoped app
/// management. An empty string means the value was not provided.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub app_id: String,
    pub rest_api_key: String,
    pub user_auth_key: String,
}

impl Identity {
    pub fn new(app_id: impl Into<String>, rest_api_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            rest_api_key: rest_api_key.into(),
            user_auth_key: String::new(),
        }
    }

    pub fn with_user_auth_key(mut self, user_auth_key: impl Into<String>) -> Self {
        self.user_auth_key = user_auth_key.into();
        self
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("app_id", &self.app_id)
            .field("rest_api_key", &redacted(&self.rest_api_key))
            .field("user_auth_key", &redacted(&self.user_auth_key))
            .finish()
    }
}

pub(crate) fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

/// Overridable client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    api_root: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }
}

impl ClientOptions {
    /// Point the client at a different API root, e.g. a mock server.
    pub fn with_api_root(mut self, api_root: &str) -> Self {
        self.api_root = api_root.trim_end_matches('/').to_string();
        self
    }

    /// Default options, with the API root taken from `ONESIGNAL_API_ROOT` when set.
    pub fn from_env() -> Self {
        match std::env::var(API_ROOT_ENV) {
            Ok(root) if !root.is_empty() => Self::default().with_api_root(&root),
            _ => Self::default(),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_api_root_is_public_service() {
        assert_eq!(ClientOptions::default().api_root(), "https://onesignal.com/api/v1");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let options = ClientOptions::default().with_api_root("http://localhost:3000/api/v1/");
        assert_eq!(options.api_root(), "http://localhost:3000/api/v1");
    }

    #[test]
    fn identity_defaults_user_auth_key_to_empty() {
        let identity = Identity::new("app", "rest");
        assert_eq!(identity.user_auth_key, "");
        let identity = identity.with_user_auth_key("user");
        assert_eq!(identity.user_auth_key, "user");
    }

    #[test]
    fn debug_output_hides_keys() {
        let identity = Identity::new("app-1", "rest-secret").with_user_auth_key("user-secret");
        let printed = format!("{identity:?}");
        assert!(printed.contains("app-1"));
        assert!(!printed.contains("rest-secret"));
        assert!(!printed.contains("user-secret"));
    }

    #[test]
    fn from_env_reads_api_root() {
        std::env::set_var(API_ROOT_ENV, "http://127.0.0.1:9999/api/v1/");
        let options = ClientOptions::from_env();
        std::env::remove_var(API_ROOT_ENV);
        assert_eq!(options.api_root(), "http://127.0.0.1:9999/api/v1");
    }
}
