//! Builder for the body of a `send_notification` call.

use serde_json::Value;

use crate::error::Error;
use crate::JsonMap;

/// Prefix that bypasses the allow-list, for fields newer than this list.
pub const UNCHECKED_PREFIX: char = '!';

/// Notification fields accepted by `Notification::set_parameter`.
pub const ALLOWED_FIELDS: &[&str] = &[
    "contents",
    "included_segments",
    "excluded_segments",
    "filters",
    "include_player_ids",
    "app_id",
    "app_ids",
    "headings",
    "subtitle",
    "template_id",
    "content_available",
    "mutable_content",
    "data",
    "url",
    "ios_attachments",
    "big_picture",
    "adm_big_picture",
    "chrome_big_picture",
    "buttons",
    "web_buttons",
    "ios_category",
    "android_background_layout",
    "small_icon",
    "large_icon",
    "adm_small_icon",
    "adm_large_icon",
    "chrome_web_icon",
    "chrome_web_image",
    "firefox_icon",
    "chrome_icon",
    "ios_sound",
    "android_sound",
    "android_led_color",
    "android_accent_color",
    "android_visibility",
    "adm_sound",
    "ios_badgeType",
    "ios_badgeCount",
    "collapse_id",
    "send_after",
    "delayed_option",
    "delivery_time_of_day",
    "ttl",
    "priority",
    "android_group",
    "android_group_message",
    "adm_group",
    "adm_group_message",
    "isIos",
    "isAndroid",
    "isAnyWeb",
    "isChromeWeb",
    "isFirefox",
    "isSafari",
    "isWP",
    "isWP_WNS",
    "isAdm",
    "isChrome",
];

/// A notification post body under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    post_body: JsonMap,
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Notification {
    /// Start a body with `contents` set (to `null` when not given).
    pub fn new(contents: Option<Value>) -> Self {
        let mut post_body = JsonMap::new();
        post_body.insert("contents".to_string(), contents.unwrap_or(Value::Null));
        Self { post_body }
    }

    pub fn set_contents(&mut self, contents: Value) -> &mut Self {
        self.insert("contents", contents)
    }

    pub fn set_included_segments(&mut self, segments: Value) -> &mut Self {
        self.insert("included_segments", segments)
    }

    pub fn set_excluded_segments(&mut self, segments: Value) -> &mut Self {
        self.insert("excluded_segments", segments)
    }

    pub fn set_filters(&mut self, filters: Value) -> &mut Self {
        self.insert("filters", filters)
    }

    /// Target specific devices by player id (`include_player_ids`).
    pub fn set_target_devices(&mut self, device_ids: Value) -> &mut Self {
        self.insert("include_player_ids", device_ids)
    }

    /// Set any field from `ALLOWED_FIELDS`.
    ///
    /// A name starting with `!` skips the check; the `!` is stripped before
    /// the field is stored.
    pub fn set_parameter(&mut self, name: &str, value: Value) -> Result<&mut Self, Error> {
        let field = match name.strip_prefix(UNCHECKED_PREFIX) {
            Some(field) => field,
            None if ALLOWED_FIELDS.contains(&name) => name,
            None => return Err(Error::InvalidField(name.to_string())),
        };
        if field.is_empty() {
            return Err(Error::InvalidField(name.to_string()));
        }
        Ok(self.insert(field, value))
    }

    pub fn post_body(&self) -> &JsonMap {
        &self.post_body
    }

    pub fn into_body(self) -> JsonMap {
        self.post_body
    }

    fn insert(&mut self, field: &str, value: Value) -> &mut Self {
        self.post_body.insert(field.to_string(), value);
        self
    }
}

impl From<Notification> for JsonMap {
    fn from(notification: Notification) -> Self {
        notification.into_body()
    }
}
