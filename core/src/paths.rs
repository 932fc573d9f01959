//! Path templates of the REST API, relative to the API root.

pub const NOTIFICATIONS: &str = "/notifications";
pub const NOTIFICATION: &str = "/notifications/{id}";
pub const NOTIFICATION_HISTORY: &str = "/notifications/{id}/history";
pub const APPS: &str = "/apps";
pub const APP: &str = "/apps/{app_id}";
pub const EDIT_TAGS: &str = "/apps/{app_id}/users/{user_id}";
pub const SEGMENTS: &str = "/apps/{app_id}/segments";
pub const SEGMENT: &str = "/apps/{app_id}/segments/{segment_id}";
pub const OUTCOMES: &str = "/apps/{app_id}/outcomes";
pub const DEVICES: &str = "/players";
pub const DEVICE: &str = "/players/{id}";
pub const NEW_SESSION: &str = "/players/{id}/on_session";
pub const NEW_PURCHASE: &str = "/players/{id}/on_purchase";
pub const CSV_EXPORT: &str = "/players/csv_export";
