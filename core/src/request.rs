//! Pure helpers that turn operation inputs into an `HttpRequest`.
//!
//! # Design
//! None of these functions touch the network or mutate their inputs. Bodies
//! are copied before identity fields are injected, so callers can reuse one
//! map across several calls.

use serde_json::Value;

use crate::error::Error;
use crate::JsonMap;

/// Join `api_root` and `template`, substituting every `{name}` placeholder.
///
/// Values are inserted verbatim. A placeholder with no matching entry in
/// `params` fails with `Error::MissingParameter`. An unterminated `{` is kept
/// as literal text.
pub fn resolve_path(api_root: &str, template: &str, params: &[(&str, &str)]) -> Result<String, Error> {
    let mut url = String::with_capacity(api_root.len() + template.len());
    url.push_str(api_root);

    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| Error::MissingParameter(name.to_string()))?;
        url.push_str(&rest[..start]);
        url.push_str(value);
        rest = &rest[start + len + 1..];
    }
    url.push_str(rest);
    Ok(url)
}

/// Merge caller-supplied query parameters over defaults. Last write wins.
pub fn merge_query(mut defaults: JsonMap, overrides: Option<&JsonMap>) -> JsonMap {
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            defaults.insert(key.clone(), value.clone());
        }
    }
    defaults
}

/// Copy `body` and insert `fields` into the copy.
pub fn inject_fields(body: &JsonMap, fields: &[(&str, &str)]) -> JsonMap {
    let mut copy = body.clone();
    for (key, value) in fields {
        copy.insert((*key).to_string(), Value::String((*value).to_string()));
    }
    copy
}

/// Build a single-entry parameter map.
pub fn single(key: &str, value: impl Into<Value>) -> JsonMap {
    let mut map = JsonMap::new();
    map.insert(key.to_string(), value.into());
    map
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> JsonMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn resolves_all_placeholders() {
        let url = resolve_path(
            "https://onesignal.com/api/v1",
            "/apps/{app_id}/segments/{segment_id}",
            &[("segment_id", "seg"), ("app_id", "app")],
        )
        .unwrap();
        assert_eq!(url, "https://onesignal.com/api/v1/apps/app/segments/seg");
    }

    #[test]
    fn template_without_placeholders_is_appended() {
        let url = resolve_path("http://root", "/players/csv_export", &[]).unwrap();
        assert_eq!(url, "http://root/players/csv_export");
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let err = resolve_path("http://root", "/notifications/{id}", &[]).unwrap_err();
        assert!(matches!(err, Error::MissingParameter(ref name) if name == "id"));
        assert_eq!(err.to_string(), "id must be defined");
    }

    #[test]
    fn unterminated_brace_is_literal() {
        let url = resolve_path("http://root", "/odd/{id", &[("id", "1")]).unwrap();
        assert_eq!(url, "http://root/odd/{id");
    }

    #[test]
    fn overrides_win_on_collision() {
        let merged = merge_query(
            single("app_id", "A"),
            Some(&map(json!({"app_id": "B", "limit": 5}))),
        );
        assert_eq!(Value::Object(merged), json!({"app_id": "B", "limit": 5}));
    }

    #[test]
    fn no_overrides_keeps_defaults() {
        let merged = merge_query(single("app_id", "A"), None);
        assert_eq!(Value::Object(merged), json!({"app_id": "A"}));
    }

    #[test]
    fn inject_leaves_original_untouched() {
        let original = map(json!({"contents": {"en": "hi"}}));
        let snapshot = original.clone();
        let injected = inject_fields(&original, &[("app_id", "123456")]);
        assert_eq!(original, snapshot);
        assert_eq!(
            Value::Object(injected),
            json!({"contents": {"en": "hi"}, "app_id": "123456"})
        );
    }

    #[test]
    fn inject_overwrites_caller_app_id() {
        let original = map(json!({"app_id": "other"}));
        let injected = inject_fields(&original, &[("app_id", "mine")]);
        assert_eq!(injected["app_id"], "mine");
        assert_eq!(original["app_id"], "other");
    }
}
