//! Verify request building and classification against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use onesignal_core::{
    classify, ClientOptions, Error, HttpMethod, HttpRequest, HttpResponse, Identity, JsonMap,
    OneSignalClient,
};
use serde_json::Value;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn optional_object(value: &Value) -> Option<JsonMap> {
    value.as_object().cloned()
}

fn str_arg<'a>(args: &'a Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or_else(|| panic!("missing string arg {key}"))
}

/// Call the `build_*` method named by a vector case, lending it `body` and `query`.
fn build(
    client: &OneSignalClient,
    operation: &str,
    args: &Value,
    body: &JsonMap,
    query: Option<&JsonMap>,
) -> HttpRequest {
    let result = match operation {
        "send_notification" => client.build_send_notification(body),
        "cancel_notification" => client.build_cancel_notification(str_arg(args, "id")),
        "view_notification" => client.build_view_notification(str_arg(args, "id")),
        "view_notifications" => client.build_view_notifications(query),
        "notification_history" => client.build_notification_history(str_arg(args, "id"), body),
        "view_devices" => client.build_view_devices(query),
        "view_device" => client.build_view_device(str_arg(args, "id")),
        "add_device" => client.build_add_device(body),
        "edit_device" => client.build_edit_device(str_arg(args, "id"), body),
        "edit_tags" => client.build_edit_tags(str_arg(args, "id"), body),
        "new_session" => client.build_new_session(str_arg(args, "id"), body),
        "new_purchase" => client.build_new_purchase(str_arg(args, "id"), body),
        "csv_export" => client.build_csv_export(body),
        "create_segment" => client.build_create_segment(body),
        "delete_segment" => client.build_delete_segment(str_arg(args, "id")),
        "view_outcomes" => {
            let names: Vec<&str> = args["names"]
                .as_array()
                .unwrap()
                .iter()
                .map(|n| n.as_str().unwrap())
                .collect();
            client.build_view_outcomes(&names, query)
        }
        "view_apps" => client.build_view_apps(),
        "view_app" => client.build_view_app(str_arg(args, "id")),
        "create_app" => client.build_create_app(body),
        "update_app" => client.build_update_app(str_arg(args, "id"), body),
        other => panic!("unknown operation: {other}"),
    };
    result.unwrap_or_else(|e| panic!("{operation}: build failed: {e}"))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

#[test]
fn operation_test_vectors() {
    let raw = include_str!("../../test-vectors/operations.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let identity = &vectors["identity"];
    let api_root = vectors["api_root"].as_str().unwrap();
    let client = OneSignalClient::new(
        Identity::new(
            identity["app_id"].as_str().unwrap(),
            identity["rest_api_key"].as_str().unwrap(),
        )
        .with_user_auth_key(identity["user_auth_key"].as_str().unwrap()),
    )
    .with_options(ClientOptions::default().with_api_root(api_root));

    let cases = vectors["cases"].as_array().unwrap();
    assert_eq!(cases.len(), 20, "every operation has a vector");

    for case in cases {
        let name = case["operation"].as_str().unwrap();
        let expected = &case["expected_request"];
        let args = &case["args"];
        let body = optional_object(&args["body"]).unwrap_or_default();
        let query = optional_object(&args["query"]);
        let body_before = body.clone();
        let query_before = query.clone();

        let req = build(&client, name, args, &body, query.as_ref());

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{api_root}{}", expected["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(
            req.headers(),
            vec![(
                "Authorization".to_string(),
                expected["authorization"].as_str().unwrap().to_string()
            )],
            "{name}: headers"
        );
        assert_eq!(req.query.clone().map(Value::Object).unwrap_or(Value::Null), expected["query"], "{name}: query");
        assert_eq!(req.body.clone().map(Value::Object).unwrap_or(Value::Null), expected["body"], "{name}: body");
        assert_eq!(body, body_before, "{name}: caller body untouched");
        assert_eq!(query, query_before, "{name}: caller query untouched");
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn classify_test_vectors() {
    let raw = include_str!("../../test-vectors/classify.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        let expected = &case["expected"];
        let result = classify(response.clone());

        if let Some(ok) = expected.get("ok") {
            let ok_response = result.unwrap_or_else(|e| panic!("{name}: expected success, got {e}"));
            assert_eq!(u64::from(ok_response.status_code), ok["status_code"].as_u64().unwrap(), "{name}: status");
            assert_eq!(ok_response.body, ok["body"], "{name}: body");
            assert_eq!(ok_response.http_response, response, "{name}: raw response");
        } else if let Some(http) = expected.get("http_error") {
            let err = result.expect_err(name);
            let err = err.as_http().unwrap_or_else(|| panic!("{name}: expected http error"));
            assert_eq!(u64::from(err.status_code), http["status_code"].as_u64().unwrap(), "{name}: status");
            assert_eq!(err.message, http["message"].as_str().unwrap(), "{name}: message");
            assert_eq!(err.http_response, response, "{name}: raw response");
        } else {
            assert!(matches!(result, Err(Error::Json(_))), "{name}: expected json error");
        }
    }
}
