use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Keys and app id the mock accepts.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub app_id: String,
    pub rest_api_key: String,
    pub user_auth_key: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            app_id: "123456".to_string(),
            rest_api_key: "KEY".to_string(),
            user_auth_key: "USER-KEY".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub app_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Deserialize)]
pub struct AppParams {
    pub app_id: Option<String>,
}

pub type Db<T> = Arc<RwLock<HashMap<Uuid, T>>>;

#[derive(Clone)]
struct AppState {
    credentials: Arc<Credentials>,
    notifications: Db<Notification>,
    devices: Db<Device>,
}

/// An error reply in the service's `{"errors": [...]}` shape.
pub struct Failure {
    status: StatusCode,
    message: String,
}

impl Failure {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "errors": [self.message] }))).into_response()
    }
}

type Reply = Result<Json<Value>, Failure>;

pub fn app(credentials: Credentials) -> Router {
    let state = AppState {
        credentials: Arc::new(credentials),
        notifications: Arc::new(RwLock::new(HashMap::new())),
        devices: Arc::new(RwLock::new(HashMap::new())),
    };
    let api = Router::new()
        .route("/notifications", get(list_notifications).post(create_notification))
        .route(
            "/notifications/{id}",
            get(get_notification).delete(cancel_notification),
        )
        .route("/players", get(list_devices).post(add_device))
        .route("/players/{id}", get(get_device).put(edit_device))
        .route("/apps", get(list_apps))
        .route("/apps/{app_id}", get(get_app))
        .with_state(state);
    Router::new().nest("/api/v1", api)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials)).await
}

fn authorize(headers: &HeaderMap, key: &str) -> Result<(), Failure> {
    let expected = format!("Basic {key}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(Failure::new(
            StatusCode::BAD_REQUEST,
            "Please include a case-sensitive header of Authorization: Basic <YOUR-REST-API-KEY-HERE> with a valid REST API key.",
        )),
    }
}

fn check_app_id(credentials: &Credentials, app_id: Option<&str>) -> Result<(), Failure> {
    match app_id {
        Some(id) if id == credentials.app_id => Ok(()),
        Some(_) => Err(Failure::new(StatusCode::BAD_REQUEST, "Invalid app_id")),
        None => Err(Failure::new(StatusCode::BAD_REQUEST, "app_id not found")),
    }
}

fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, Failure> {
    Uuid::parse_str(raw).map_err(|_| Failure::new(StatusCode::NOT_FOUND, not_found))
}

fn body_app_id(body: &Map<String, Value>) -> Option<&str> {
    body.get("app_id").and_then(Value::as_str)
}

// --- notifications ---

async fn create_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Map<String, Value>>,
) -> Reply {
    authorize(&headers, &state.credentials.rest_api_key)?;
    check_app_id(&state.credentials, body_app_id(&body))?;
    if matches!(body.get("contents"), None | Some(Value::Null)) && !body.contains_key("template_id") {
        return Err(Failure::new(
            StatusCode::BAD_REQUEST,
            "Message Notifications must have English language content",
        ));
    }

    let notification = Notification {
        id: Uuid::new_v4(),
        fields: body,
    };
    let id = notification.id;
    state.notifications.write().await.insert(id, notification);
    Ok(Json(json!({ "id": id, "recipients": 0 })))
}

async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Reply {
    authorize(&headers, &state.credentials.rest_api_key)?;
    check_app_id(&state.credentials, params.app_id.as_deref())?;

    let notifications = state.notifications.read().await;
    let page: Vec<&Notification> = notifications
        .values()
        .skip(params.offset)
        .take(params.limit)
        .collect();
    Ok(Json(json!({
        "total_count": notifications.len(),
        "offset": params.offset,
        "limit": params.limit,
        "notifications": page,
    })))
}

async fn get_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<AppParams>,
) -> Reply {
    authorize(&headers, &state.credentials.rest_api_key)?;
    check_app_id(&state.credentials, params.app_id.as_deref())?;

    let id = parse_id(&id, "Notification not found")?;
    let notifications = state.notifications.read().await;
    let notification = notifications
        .get(&id)
        .ok_or_else(|| Failure::new(StatusCode::NOT_FOUND, "Notification not found"))?;
    Ok(Json(json!(notification)))
}

async fn cancel_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<AppParams>,
) -> Reply {
    authorize(&headers, &state.credentials.rest_api_key)?;
    check_app_id(&state.credentials, params.app_id.as_deref())?;

    let id = parse_id(&id, "Notification not found")?;
    state
        .notifications
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| Failure::new(StatusCode::NOT_FOUND, "Notification not found"))?;
    Ok(Json(json!({ "success": true })))
}

// --- players ---

async fn add_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Map<String, Value>>,
) -> Reply {
    authorize(&headers, &state.credentials.rest_api_key)?;
    check_app_id(&state.credentials, body_app_id(&body))?;

    let device = Device {
        id: Uuid::new_v4(),
        fields: body,
    };
    let id = device.id;
    state.devices.write().await.insert(id, device);
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn list_devices(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Reply {
    authorize(&headers, &state.credentials.rest_api_key)?;
    check_app_id(&state.credentials, params.app_id.as_deref())?;

    let devices = state.devices.read().await;
    let page: Vec<&Device> = devices.values().skip(params.offset).take(params.limit).collect();
    Ok(Json(json!({
        "total_count": devices.len(),
        "offset": params.offset,
        "limit": params.limit,
        "players": page,
    })))
}

async fn get_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<AppParams>,
) -> Reply {
    authorize(&headers, &state.credentials.rest_api_key)?;
    check_app_id(&state.credentials, params.app_id.as_deref())?;

    let id = parse_id(&id, "Player not found")?;
    let devices = state.devices.read().await;
    let device = devices
        .get(&id)
        .ok_or_else(|| Failure::new(StatusCode::NOT_FOUND, "Player not found"))?;
    Ok(Json(json!(device)))
}

async fn edit_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Reply {
    authorize(&headers, &state.credentials.rest_api_key)?;
    check_app_id(&state.credentials, body_app_id(&body))?;

    let id = parse_id(&id, "Player not found")?;
    let mut devices = state.devices.write().await;
    let device = devices
        .get_mut(&id)
        .ok_or_else(|| Failure::new(StatusCode::NOT_FOUND, "Player not found"))?;
    device.fields.extend(body);
    Ok(Json(json!({ "success": true })))
}

// --- apps ---

fn app_record(credentials: &Credentials) -> Value {
    json!({ "id": credentials.app_id, "name": "Mock App", "players": 0 })
}

async fn list_apps(State(state): State<AppState>, headers: HeaderMap) -> Reply {
    authorize(&headers, &state.credentials.user_auth_key)?;
    Ok(Json(json!([app_record(&state.credentials)])))
}

async fn get_app(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(app_id): Path<String>,
) -> Reply {
    authorize(&headers, &state.credentials.user_auth_key)?;
    if app_id != state.credentials.app_id {
        return Err(Failure::new(StatusCode::NOT_FOUND, "App not found"));
    }
    Ok(Json(app_record(&state.credentials)))
}
