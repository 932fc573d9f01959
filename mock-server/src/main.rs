use mock_server::Credentials;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let defaults = Credentials::default();
    let credentials = Credentials {
        app_id: env_or("ONESIGNAL_APP_ID", defaults.app_id),
        rest_api_key: env_or("ONESIGNAL_REST_API_KEY", defaults.rest_api_key),
        user_auth_key: env_or("ONESIGNAL_USER_AUTH_KEY", defaults.user_auth_key),
    };

    let port = env_or("PORT", "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, app_id = %credentials.app_id, "mock OneSignal API listening under /api/v1");
    mock_server::run(listener, credentials).await
}
