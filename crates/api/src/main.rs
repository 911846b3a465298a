use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deal4bank_api::cache::SiteCache;
use deal4bank_api::config::ServerConfig;
use deal4bank_api::notifications::AlertRouter;
use deal4bank_api::router::build_app_router;
use deal4bank_api::state::AppState;
use deal4bank_api::ws;
use deal4bank_assist::{PromptFlowApi, PromptFlowConfig};
use deal4bank_db::{MemoryStore, PgDocumentStore, SharedStore};
use deal4bank_events::{AlertBus, EmailConfig, NotificationListener, ResendDelivery};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "deal4bank_api=debug,deal4bank_events=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Document store ---
    let store: SharedStore = match &config.database_url {
        Some(database_url) => {
            let pool = deal4bank_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            deal4bank_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            deal4bank_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgDocumentStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, keeping all data in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // --- External services ---
    let email_config = EmailConfig::from_env();
    if email_config.api_key.is_none() {
        tracing::warn!("RESEND_API_KEY not set, outbound email is disabled");
    }
    let email_sender = Arc::new(ResendDelivery::new(email_config.clone()));

    let prompt_flow = PromptFlowApi::new(PromptFlowConfig::from_env());
    if !prompt_flow.is_configured() {
        tracing::warn!("AI_FLOW_URL not set, AI drafting is disabled");
    }

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Alerts ---
    let alert_bus = Arc::new(AlertBus::default());

    // Spawn notification listener (store change feed -> admin alerts).
    let listener_cancel = CancellationToken::new();
    let listener_handle = tokio::spawn(
        NotificationListener::new(Arc::clone(&alert_bus))
            .run(store.subscribe(), listener_cancel.clone()),
    );

    // Spawn alert router (admin alerts -> WebSocket sessions).
    let router_handle = tokio::spawn(
        AlertRouter::new(Arc::clone(&ws_manager)).run(alert_bus.subscribe()),
    );

    tracing::info!("Alert services started (notification listener, alert router)");

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        email_sender,
        email_config: Arc::new(email_config),
        prompt_flow: Arc::new(prompt_flow),
        site_cache: Arc::new(SiteCache::new(Duration::from_secs(config.site_cache_ttl_secs))),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    listener_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), listener_handle).await;
    tracing::info!("Notification listener stopped");

    // Dropping the last bus handle closes the channel and ends the router.
    drop(alert_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), router_handle).await;
    tracing::info!("Alert router stopped");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
