use std::sync::Arc;

use deal4bank_assist::PromptFlow;
use deal4bank_db::SharedStore;
use deal4bank_events::{EmailConfig, EmailSender};

use crate::cache::SiteCache;
use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Document store (Postgres or in-memory).
    pub store: SharedStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (admin sessions).
    pub ws_manager: Arc<WsManager>,
    /// Outbound email provider.
    pub email_sender: Arc<dyn EmailSender>,
    /// Email settings (sender mailbox recorded on sent mail).
    pub email_config: Arc<EmailConfig>,
    /// AI drafting flows.
    pub prompt_flow: Arc<dyn PromptFlow>,
    /// Cache for the public site-data payload.
    pub site_cache: Arc<SiteCache>,
}
