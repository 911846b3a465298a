use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ws::manager::WsManager;

const PING_EVERY: Duration = Duration::from_secs(30);

/// Missed pongs tolerated before a session is closed.
const MISSED_PONGS: u32 = 3;

/// Ping admin sessions periodically and close the ones that stopped
/// answering. Runs until the handle is aborted.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PING_EVERY);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let evicted = ws_manager.evict_silent(PING_EVERY * MISSED_PONGS).await;
            if !evicted.is_empty() {
                tracing::info!(count = evicted.len(), "Closed unresponsive admin sessions");
            }

            let open = ws_manager.connection_count().await;
            if open > 0 {
                let oldest = ws_manager.oldest_connection().await;
                tracing::debug!(open, ?oldest, "Pinging admin sessions");
                ws_manager.ping_all().await;
            }
        }
    })
}
