//! Session registry behaviour, driven without a real socket.

use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use deal4bank_api::ws::WsManager;

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);
    assert!(manager.oldest_connection().await.is_none());
}

#[tokio::test]
async fn add_and_remove_track_the_count() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string()).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn broadcast_reaches_every_connection() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string()).await;
    let mut rx2 = manager.add("conn-2".to_string()).await;

    let delivered = manager.broadcast(Message::Text("hello".into())).await;

    assert_eq!(delivered, 2);
    assert!(matches!(rx1.recv().await, Some(Message::Text(t)) if t.as_str() == "hello"));
    assert!(matches!(rx2.recv().await, Some(Message::Text(t)) if t.as_str() == "hello"));
}

#[tokio::test]
async fn broadcast_skips_closed_channels() {
    let manager = WsManager::new();
    let rx1 = manager.add("conn-1".to_string()).await;
    let _rx2 = manager.add("conn-2".to_string()).await;
    drop(rx1);

    let delivered = manager.broadcast(Message::Text("hello".into())).await;
    assert_eq!(delivered, 1);
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string()).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert_matches!(rx.recv().await, Some(Message::Close(None)));
}

#[tokio::test]
async fn ping_all_sends_ping_frames() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string()).await;

    manager.ping_all().await;

    assert_matches!(rx.recv().await, Some(Message::Ping(_)));
}

#[tokio::test]
async fn silent_sessions_are_evicted() {
    let manager = WsManager::new();
    let mut quiet = manager.add("quiet".to_string()).await;
    let _lively = manager.add("lively".to_string()).await;

    tokio::time::sleep(Duration::from_millis(30)).await;
    manager.record_pong("lively").await;

    let evicted = manager.evict_silent(Duration::from_millis(20)).await;

    assert_eq!(evicted, vec!["quiet".to_string()]);
    assert_eq!(manager.connection_count().await, 1);
    assert_matches!(quiet.recv().await, Some(Message::Close(None)));
}

#[tokio::test]
async fn heartbeat_task_runs_on_the_runtime() {
    let manager = std::sync::Arc::new(WsManager::new());
    let mut rx = manager.add("conn-1".to_string()).await;

    let handle = deal4bank_api::ws::start_heartbeat(std::sync::Arc::clone(&manager));

    // The first tick fires immediately.
    assert_matches!(rx.recv().await, Some(Message::Ping(_)));
    handle.abort();
}
