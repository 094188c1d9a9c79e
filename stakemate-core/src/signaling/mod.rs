//! Signaling channel boundary.
//!
//! The channel is bidirectional and fire-and-forget: there is no built-in
//! request/response pairing, so the consumer correlates requests to the
//! events that answer them. Connection lifecycle is owned by whoever
//! constructs the client; consumers only hold a handle and a subscription.

pub mod http;
pub mod memory;

pub use http::HttpSignaling;
pub use memory::{MemoryPeer, MemorySignaling};

use crate::error::Result;
use crate::types::{GameInfo, SessionStart};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted towards the signaling server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Request the terms of a session by code.
    #[serde(rename_all = "camelCase")]
    GetGameDetails { code: String },
    /// Funds are committed on chain; the server can finalize the join.
    #[serde(rename_all = "camelCase")]
    AcceptGame { code: String, wallet_address: String },
}

/// Events delivered by the signaling server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Terms response for a `GetGameDetails` request.
    GameInfo(GameInfo),
    /// A request failed or the channel itself is in trouble.
    Error(String),
    /// The session begins.
    Start(SessionStart),
}

/// A live subscription to server events. Dropping it unsubscribes; events
/// arriving afterwards are discarded by the transport.
pub struct EventSubscription {
    rx: mpsc::UnboundedReceiver<ServerEvent>,
}

impl EventSubscription {
    pub fn new(rx: mpsc::UnboundedReceiver<ServerEvent>) -> Self {
        Self { rx }
    }

    /// Next server event, or `None` once the channel is closed.
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        self.rx.recv().await
    }
}

#[async_trait]
pub trait Signaling: Send + Sync {
    /// Fire-and-forget send towards the server.
    async fn send(&self, event: ClientEvent) -> Result<()>;

    /// Subscribe to server events for the lifetime of the returned handle.
    fn subscribe(&self) -> EventSubscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_events_use_wire_names() {
        let event = ClientEvent::GetGameDetails {
            code: "ABCD".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "getGameDetails");
        assert_eq!(json["data"]["code"], "ABCD");

        let event = ClientEvent::AcceptGame {
            code: "ABCD".to_string(),
            wallet_address: "0xabc".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "acceptGame");
        assert_eq!(json["data"]["walletAddress"], "0xabc");
    }

    #[test]
    fn server_events_use_wire_names() {
        let json = r#"{"event":"gameInfo","data":{"timeControl":5,"totalRounds":3,"wagerAmount":2.0}}"#;
        let event: ServerEvent = serde_json::from_str(json).unwrap();
        match event {
            ServerEvent::GameInfo(info) => assert_eq!(info.total_rounds, 3),
            other => panic!("unexpected event: {:?}", other),
        }

        let json = r#"{"event":"error","data":"no such game"}"#;
        let event: ServerEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, ServerEvent::Error(msg) if msg == "no such game"));
    }
}
