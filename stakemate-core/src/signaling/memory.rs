//! In-process signaling transport.
//!
//! Backs tests and the loopback demo: the client half implements
//! [`Signaling`]; the peer half plays the server, observing client sends and
//! injecting server events.

use super::{ClientEvent, EventSubscription, ServerEvent, Signaling};
use crate::error::{CoreError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

type Subscribers = Arc<Mutex<Vec<mpsc::UnboundedSender<ServerEvent>>>>;

pub struct MemorySignaling {
    outbound: mpsc::UnboundedSender<ClientEvent>,
    subscribers: Subscribers,
}

pub struct MemoryPeer {
    inbound: mpsc::UnboundedReceiver<ClientEvent>,
    subscribers: Subscribers,
}

/// Create a connected client/peer pair.
pub fn pair() -> (MemorySignaling, MemoryPeer) {
    let (outbound, inbound) = mpsc::unbounded_channel();
    let subscribers: Subscribers = Arc::new(Mutex::new(Vec::new()));
    (
        MemorySignaling {
            outbound,
            subscribers: subscribers.clone(),
        },
        MemoryPeer {
            inbound,
            subscribers,
        },
    )
}

#[async_trait]
impl Signaling for MemorySignaling {
    async fn send(&self, event: ClientEvent) -> Result<()> {
        self.outbound
            .send(event)
            .map_err(|_| CoreError::channel("signaling peer disconnected"))
    }

    fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        EventSubscription::new(rx)
    }
}

impl MemoryPeer {
    /// Next event sent by the client, or `None` if the client is gone.
    pub async fn recv(&mut self) -> Option<ClientEvent> {
        self.inbound.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<ClientEvent> {
        self.inbound.try_recv().ok()
    }

    /// Deliver a server event to every live subscription; closed ones are
    /// pruned.
    pub fn emit(&self, event: ServerEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sends_reach_the_peer() {
        let (client, mut peer) = pair();
        client
            .send(ClientEvent::GetGameDetails {
                code: "ABCD".to_string(),
            })
            .await
            .unwrap();
        match peer.recv().await {
            Some(ClientEvent::GetGameDetails { code }) => assert_eq!(code, "ABCD"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn emits_reach_live_subscriptions_only() {
        let (client, peer) = pair();
        let mut sub = client.subscribe();
        let dropped = client.subscribe();
        drop(dropped);

        peer.emit(ServerEvent::Error("boom".to_string()));
        assert!(matches!(sub.recv().await, Some(ServerEvent::Error(_))));

        // only the live subscription remains registered
        assert_eq!(peer.subscribers.lock().len(), 1);
    }

    #[tokio::test]
    async fn send_fails_after_peer_drop() {
        let (client, peer) = pair();
        drop(peer);
        let err = client
            .send(ClientEvent::GetGameDetails {
                code: "ABCD".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Channel(_)));
    }
}
