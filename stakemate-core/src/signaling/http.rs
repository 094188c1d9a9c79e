//! Long-poll HTTP signaling transport.
//!
//! Talks to a signaling server exposing `POST {base}/emit` for client events
//! and `GET {base}/events?client=<id>` returning a (possibly empty) batch of
//! server events per poll. A transport-level failure is surfaced to
//! subscribers as a terminal `error` event, matching how the channel reports
//! any other server-side failure.

use super::{ClientEvent, EventSubscription, ServerEvent, Signaling};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

pub struct HttpSignaling {
    http: reqwest::Client,
    base_url: String,
    client_id: Uuid,
}

impl HttpSignaling {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            client_id: Uuid::new_v4(),
        }
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    async fn poll_once(
        http: &reqwest::Client,
        base_url: &str,
        client_id: Uuid,
    ) -> std::result::Result<Vec<ServerEvent>, reqwest::Error> {
        http.get(format!("{}/events", base_url))
            .query(&[("client", client_id.to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl Signaling for HttpSignaling {
    async fn send(&self, event: ClientEvent) -> Result<()> {
        self.http
            .post(format!("{}/emit", self.base_url))
            .query(&[("client", self.client_id.to_string())])
            .json(&event)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let http = self.http.clone();
        let base_url = self.base_url.clone();
        let client_id = self.client_id;

        tokio::spawn(async move {
            loop {
                match Self::poll_once(&http, &base_url, client_id).await {
                    Ok(events) => {
                        for event in events {
                            if tx.send(event).is_err() {
                                // subscriber gone, stop polling
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Signaling poll failed: {}", e);
                        let _ = tx.send(ServerEvent::Error(format!(
                            "signaling connection lost: {}",
                            e
                        )));
                        return;
                    }
                }
            }
        });

        EventSubscription::new(rx)
    }
}
