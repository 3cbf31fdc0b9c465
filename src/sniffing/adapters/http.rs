//! `reqwest`-backed probe transport.

use crate::sniffing::{
    domain::{
        ClientIdentity, HandshakeError, HandshakeInfo, initialize_request,
        initialized_notification, parse_initialize_response,
    },
    ports::{JsonResponse, ProbeTransport, TransportError, TransportResult},
};
use async_trait::async_trait;
use eventsource_stream::{Event, Eventsource};
use futures::{Stream, StreamExt};
use reqwest::{Client, StatusCode, Url, header::ACCEPT};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Probe transport speaking plain HTTP and HTTP+SSE.
#[derive(Debug, Clone, Default)]
pub struct HttpProbeTransport {
    client: Client,
}

impl HttpProbeTransport {
    /// Creates a transport with a default `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn handshake(
        &self,
        sse_url: &str,
        client: &ClientIdentity,
    ) -> TransportResult<HandshakeInfo> {
        let base = Url::parse(sse_url)
            .map_err(|_| HandshakeError::InvalidEndpoint(sse_url.to_owned()))?;
        let response = self
            .client
            .get(base.clone())
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(TransportError::connect)?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        let mut events = Box::pin(response.bytes_stream().eventsource());

        let announced = next_event_named(&mut events, "endpoint")
            .await?
            .ok_or(HandshakeError::StreamClosed("endpoint event"))?;
        let message_url = resolve_message_url(&base, &announced.data)?;

        self.post_message(&message_url, &initialize_request(client))
            .await?;

        let info = loop {
            let event = next_event_named(&mut events, "message")
                .await?
                .ok_or(HandshakeError::StreamClosed("initialize response"))?;
            let Ok(message) = serde_json::from_str::<Value>(&event.data) else {
                continue;
            };
            if let Some(info) = parse_initialize_response(&message)? {
                break info;
            }
        };

        self.post_message(&message_url, &initialized_notification())
            .await?;
        drop(events);
        Ok(info)
    }

    async fn post_message(&self, url: &str, message: &Value) -> TransportResult<()> {
        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(TransportError::connect)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(response.status().as_u16()))
        }
    }
}

#[async_trait]
impl ProbeTransport for HttpProbeTransport {
    async fn get_json(&self, url: &str, timeout: Duration) -> TransportResult<JsonResponse> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| request_error(err, timeout))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(JsonResponse::new(status.as_u16(), Value::Null));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|err| request_error(err, timeout))?;
        Ok(JsonResponse::new(status.as_u16(), body))
    }

    async fn mcp_handshake(
        &self,
        sse_url: &str,
        client: &ClientIdentity,
        timeout: Duration,
    ) -> TransportResult<HandshakeInfo> {
        tokio::time::timeout(timeout, self.handshake(sse_url, client))
            .await
            .map_err(|_| TransportError::Timeout(timeout))?
    }
}

fn request_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_decode() {
        TransportError::decode(err)
    } else {
        TransportError::connect(err)
    }
}

async fn next_event_named<S, E>(events: &mut S, name: &str) -> TransportResult<Option<Event>>
where
    S: Stream<Item = Result<Event, E>> + Unpin,
    E: fmt::Display,
{
    while let Some(item) = events.next().await {
        let event = item
            .map_err(|err| TransportError::connect(std::io::Error::other(err.to_string())))?;
        if event.event == name {
            return Ok(Some(event));
        }
    }
    Ok(None)
}

/// Resolves the message URL announced in an `endpoint` event.
///
/// Servers announce either an absolute URL or a path relative to the event
/// stream's origin.
fn resolve_message_url(base: &Url, announced: &str) -> Result<String, HandshakeError> {
    base.join(announced.trim())
        .map(String::from)
        .map_err(|_| HandshakeError::InvalidEndpoint(announced.to_owned()))
}
