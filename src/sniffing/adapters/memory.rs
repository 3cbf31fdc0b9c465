//! Scripted in-memory probe transport for tests and dry runs.

use crate::sniffing::{
    domain::{ClientIdentity, HandshakeInfo},
    ports::{JsonResponse, ProbeTransport, TransportError, TransportResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Probe transport that answers from scripted responses.
///
/// URLs without a script behave like a refused connection. Every request is
/// recorded so tests can assert which endpoints were probed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProbeTransport {
    state: Arc<RwLock<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    documents: HashMap<String, JsonResponse>,
    handshakes: HashMap<String, HandshakeInfo>,
    requests: Vec<String>,
}

fn lock_error(err: impl ToString) -> TransportError {
    TransportError::connect(io::Error::other(err.to_string()))
}

impl ScriptedProbeTransport {
    /// Creates a transport with no scripted endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response served for a GET of `url`.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn serve_json(
        &self,
        url: impl Into<String>,
        response: JsonResponse,
    ) -> TransportResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.documents.insert(url.into(), response);
        Ok(())
    }

    /// Scripts a successful MCP handshake on the event stream at `sse_url`.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn serve_handshake(
        &self,
        sse_url: impl Into<String>,
        info: HandshakeInfo,
    ) -> TransportResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.handshakes.insert(sse_url.into(), info);
        Ok(())
    }

    /// Returns every URL requested so far, in request order.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn requests(&self) -> TransportResult<Vec<String>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.requests.clone())
    }

    fn record(&self, url: &str) -> TransportResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.requests.push(url.to_owned());
        Ok(())
    }
}

fn refused(url: &str) -> TransportError {
    TransportError::connect(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        format!("no scripted response for {url}"),
    ))
}

#[async_trait]
impl ProbeTransport for ScriptedProbeTransport {
    async fn get_json(&self, url: &str, _timeout: Duration) -> TransportResult<JsonResponse> {
        self.record(url)?;
        let state = self.state.read().map_err(lock_error)?;
        state.documents.get(url).cloned().ok_or_else(|| refused(url))
    }

    async fn mcp_handshake(
        &self,
        sse_url: &str,
        _client: &ClientIdentity,
        _timeout: Duration,
    ) -> TransportResult<HandshakeInfo> {
        self.record(sse_url)?;
        let state = self.state.read().map_err(lock_error)?;
        state
            .handshakes
            .get(sse_url)
            .cloned()
            .ok_or_else(|| refused(sse_url))
    }
}
