//! Session status channel over WebSocket.
//!
//! One connection per session at `wss://<host>/ws/<session_id>`. Frames are
//! interpreted by `ChannelEvent::from_text`; after the first terminal event
//! the channel is spent and yields `None`.

use async_trait::async_trait;
use docshade_core::{
    ChannelConnector, ChannelEvent, ClientError, ClientResult, Endpoints, SessionChannel,
    SessionId,
};
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Clone, Debug)]
pub struct WsConnector {
    endpoints: Endpoints,
}

impl WsConnector {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

#[async_trait]
impl ChannelConnector for WsConnector {
    async fn connect(&self, session_id: &SessionId) -> ClientResult<Box<dyn SessionChannel>> {
        let url = self.endpoints.session_channel_url(session_id);
        tracing::debug!(session_id = %session_id, url = %url, "Opening status channel");

        let (stream, _response) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| ClientError::Channel(format!("Failed to connect to {}: {}", url, e)))?;

        tracing::info!(session_id = %session_id, "Status channel established");
        Ok(Box::new(WsSessionChannel::new(session_id.clone(), stream)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelState {
    /// Connected, `Opened` not yet reported.
    Armed,
    Open,
    /// Terminal event delivered or connection gone.
    Spent,
}

pub struct WsSessionChannel {
    session_id: SessionId,
    stream: WsStream,
    state: ChannelState,
    closed: bool,
}

impl WsSessionChannel {
    fn new(session_id: SessionId, stream: WsStream) -> Self {
        Self {
            session_id,
            stream,
            state: ChannelState::Armed,
            closed: false,
        }
    }
}

#[async_trait]
impl SessionChannel for WsSessionChannel {
    async fn next_event(&mut self) -> Option<ChannelEvent> {
        match self.state {
            ChannelState::Armed => {
                self.state = ChannelState::Open;
                return Some(ChannelEvent::Opened);
            }
            ChannelState::Spent => return None,
            ChannelState::Open => {}
        }

        let event = loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => break ChannelEvent::from_text(&text),
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(session_id = %self.session_id, frame = ?frame, "Server closed status channel");
                    self.closed = true;
                    break ChannelEvent::Closed;
                }
                // Ping/pong and binary frames carry no status.
                Some(Ok(_)) => continue,
                Some(Err(e)) => break ChannelEvent::TransportError(e.to_string()),
                None => {
                    self.closed = true;
                    break ChannelEvent::Closed;
                }
            }
        };

        if event.is_terminal() {
            self.state = ChannelState::Spent;
        }
        Some(event)
    }

    async fn close(&mut self) {
        self.state = ChannelState::Spent;
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!(session_id = %self.session_id, error = %e, "Status channel close failed");
        }
        tracing::debug!(session_id = %self.session_id, "Status channel closed");
    }
}
