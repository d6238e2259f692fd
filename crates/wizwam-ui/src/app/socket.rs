//! Socket.IO connection runner for the browser.
//!
//! # Design
//! - Open a plain websocket to the Socket.IO endpoint and drive the
//!   Engine.IO handshake, heartbeat and namespace join from typed frames.
//! - Treat a session as dead once nothing arrives within the announced ping
//!   interval plus timeout.
//! - Reconnect with exponential backoff; stop when the handle is dropped.
//! - Transport problems are reported through the status callback and the
//!   console only; they never reach the download UI.

use futures::channel::oneshot;
use futures::future::{Either, pending, select};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use gloo::console;
use gloo_net::websocket::Message;
use gloo_net::websocket::futures::WebSocket;
use gloo_timers::future::TimeoutFuture;
use wizwam_events::PushEvent;
use yew::Callback;
use yew::platform::spawn_local;

use crate::core::connection::ConnectionStatus;
use crate::core::logic::{backoff_delay_ms, socket_url};
use crate::core::socketio::{DEFAULT_NAMESPACE, Inbound, encode_connect, encode_pong, interpret};

/// Live socket; dropping it stops the runner.
pub(crate) struct SocketHandle {
    _stop: oneshot::Sender<()>,
}

/// Start the runner against `base_url`.
pub(crate) fn connect_socket(
    base_url: &str,
    on_event: Callback<PushEvent>,
    on_status: Callback<ConnectionStatus>,
) -> SocketHandle {
    let (stop_tx, stop_rx) = oneshot::channel();
    let url = socket_url(base_url);
    spawn_local(run_socket(url, stop_rx, on_event, on_status));
    SocketHandle { _stop: stop_tx }
}

async fn run_socket(
    url: String,
    mut stop: oneshot::Receiver<()>,
    on_event: Callback<PushEvent>,
    on_status: Callback<ConnectionStatus>,
) {
    let mut attempt = 0u32;
    loop {
        on_status.emit(ConnectionStatus::Connecting);
        let reason = match WebSocket::open(&url) {
            Ok(socket) => {
                let (mut write, mut read) = socket.split();
                let mut silence_limit: Option<u32> = None;
                loop {
                    let watchdog = match silence_limit {
                        Some(limit) => Either::Left(TimeoutFuture::new(limit)),
                        None => Either::Right(pending::<()>()),
                    };
                    let frame = match select(select(read.next(), watchdog), &mut stop).await {
                        Either::Left((Either::Left((frame, _)), _)) => frame,
                        Either::Left((Either::Right(_), _)) => {
                            break "heartbeat timed out".to_string();
                        }
                        Either::Right(_) => return,
                    };
                    match frame {
                        None => break "socket closed".to_string(),
                        Some(Err(err)) => break err.to_string(),
                        Some(Ok(Message::Bytes(_))) => {}
                        Some(Ok(Message::Text(text))) => match interpret(&text) {
                            Ok(Inbound::Handshake(handshake)) => {
                                silence_limit = handshake.silence_limit_ms();
                                if let Err(reason) =
                                    send(&mut write, encode_connect(DEFAULT_NAMESPACE)).await
                                {
                                    break reason;
                                }
                            }
                            Ok(Inbound::Ping(payload)) => {
                                if let Err(reason) = send(&mut write, encode_pong(&payload)).await {
                                    break reason;
                                }
                            }
                            Ok(Inbound::Joined { sid }) => {
                                attempt = 0;
                                console::log!("socket connected");
                                on_status.emit(ConnectionStatus::Connected { sid });
                            }
                            Ok(Inbound::Event(event)) => on_event.emit(event),
                            Ok(Inbound::Left) => break "server closed the namespace".to_string(),
                            Ok(Inbound::Closed) => break "server closed the session".to_string(),
                            Ok(Inbound::Rejected(message)) => break message,
                            Ok(Inbound::Ignored) => {}
                            Err(err) => console::warn!("socket frame ignored", err.to_string()),
                        },
                    }
                }
            }
            Err(err) => err.to_string(),
        };

        console::warn!("socket disconnected", reason.clone());
        on_status.emit(ConnectionStatus::Disconnected { reason });
        let delay = backoff_delay_ms(attempt);
        attempt = attempt.saturating_add(1);
        if let Either::Right(_) = select(TimeoutFuture::new(delay), &mut stop).await {
            return;
        }
    }
}

async fn send(write: &mut SplitSink<WebSocket, Message>, text: String) -> Result<(), String> {
    write
        .send(Message::Text(text))
        .await
        .map_err(|err| err.to_string())
}
