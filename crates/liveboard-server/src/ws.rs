//! `WebSocket` handlers for real-time widget streaming.
//!
//! Each widget exposes its own endpoint (`/ws/life`, `/ws/checks`,
//! `/ws/anim`). A session first receives the widget's complete current
//! snapshot as one JSON text frame, then one frame per update the hub
//! broadcasts, in hub order.
//!
//! Every widget session is its own hub subscriber with a private
//! bounded delivery channel. A session that stops draining it is pruned
//! by the hub; the session then observes its stream ending and closes
//! the socket rather than resuming from a gap.
//!
//! The clock stream (`/ws/clock`) is the exception: its counter is
//! per-connection state, so it runs a private ticker and never touches
//! a hub.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use liveboard_core::{HubHandle, Widget};
use liveboard_types::ClockTick;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::state::AppState;

/// Period of the per-session clock stream.
const CLOCK_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Upgrade to a `WebSocket` streaming Game of Life board frames.
///
/// # Route
///
/// `GET /ws/life`
pub async fn ws_life(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_widget(socket, state.life.clone()))
}

/// Upgrade to a `WebSocket` streaming checkbox tile deltas.
///
/// # Route
///
/// `GET /ws/checks`
pub async fn ws_checks(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_widget(socket, state.checks.clone()))
}

/// Upgrade to a `WebSocket` streaming animation samples.
///
/// # Route
///
/// `GET /ws/anim`
pub async fn ws_anim(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_widget(socket, state.anim.clone()))
}

/// Upgrade to a `WebSocket` streaming a per-session tick counter.
///
/// # Route
///
/// `GET /ws/clock`
pub async fn ws_clock(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(stream_clock)
}

/// Run one clock session.
///
/// The counter belongs to this connection alone: it ticks every 100 ms
/// starting from 1 and dies with the socket. No hub, no snapshot.
async fn stream_clock(mut socket: WebSocket) {
    debug!("clock client connected");

    let mut ticker = tokio::time::interval(CLOCK_TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The interval's first tick completes immediately; swallow it so
    // count 1 arrives one full period after connecting.
    ticker.tick().await;

    let mut count: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                count = count.saturating_add(1);
                if !send_json(&mut socket, &ClockTick { count }).await {
                    debug!("clock client disconnected (send failed)");
                    return;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("clock client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!("clock client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore other message types (text, binary from client).
                    }
                }
            }
        }
    }
}

/// Run one streaming session against a widget hub.
///
/// Sends the current snapshot, registers as a subscriber, then forwards
/// every update until either side goes away. Dropping the subscription
/// on any exit path is what deregisters the session at the hub.
async fn stream_widget<W>(mut socket: WebSocket, hub: HubHandle<W>)
where
    W: Widget,
    W::Update: Serialize,
    W::Snapshot: Serialize,
{
    debug!(widget = W::NAME, "WebSocket client connected");

    // Initial frame: the complete current state.
    let snapshot = hub.snapshot().await;
    if !send_json(&mut socket, &snapshot).await {
        return;
    }

    let Ok(mut subscription) = hub.subscribe().await else {
        debug!(widget = W::NAME, "hub gone before subscribe");
        return;
    };

    loop {
        tokio::select! {
            // An update broadcast by the hub.
            update = subscription.next() => {
                match update {
                    Some(update) => {
                        if !send_json(&mut socket, &update).await {
                            debug!(widget = W::NAME, "WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    None => {
                        // Delivery channel closed: the hub pruned this
                        // subscriber or is shutting down.
                        debug!(widget = W::NAME, "delivery stream ended, closing session");
                        return;
                    }
                }
            }
            // Check if the client sent a close frame or disconnected.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(widget = W::NAME, "WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!(widget = W::NAME, "WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(widget = W::NAME, "WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore other message types (text, binary from client).
                    }
                }
            }
        }
    }
}

/// Serialize `payload` and send it as one text frame.
///
/// Returns `false` when the session should end.
async fn send_json<T: Serialize>(socket: &mut WebSocket, payload: &T) -> bool {
    let json = match serde_json::to_string(payload) {
        Ok(json) => json,
        Err(e) => {
            warn!("failed to serialize outbound frame: {e}");
            return false;
        }
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}
