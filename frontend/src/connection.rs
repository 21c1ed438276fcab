//! Realtime connection bootstrap
//!
//! One connection to the server-driven view layer, opened at startup and
//! held for the page lifetime. Reconnection, heartbeats and transport
//! fallback are internal to the transport; this layer only announces the
//! session, forwards traffic, and carries the console debug hooks
//! (latency simulation, wire logging).

use crate::dataflow::{Actor, Atom};
use crate::debug_utils;
use futures::StreamExt;
use shared::{DownMsg, UpMsg};
use std::sync::Arc;
use zoon::*;

/// Send-path wrapper around the shared connection handle.
#[derive(Clone)]
pub struct ConnectionAdapter {
    connection: Arc<SendWrapper<Connection<UpMsg, DownMsg>>>,
    latency_sim_ms: Atom<Option<u32>>,
}

impl ConnectionAdapter {
    fn new() -> (Self, impl futures::stream::Stream<Item = DownMsg> + Unpin) {
        let (message_sender, message_stream) = futures::channel::mpsc::unbounded();

        let connection = Connection::new(move |down_msg, _| {
            debug_utils::wire_log(&format!("<- {:?}", down_msg));
            let _ = message_sender.unbounded_send(down_msg);
        });

        let adapter = ConnectionAdapter {
            connection: Arc::new(SendWrapper::new(connection)),
            latency_sim_ms: Atom::new(None),
        };
        (adapter, message_stream)
    }

    pub async fn send_up_msg(&self, up_msg: UpMsg) {
        if let Some(latency_ms) = self.latency_sim_ms.get_cloned() {
            Timer::sleep(latency_ms).await;
        }
        debug_utils::wire_log(&format!("-> {:?}", up_msg));
        if let Err(error) = self.connection.send_up_msg(up_msg).await {
            zoon::println!("[CONNECTION] failed to send message: {:?}", error);
        }
    }

    /// Console escape hatch: delay every outgoing message by `latency_ms`.
    pub fn set_latency_sim(&self, latency_ms: Option<u32>) {
        match latency_ms {
            Some(ms) => zoon::println!("[CONNECTION] latency simulation on: {}ms", ms),
            None => zoon::println!("[CONNECTION] latency simulation off"),
        }
        self.latency_sim_ms.set(latency_ms);
    }

    /// Announce the session with the page's csrf token. The transport has
    /// no token parameter, so the token rides the first up-message.
    pub fn announce_session(&self, csrf_token: String) {
        let adapter = self.clone();
        Task::start(async move {
            adapter.send_up_msg(UpMsg::SessionJoined { csrf_token }).await;
        });
    }

    /// Console round-trip probe; the measured time is logged when the
    /// matching `Pong` arrives.
    pub fn send_ping(&self) {
        let Some(sent_at_ms) = now_ms() else { return };
        let adapter = self.clone();
        Task::start(async move {
            adapter.send_up_msg(UpMsg::Ping { sent_at_ms }).await;
        });
    }
}

/// Open the connection and start the down-message processor. Returns the
/// send adapter, the session-accepted flag, and the processor actor whose
/// handle keeps it alive.
pub fn create_connection_message_handler() -> (ConnectionAdapter, Atom<bool>, Actor<()>) {
    let (adapter, mut down_msg_stream) = ConnectionAdapter::new();
    let session_accepted = Atom::new(false);

    let session_accepted_for_handler = session_accepted.clone();
    let message_handler = Actor::new((), async move |_state| {
        while let Some(down_msg) = down_msg_stream.next().await {
            handle_down_msg(down_msg, &session_accepted_for_handler);
        }
    });

    (adapter, session_accepted, message_handler)
}

fn handle_down_msg(down_msg: DownMsg, session_accepted: &Atom<bool>) {
    match down_msg {
        DownMsg::SessionAccepted => {
            session_accepted.set_neq(true);
            zoon::println!("[CONNECTION] session accepted");
        }
        DownMsg::Pong { sent_at_ms } => {
            if let Some(now) = now_ms() {
                zoon::println!("[CONNECTION] pong after {:.1}ms", now - sent_at_ms);
            }
        }
        DownMsg::ViewPatch { target, html } => {
            // The view layer consuming patches is external; until one
            // subscribes they are only observable through wire logging.
            debug_utils::wire_log(&format!(
                "view patch for '{}' ({} bytes)",
                target,
                html.len()
            ));
        }
        DownMsg::Diagnostic { level, message } => {
            zoon::println!("[SERVER {}] {}", level, message);
        }
    }
}

fn now_ms() -> Option<f64> {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
}
