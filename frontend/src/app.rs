//! PageliftApp - bootstrap wiring for the server-rendered page
//!
//! Constructs every coordinator, opens the server connection, and wires
//! the window lifecycle listeners. Held alive for the page lifetime by the
//! entry point; dropping it would cancel every processor task.

use crate::behaviors::hover_inspector::HoverInspector;
use crate::behaviors::{Behavior, BehaviorRegistry};
use crate::config::{self, BootstrapConfig};
use crate::connection::{self, ConnectionAdapter};
use crate::dataflow::{Actor, Atom};
use crate::lifecycle;
use crate::loading_indicator::{DomProgressBar, LoadingIndicator};
use crate::scroll_restoration::{DomScrollViewport, ScrollRestoration};

// Fields exist to own the coordinator tasks for the page lifetime; most are
// never read back after wiring.
#[allow(dead_code)]
pub struct PageliftApp {
    pub config: BootstrapConfig,
    pub scroll_restoration: ScrollRestoration,
    pub loading_indicator: LoadingIndicator,
    pub behaviors: BehaviorRegistry,
    pub connection: ConnectionAdapter,
    pub session_accepted: Atom<bool>,
    _connection_message_handler: Actor<()>,
}

impl PageliftApp {
    pub async fn new() -> Self {
        let config = BootstrapConfig::from_document();

        // Fatal startup precondition: every served page carries the token.
        let csrf_token = config::required_meta("csrf-token");

        let scroll_restoration = ScrollRestoration::new(DomScrollViewport);
        let loading_indicator =
            LoadingIndicator::new(DomProgressBar::mount(), config.progress_delay_ms);

        let hover_inspector: Box<dyn Behavior> = Box::new(HoverInspector {
            offset_px: config.tooltip_offset_px,
        });
        let behaviors = BehaviorRegistry::new(vec![hover_inspector]);
        behaviors.attach_now();

        let (connection, session_accepted, connection_message_handler) =
            connection::create_connection_message_handler();
        connection.announce_session(csrf_token);

        lifecycle::install_window_listeners(&scroll_restoration, &loading_indicator, &behaviors);

        zoon::println!("[PAGELIFT] bootstrap complete");

        PageliftApp {
            config,
            scroll_restoration,
            loading_indicator,
            behaviors,
            connection,
            session_accepted,
            _connection_message_handler: connection_message_handler,
        }
    }
}
