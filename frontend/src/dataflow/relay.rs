//! Event streaming Relay built on unbounded channels
//!
//! A Relay is the typed edge between a DOM event listener and the
//! coordinator that reacts to it. Listeners push, exactly one actor
//! processes the stream.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, OnceLock};

/// Type-safe event stream from UI/DOM sources into coordinator actors.
///
/// Relays follow the `{source}_{event}_relay` naming pattern:
/// - `link_activated_relay` - user activated a navigation link
/// - `page_loaded_relay` - navigation library finished a page swap
/// - `loading_started_relay` - view layer began loading a page
///
/// Sending never blocks; if the receiving actor is gone the event is
/// silently discarded, which is the correct teardown behavior for a
/// page-lifetime component.
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

/// Error type for Relay operations
#[derive(Debug, Clone)]
pub enum RelayError {
    /// The channel has been closed (receiver dropped)
    ChannelClosed,
    /// Relay send called from multiple locations (debug builds only)
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new Relay with its receiver stream, following Rust's
    /// channel conventions. Prefer the [`relay()`] function.
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    /// Enforce the single-emitter constraint in debug builds. A relay sent
    /// from two call sites hides who produced an event, which is exactly the
    /// ambiguity this layer exists to remove.
    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        let previous = *self.emit_location.get_or_init(|| caller);
        if previous == caller {
            Ok(())
        } else {
            Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            })
        }
    }

    /// Send an event through the relay.
    ///
    /// If the receiver has been dropped the event is discarded. In debug
    /// builds, panics when called from a second source location.
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(e) = self.check_single_source() {
            panic!("{:?}", e);
        }

        let _ = self.sender.unbounded_send(value);
    }

    /// Send with explicit error handling. Returns an error when the channel
    /// is closed, or (debug builds) when the single-emitter rule is broken.
    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

impl<T> Default for Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// A disconnected relay: events are silently discarded. Useful as a
    /// placeholder before wiring, and in tests that don't care about a
    /// particular event source.
    fn default() -> Self {
        let (relay, _receiver) = Self::new();
        relay
    }
}

/// Create a Relay together with its receiver stream.
///
/// ```ignore
/// let (page_loaded_relay, mut page_loaded_stream) = relay::<()>();
/// page_loaded_relay.send(());
/// while let Some(()) = page_loaded_stream.next().await { /* react */ }
/// ```
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn relay_delivers_events_in_order() {
        let (relay, mut receiver) = Relay::new();

        // One call site; the single-emitter rule counts locations, not calls.
        for msg in ["first", "second"] {
            relay.send(msg.to_string());
        }

        assert_eq!(receiver.next().await, Some("first".to_string()));
        assert_eq!(receiver.next().await, Some("second".to_string()));
    }

    #[tokio::test]
    async fn try_send_succeeds_while_receiver_lives() {
        let (relay, mut receiver) = Relay::new();

        assert!(relay.try_send(1_u32).is_ok());
        assert_eq!(receiver.next().await, Some(1));
    }

    #[tokio::test]
    async fn try_send_reports_closed_channel() {
        let (relay, receiver) = Relay::<u32>::new();
        drop(receiver);

        assert!(matches!(relay.try_send(2), Err(RelayError::ChannelClosed)));
    }

    #[tokio::test]
    async fn disconnected_relay_discards_silently() {
        let relay = Relay::<u32>::default();
        relay.send(7);
    }
}
