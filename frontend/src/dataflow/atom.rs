//! Atom wrapper for small UI flags
//!
//! Debug toggles and connection flags don't deserve a hand-rolled actor
//! each; Atom wraps the Actor+Relay pair behind set/signal so those flags
//! still have a single owner.

use crate::dataflow::{Actor, Relay, relay};
use futures::StreamExt;
use zoon::Signal;

#[derive(Clone, Debug)]
enum AtomUpdate<T> {
    Set(T),
    SetNeq(T),
}

/// Single-owner wrapper for local flags (debug logging on/off, simulated
/// latency, session accepted). Uses an Actor internally so updates flow
/// through the same sequential processing as everything else.
#[derive(Clone, Debug)]
pub struct Atom<T>
where
    T: Clone + Send + Sync + 'static,
{
    actor: Actor<T>,
    setter: Relay<AtomUpdate<T>>,
    current: zoon::Mutable<T>,
}

impl<T> Atom<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self
    where
        T: PartialEq,
    {
        let (setter, mut setter_stream) = relay();
        let current = zoon::Mutable::new(initial.clone());
        let current_for_actor = current.clone();

        let actor = Actor::new(initial, async move |state| {
            while let Some(update) = setter_stream.next().await {
                match update {
                    AtomUpdate::Set(new_value) => {
                        current_for_actor.set(new_value.clone());
                        state.set(new_value);
                    }
                    AtomUpdate::SetNeq(new_value) => {
                        current_for_actor.set_neq(new_value.clone());
                        state.set_neq(new_value);
                    }
                }
            }
        });

        Self {
            actor,
            setter,
            current,
        }
    }

    // Both setters go through one call site so the relay keeps a single
    // emitter location.
    fn send_update(&self, update: AtomUpdate<T>) {
        self.setter.send(update);
    }

    pub fn set(&self, value: T) {
        self.send_update(AtomUpdate::Set(value));
    }

    /// Update only when the value differs, suppressing redundant signal
    /// emissions.
    pub fn set_neq(&self, value: T)
    where
        T: PartialEq,
    {
        self.send_update(AtomUpdate::SetNeq(value));
    }

    /// Reactive signal over the current value. The primary read path.
    #[allow(dead_code)]
    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.actor.signal()
    }

    /// Immediate read for event handlers, where signal-based access isn't
    /// practical (a wasm-bindgen closure or a send path deciding whether to
    /// log). Use sparingly.
    pub fn get_cloned(&self) -> T {
        self.current.lock_ref().clone()
    }
}

impl<T> Default for Atom<T>
where
    T: Clone + Send + Sync + Default + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn atom_updates_are_observable() {
        let debug_enabled = Atom::new(false);
        assert!(!debug_enabled.get_cloned());

        debug_enabled.set(true);
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        assert!(debug_enabled.get_cloned());
    }

    #[tokio::test]
    async fn atom_default_matches_type_default() {
        let latency: Atom<Option<u32>> = Atom::default();
        assert_eq!(latency.get_cloned(), None);
    }
}
