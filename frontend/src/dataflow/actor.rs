//! Single-value Actor for coordinator state
//!
//! An Actor owns one `Mutable<T>` and mutates it exclusively from its
//! processor task, which consumes relay streams sequentially. Coordinators
//! (scroll restoration, loading indicator) keep their cells here so every
//! state change has one owner and one ordering.

use std::future::Future;
use std::sync::Arc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Single-value reactive state container.
///
/// - **Single Point of Mutation**: only the processor touches the state
/// - **Sequential Processing**: events are handled one at a time, in order
/// - **Signal Access**: readers bind to [`Actor::signal`], never to a getter
///
/// ```ignore
/// let (page_loaded_relay, mut page_loaded_stream) = relay::<()>();
///
/// let saved_offset = Actor::new(0.0_f64, async move |cell| {
///     while let Some(()) = page_loaded_stream.next().await {
///         cell.set_neq(0.0);
///     }
/// });
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    /// Dropping the last clone cancels the processor task.
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an Actor with its initial state and processor. The processor
    /// receives the state cell and typically loops over one or more relay
    /// streams with `select!`.
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Mutable::new(initial_state);

        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));

        Self { state, task_handle }
    }

    /// Reactive signal over the current state. The only read path.
    pub fn signal(&self) -> impl Signal<Item = T> {
        self.state.signal_cloned()
    }

    /// Signal over a projection of the state, avoiding clones of `T`.
    #[allow(dead_code)]
    pub fn signal_ref<U>(
        &self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> impl Signal<Item = U>
    where
        U: PartialEq + Send + Sync + 'static,
    {
        self.state.signal_ref(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::relay;
    use futures::{StreamExt, select};
    use zoon::SignalExt;

    #[tokio::test]
    async fn actor_applies_events_sequentially() {
        let (captured_relay, mut captured_stream) = relay();

        let cell = Actor::new(0.0_f64, async move |state| {
            while let Some(offset) = captured_stream.next().await {
                state.set_neq(offset);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        for offset in [120.0, 480.0] {
            captured_relay.send(offset);
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let value = cell.signal().to_stream().next().await.unwrap();
        assert_eq!(value, 480.0);
    }

    #[tokio::test]
    async fn actor_selects_across_streams() {
        let (store_relay, mut store_stream) = relay();
        let (reset_relay, mut reset_stream) = relay::<()>();

        let cell = Actor::new(0_u32, async move |state| {
            loop {
                select! {
                    stored = store_stream.next() => {
                        if let Some(value) = stored {
                            state.set_neq(value);
                        }
                    }
                    reset = reset_stream.next() => {
                        if reset.is_some() {
                            state.set_neq(0);
                        }
                    }
                }
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        store_relay.send(42);
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        reset_relay.send(());
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        let value = cell.signal().to_stream().next().await.unwrap();
        assert_eq!(value, 0);
    }
}
