//! Loading-Indicator Coordinator
//!
//! Shows a progress bar while the view layer loads a page, with a display
//! delay so fast navigations never flash it. Stop hides immediately and
//! unconditionally: overlapping loads are not reference counted, last stop
//! wins (kept as specified, see the overlapping-loads test).
//!
//! Transitions live in [`IndicatorMachine`] so the delay logic is testable
//! without a browser; the actor interprets the resulting effects against
//! the DOM bar and a cancelable timeout.

use crate::dataflow::{Actor, Relay, relay};
use futures::{StreamExt, select};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use zoon::SendWrapper;

/// The bar surface. DOM implementation below; tests record calls.
pub trait ProgressBar: Send + Sync + 'static {
    fn show(&self);
    fn hide(&self);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IndicatorPhase {
    /// No load in flight, bar hidden.
    Idle,
    /// Load started, display delay running, bar still hidden.
    Waiting,
    /// Delay elapsed with the load still in flight, bar shown.
    Visible,
}

#[derive(Clone, Copy, Debug)]
pub enum IndicatorEvent {
    LoadingStarted,
    LoadingStopped,
    /// The armed delay fired. Carries the generation it was armed for so a
    /// timeout that outlived its load is discarded.
    DelayElapsed(u64),
}

#[derive(Debug, PartialEq, Eq)]
pub enum IndicatorEffect {
    ArmDelay(u64),
    CancelDelay,
    ShowBar,
    HideBar,
}

/// Pure transition core: phase x event -> effects.
pub struct IndicatorMachine {
    phase: IndicatorPhase,
    generation: u64,
}

impl IndicatorMachine {
    pub fn new() -> Self {
        Self {
            phase: IndicatorPhase::Idle,
            generation: 0,
        }
    }

    pub fn phase(&self) -> IndicatorPhase {
        self.phase
    }

    pub fn apply(&mut self, event: IndicatorEvent) -> Vec<IndicatorEffect> {
        match event {
            IndicatorEvent::LoadingStarted => match self.phase {
                IndicatorPhase::Idle => {
                    self.generation += 1;
                    self.phase = IndicatorPhase::Waiting;
                    vec![IndicatorEffect::ArmDelay(self.generation)]
                }
                // A load is already in flight; the delay keeps running.
                IndicatorPhase::Waiting | IndicatorPhase::Visible => vec![],
            },
            IndicatorEvent::LoadingStopped => {
                // Unconditional hide, no reference counting.
                self.phase = IndicatorPhase::Idle;
                vec![IndicatorEffect::CancelDelay, IndicatorEffect::HideBar]
            }
            IndicatorEvent::DelayElapsed(generation) => {
                if self.phase == IndicatorPhase::Waiting && generation == self.generation {
                    self.phase = IndicatorPhase::Visible;
                    vec![IndicatorEffect::ShowBar]
                } else {
                    vec![]
                }
            }
        }
    }
}

impl Default for IndicatorMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed bar across the top of the page, toggled through opacity so the
/// CSS transition can fade it.
pub struct DomProgressBar {
    element: SendWrapper<web_sys::HtmlElement>,
}

impl DomProgressBar {
    /// Create the bar element and append it to the body, hidden. The body
    /// is a startup precondition.
    pub fn mount() -> Self {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document unavailable at startup");
        let element: web_sys::HtmlElement = document
            .create_element("div")
            .unwrap()
            .dyn_into()
            .unwrap();
        element.set_id("page-loading-bar");

        let style = element.style();
        style.set_property("position", "fixed").unwrap();
        style.set_property("top", "0").unwrap();
        style.set_property("left", "0").unwrap();
        style.set_property("right", "0").unwrap();
        style.set_property("height", "3px").unwrap();
        style.set_property("background", "#2299dd").unwrap();
        style.set_property("z-index", "9999").unwrap();
        style.set_property("pointer-events", "none").unwrap();
        style.set_property("opacity", "0").unwrap();
        style
            .set_property("transition", "opacity 150ms ease-out")
            .unwrap();

        document
            .body()
            .expect("document body missing at startup")
            .append_child(&element)
            .unwrap();

        Self {
            element: SendWrapper::new(element),
        }
    }
}

impl ProgressBar for DomProgressBar {
    fn show(&self) {
        self.element.style().set_property("opacity", "1").unwrap();
    }

    fn hide(&self) {
        self.element.style().set_property("opacity", "0").unwrap();
    }
}

/// Coordinator driving the bar from the view layer's loading signals.
#[derive(Clone)]
pub struct LoadingIndicator {
    pub phase: Actor<IndicatorPhase>,
    pub loading_started_relay: Relay<()>,
    pub loading_stopped_relay: Relay<()>,
    delay_elapsed_relay: Relay<u64>,
}

impl LoadingIndicator {
    pub fn new(bar: impl ProgressBar, display_delay_ms: u32) -> Self {
        let (loading_started_relay, mut loading_started_stream) = relay::<()>();
        let (loading_stopped_relay, mut loading_stopped_stream) = relay::<()>();
        let (delay_elapsed_relay, mut delay_elapsed_stream) = relay::<u64>();

        let delay_relay_for_timeout = delay_elapsed_relay.clone();
        // Cancel slot for the armed timeout, UI-thread only.
        let delay_slot: SendWrapper<Rc<RefCell<Option<Timeout>>>> =
            SendWrapper::new(Rc::new(RefCell::new(None)));

        let phase = Actor::new(IndicatorPhase::Idle, async move |cell| {
            let mut machine = IndicatorMachine::new();
            loop {
                let event = select! {
                    started = loading_started_stream.next() => match started {
                        Some(()) => IndicatorEvent::LoadingStarted,
                        None => break,
                    },
                    stopped = loading_stopped_stream.next() => match stopped {
                        Some(()) => IndicatorEvent::LoadingStopped,
                        None => break,
                    },
                    elapsed = delay_elapsed_stream.next() => match elapsed {
                        Some(generation) => IndicatorEvent::DelayElapsed(generation),
                        None => break,
                    },
                };

                for effect in machine.apply(event) {
                    match effect {
                        IndicatorEffect::ArmDelay(generation) => {
                            let delay_relay = delay_relay_for_timeout.clone();
                            let timeout = Timeout::new(display_delay_ms, move || {
                                delay_relay.send(generation);
                            });
                            if let Some(previous) = delay_slot.borrow_mut().replace(timeout) {
                                previous.cancel();
                            }
                        }
                        IndicatorEffect::CancelDelay => {
                            if let Some(timeout) = delay_slot.borrow_mut().take() {
                                timeout.cancel();
                            }
                        }
                        IndicatorEffect::ShowBar => bar.show(),
                        IndicatorEffect::HideBar => bar.hide(),
                    }
                }
                cell.set_neq(machine.phase());
            }
        });

        Self {
            phase,
            loading_started_relay,
            loading_stopped_relay,
            delay_elapsed_relay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_shows_after_delay_and_hides_on_stop() {
        let mut machine = IndicatorMachine::new();

        assert_eq!(
            machine.apply(IndicatorEvent::LoadingStarted),
            vec![IndicatorEffect::ArmDelay(1)]
        );
        assert_eq!(machine.phase(), IndicatorPhase::Waiting);

        assert_eq!(
            machine.apply(IndicatorEvent::DelayElapsed(1)),
            vec![IndicatorEffect::ShowBar]
        );
        assert_eq!(machine.phase(), IndicatorPhase::Visible);

        assert_eq!(
            machine.apply(IndicatorEvent::LoadingStopped),
            vec![IndicatorEffect::CancelDelay, IndicatorEffect::HideBar]
        );
        assert_eq!(machine.phase(), IndicatorPhase::Idle);
    }

    #[test]
    fn fast_navigation_never_shows_the_bar() {
        let mut machine = IndicatorMachine::new();

        machine.apply(IndicatorEvent::LoadingStarted);
        // Stop lands before the display delay fires.
        assert_eq!(
            machine.apply(IndicatorEvent::LoadingStopped),
            vec![IndicatorEffect::CancelDelay, IndicatorEffect::HideBar]
        );

        // The canceled timeout may still fire once; it must not show.
        assert_eq!(machine.apply(IndicatorEvent::DelayElapsed(1)), vec![]);
        assert_eq!(machine.phase(), IndicatorPhase::Idle);
    }

    #[test]
    fn stale_delay_from_previous_load_is_discarded() {
        let mut machine = IndicatorMachine::new();

        machine.apply(IndicatorEvent::LoadingStarted);
        machine.apply(IndicatorEvent::LoadingStopped);
        assert_eq!(
            machine.apply(IndicatorEvent::LoadingStarted),
            vec![IndicatorEffect::ArmDelay(2)]
        );

        assert_eq!(machine.apply(IndicatorEvent::DelayElapsed(1)), vec![]);
        assert_eq!(
            machine.apply(IndicatorEvent::DelayElapsed(2)),
            vec![IndicatorEffect::ShowBar]
        );
    }

    #[test]
    fn stop_hides_even_when_already_idle() {
        let mut machine = IndicatorMachine::new();

        assert_eq!(
            machine.apply(IndicatorEvent::LoadingStopped),
            vec![IndicatorEffect::CancelDelay, IndicatorEffect::HideBar]
        );
    }

    // Known edge case, kept as specified rather than fixed: with two loads
    // in flight, the first stop hides the bar even though the second load
    // has not finished. There is no reference counting.
    #[test]
    fn overlapping_loads_hide_on_first_stop() {
        let mut machine = IndicatorMachine::new();

        machine.apply(IndicatorEvent::LoadingStarted);
        machine.apply(IndicatorEvent::DelayElapsed(1));
        assert_eq!(machine.phase(), IndicatorPhase::Visible);

        // Second load while the bar is visible: no new delay is armed.
        assert_eq!(machine.apply(IndicatorEvent::LoadingStarted), vec![]);

        assert_eq!(
            machine.apply(IndicatorEvent::LoadingStopped),
            vec![IndicatorEffect::CancelDelay, IndicatorEffect::HideBar]
        );
        assert_eq!(machine.phase(), IndicatorPhase::Idle);
    }
}
