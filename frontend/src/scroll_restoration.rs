//! Scroll-Restoration Coordinator
//!
//! Preserves the document's vertical scroll offset across a page swap when
//! the outgoing link opts in with `data-turbo-preserve-scroll`. One `f64`
//! cell, owned by an actor: written on link activation, consumed on page
//! load, reset to zero afterwards.

use crate::dataflow::{Actor, Relay, relay};
use futures::{StreamExt, select};
use wasm_bindgen::JsCast;

/// A navigation link was activated. `preserve_scroll` is the opt-in marker
/// resolved once at event time; `scroll_top` is the document offset read in
/// the same tick, before the navigation library touches the page.
#[derive(Clone, Copy, Debug)]
pub struct LinkActivation {
    pub preserve_scroll: bool,
    pub scroll_top: f64,
}

/// Where restored offsets are applied. The DOM implementation targets the
/// document's scrolling element; tests substitute a recording fake.
pub trait ScrollViewport: Send + Sync + 'static {
    fn restore(&self, offset: f64);
}

/// Applies offsets to `document.scrollingElement`. The element is assumed
/// present for the page lifetime; a missing document means the page is gone
/// and there is nothing left to scroll.
pub struct DomScrollViewport;

impl ScrollViewport for DomScrollViewport {
    fn restore(&self, offset: f64) {
        if let Some(scrolling_el) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.scrolling_element())
        {
            scrolling_el.scroll_to_with_x_and_y(0.0, offset);
        }
    }
}

/// Reads the current document scroll offset. Used by the lifecycle layer at
/// link-activation time, synchronously in the event handler.
pub fn current_scroll_top() -> f64 {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.scrolling_element())
        .map(|scrolling_el| scrolling_el.scroll_top() as f64)
        .unwrap_or(0.0)
}

/// Resolve the opt-in marker on an activated element.
pub fn wants_scroll_preserved(target: &web_sys::EventTarget) -> bool {
    target
        .dyn_ref::<web_sys::Element>()
        .is_some_and(|element| element.has_attribute("data-turbo-preserve-scroll"))
}

/// Coordinator owning the saved-offset cell.
///
/// Zero means "nothing to restore": a page loaded at the top stays wherever
/// it naturally renders, and an offset captured at exactly zero is
/// indistinguishable from no capture (the original behavior, kept).
#[derive(Clone)]
pub struct ScrollRestoration {
    pub saved_offset: Actor<f64>,
    pub link_activated_relay: Relay<LinkActivation>,
    pub page_loaded_relay: Relay<()>,
}

impl ScrollRestoration {
    pub fn new(viewport: impl ScrollViewport) -> Self {
        let (link_activated_relay, mut link_activated_stream) = relay::<LinkActivation>();
        let (page_loaded_relay, mut page_loaded_stream) = relay::<()>();

        let saved_offset = Actor::new(0.0_f64, async move |cell| {
            loop {
                select! {
                    activation = link_activated_stream.next() => {
                        match activation {
                            Some(LinkActivation { preserve_scroll: true, scroll_top }) => {
                                cell.set_neq(scroll_top);
                            }
                            // No marker: the cell keeps its prior value.
                            Some(LinkActivation { preserve_scroll: false, .. }) => {}
                            None => break,
                        }
                    }
                    loaded = page_loaded_stream.next() => {
                        match loaded {
                            Some(()) => {
                                let offset = cell.get();
                                if offset != 0.0 {
                                    viewport.restore(offset);
                                    cell.set_neq(0.0);
                                }
                            }
                            None => break,
                        }
                    }
                }
            }
        });

        Self {
            saved_offset,
            link_activated_relay,
            page_loaded_relay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingViewport {
        restored: Arc<Mutex<Vec<f64>>>,
    }

    impl ScrollViewport for RecordingViewport {
        fn restore(&self, offset: f64) {
            self.restored.lock().unwrap().push(offset);
        }
    }

    async fn settle() {
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    #[tokio::test]
    async fn opted_in_offset_is_restored_once() {
        let viewport = RecordingViewport::default();
        let coordinator = ScrollRestoration::new(viewport.clone());
        let activate = |activation| coordinator.link_activated_relay.send(activation);
        let load = || coordinator.page_loaded_relay.send(());

        activate(LinkActivation {
            preserve_scroll: true,
            scroll_top: 480.0,
        });
        settle().await;
        load();
        settle().await;

        assert_eq!(*viewport.restored.lock().unwrap(), vec![480.0]);

        // The cell reset to zero: a second load restores nothing.
        load();
        settle().await;

        assert_eq!(*viewport.restored.lock().unwrap(), vec![480.0]);
    }

    #[tokio::test]
    async fn unmarked_link_leaves_new_page_alone() {
        let viewport = RecordingViewport::default();
        let coordinator = ScrollRestoration::new(viewport.clone());

        coordinator.link_activated_relay.send(LinkActivation {
            preserve_scroll: false,
            scroll_top: 320.0,
        });
        settle().await;
        coordinator.page_loaded_relay.send(());
        settle().await;

        assert!(viewport.restored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unmarked_link_keeps_prior_capture() {
        let viewport = RecordingViewport::default();
        let coordinator = ScrollRestoration::new(viewport.clone());
        let activate = |activation| coordinator.link_activated_relay.send(activation);

        activate(LinkActivation {
            preserve_scroll: true,
            scroll_top: 200.0,
        });
        activate(LinkActivation {
            preserve_scroll: false,
            scroll_top: 999.0,
        });
        settle().await;
        coordinator.page_loaded_relay.send(());
        settle().await;

        assert_eq!(*viewport.restored.lock().unwrap(), vec![200.0]);
    }

    #[tokio::test]
    async fn zero_capture_means_nothing_to_restore() {
        let viewport = RecordingViewport::default();
        let coordinator = ScrollRestoration::new(viewport.clone());

        coordinator.link_activated_relay.send(LinkActivation {
            preserve_scroll: true,
            scroll_top: 0.0,
        });
        settle().await;
        coordinator.page_loaded_relay.send(());
        settle().await;

        assert!(viewport.restored.lock().unwrap().is_empty());
    }
}
