//! Declarative element behaviors
//!
//! Server-rendered pages opt elements into client behavior with CSS
//! classes; the registry attaches every registered behavior to matching
//! elements at startup and again after each page swap (swapped bodies carry
//! fresh elements). Attachment is marked on the element so a behavior never
//! wires the same node twice.

use crate::dataflow::{Actor, Relay, relay};
use futures::StreamExt;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use zoon::SendWrapper;

pub mod hover_inspector;

const WIRED_MARKER_ATTR: &str = "data-behavior-wired";

/// One client behavior: a selector and what to do with each matching
/// element, once.
pub trait Behavior {
    fn selector(&self) -> &'static str;
    fn attach(&self, element: &web_sys::Element);
}

/// Attaches behaviors at startup and after every page load.
pub struct BehaviorRegistry {
    behaviors: SendWrapper<Rc<Vec<Box<dyn Behavior>>>>,
    pub page_loaded_relay: Relay<()>,
    _reattach: Actor<()>,
}

impl BehaviorRegistry {
    pub fn new(behaviors: Vec<Box<dyn Behavior>>) -> Self {
        let behaviors = SendWrapper::new(Rc::new(behaviors));
        let (page_loaded_relay, mut page_loaded_stream) = relay::<()>();

        let behaviors_for_reattach = behaviors.clone();
        let _reattach = Actor::new((), async move |_state| {
            while let Some(()) = page_loaded_stream.next().await {
                attach_all(&behaviors_for_reattach);
            }
        });

        Self {
            behaviors,
            page_loaded_relay,
            _reattach,
        }
    }

    /// Initial attachment pass, before the first navigation.
    pub fn attach_now(&self) {
        attach_all(&self.behaviors);
    }
}

fn attach_all(behaviors: &Rc<Vec<Box<dyn Behavior>>>) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    for behavior in behaviors.iter() {
        let matches = document.query_selector_all(behavior.selector()).unwrap();
        for index in 0..matches.length() {
            let Some(node) = matches.item(index) else {
                continue;
            };
            let Ok(element) = node.dyn_into::<web_sys::Element>() else {
                continue;
            };
            if element.has_attribute(WIRED_MARKER_ATTR) {
                continue;
            }
            element.set_attribute(WIRED_MARKER_ATTR, "").unwrap();
            behavior.attach(&element);
        }
    }
}
