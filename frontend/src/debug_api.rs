//! Console debug api on the window object
//!
//! The live connection handle is deliberately reachable from the browser
//! console for manual inspection: toggle wire logging, simulate latency,
//! probe the round trip. An escape hatch, not part of the production
//! contract.

use crate::connection::ConnectionAdapter;
use crate::dataflow::Atom;
use crate::debug_utils;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub struct SocketDebugState {
    pub connection: ConnectionAdapter,
    pub session_accepted: Atom<bool>,
}

thread_local! {
    static SOCKET_DEBUG_STATE: RefCell<Option<SocketDebugState>> = const { RefCell::new(None) };
}

pub fn store_socket_debug_state(connection: ConnectionAdapter, session_accepted: Atom<bool>) {
    SOCKET_DEBUG_STATE.with(|cell| {
        *cell.borrow_mut() = Some(SocketDebugState {
            connection,
            session_accepted,
        });
    });
}

fn with_state<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&SocketDebugState) -> R,
{
    SOCKET_DEBUG_STATE.with(|cell| cell.borrow().as_ref().map(f))
}

#[wasm_bindgen]
pub fn expose_socket_debug_api() {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };

    let api = js_sys::Object::new();

    let enable_debug_closure =
        Closure::wrap(Box::new(|| debug_utils::set_debug_enabled(true)) as Box<dyn Fn()>);
    js_sys::Reflect::set(
        &api,
        &"enableDebug".into(),
        enable_debug_closure.as_ref().unchecked_ref(),
    )
    .ok();
    enable_debug_closure.forget();

    let disable_debug_closure =
        Closure::wrap(Box::new(|| debug_utils::set_debug_enabled(false)) as Box<dyn Fn()>);
    js_sys::Reflect::set(
        &api,
        &"disableDebug".into(),
        disable_debug_closure.as_ref().unchecked_ref(),
    )
    .ok();
    disable_debug_closure.forget();

    let enable_latency_closure = Closure::wrap(Box::new(|latency_ms: f64| {
        with_state(|state| state.connection.set_latency_sim(Some(latency_ms as u32)));
    }) as Box<dyn Fn(f64)>);
    js_sys::Reflect::set(
        &api,
        &"enableLatencySim".into(),
        enable_latency_closure.as_ref().unchecked_ref(),
    )
    .ok();
    enable_latency_closure.forget();

    let disable_latency_closure = Closure::wrap(Box::new(|| {
        with_state(|state| state.connection.set_latency_sim(None));
    }) as Box<dyn Fn()>);
    js_sys::Reflect::set(
        &api,
        &"disableLatencySim".into(),
        disable_latency_closure.as_ref().unchecked_ref(),
    )
    .ok();
    disable_latency_closure.forget();

    let is_connected_closure = Closure::wrap(Box::new(|| {
        with_state(|state| state.session_accepted.get_cloned()).unwrap_or(false)
    }) as Box<dyn Fn() -> bool>);
    js_sys::Reflect::set(
        &api,
        &"isConnected".into(),
        is_connected_closure.as_ref().unchecked_ref(),
    )
    .ok();
    is_connected_closure.forget();

    let ping_closure = Closure::wrap(Box::new(|| {
        with_state(|state| state.connection.send_ping());
    }) as Box<dyn Fn()>);
    js_sys::Reflect::set(&api, &"ping".into(), ping_closure.as_ref().unchecked_ref()).ok();
    ping_closure.forget();

    js_sys::Reflect::set(&window, &"__pagelift_socket".into(), &api).ok();

    zoon::println!("[PAGELIFT] socket debug api exposed on window.__pagelift_socket");
}
