//! Core dataflow primitives for reactive state management
//!
//! The bootstrap wires browser events into typed streams and keeps every
//! piece of mutable state behind a single owner. These primitives carry that
//! pattern and are independent of any particular coordinator.
//!
//! # Core Components
//!
//! - **[`Relay`]** - Type-safe event streaming using simple channels
//! - **[`Actor`]** - Single-value reactive state container
//! - **[`Atom`]** - Convenient wrapper for small UI flags
//!
//! # Architecture Principles
//!
//! 1. **No Raw Mutables** - Coordinator state lives in an Actor or Atom
//! 2. **Event-Source Naming** - Relays follow `{source}_{event}_relay`
//! 3. **Single Emitter** - Each relay is sent from one call site

pub mod actor;
pub mod atom;
pub mod relay;

pub use actor::Actor;
pub use atom::Atom;
pub use relay::{Relay, relay};
