//! MiniFrame: a real-time, anytime, best-first search engine for finite
//! turn-based or simultaneous multi-actor decision problems.
//!
//! Given a user-supplied [`Model`] — a status type with a transition
//! function, a terminal predicate, a per-actor evaluation function, a
//! sameness predicate, and a disposability hint — [`Engine`] incrementally
//! builds a directed graph of reachable world states, propagates per-actor
//! forecast values backward from leaves to the current world, and exposes
//! the best outgoing transition for any actor at the current world.
//!
//! # Key types
//!
//! - [`Model`] — the contract user code implements
//! - [`Engine`] — the search engine: current world, graph, and policy
//! - [`World`] / [`Transition`] — graph node and edge
//! - [`Policy`] — budget, depth bound, ordering, and pruning configuration
//! - [`Telemetry`] — read-only introspection snapshot

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
mod expander;
mod frontier;
mod lifecycle;
pub mod model;
pub mod policy;
mod propagator;
pub mod rng;
#[cfg(test)]
mod test_support;
pub mod telemetry;
pub mod transition;
pub mod world;
mod world_index;

pub use engine::Engine;
pub use error::MiniFrameError;
pub use model::{Model, Sente};
pub use policy::{ExpansionOrder, Policy};
pub use rng::{SamplingSource, StdRngSource, ThreadRngSource};
pub use telemetry::Telemetry;
pub use transition::{Destination, Transition, TransitionHandle};
pub use world::{World, WorldHandle};
