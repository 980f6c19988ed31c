//! State and progression engine for an idle factory game.
//!
//! The engine owns a single [`sim::state::GameState`] and mutates it only
//! through [`sim::reducer::reduce`], a pure transition function applied
//! once per dispatched [`sim::intent::Intent`]. [`drivers::TickDrivers`]
//! synthesize the time-driven intents (production, market drift, random
//! events, achievement evaluation, autosave) on tokio timers, and
//! [`persist`] round-trips the whole state through pretty-printed JSON
//! save slots and export/import blobs.
//!
//! Presentation is an external collaborator: it reads snapshots via
//! [`engine::Engine::state`], renders derived views from [`sim::views`],
//! and dispatches intents by id.

pub mod drivers;
pub mod engine;
pub mod persist;
pub mod sim;

pub use engine::Engine;
pub use sim::catalog::EconomyConfig;
pub use sim::intent::{Intent, Signal};
pub use sim::state::GameState;
