//! Core types: players, configuration, zone counters, errors and the state
//! snapshot.
//!
//! Everything the resolution modules pass around lives here. The snapshot
//! in [`state`] is the only value the engine transforms.

pub mod player;
pub mod config;
pub mod zones;
pub mod error;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use config::{EngineConfig, Phase};
pub use zones::{Zone, ZoneCounts};
pub use error::{ResolutionError, Result};
pub use state::GameState;
