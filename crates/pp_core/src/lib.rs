//! # pp_core - Deterministic Arena Soccer Match Engine
//!
//! Real-time 5-a-side arcade soccer: ten field players, two goalkeepers and
//! a ball, stepped by a host at its own frame rate.
//!
//! ## Features
//! - Deterministic simulation (same seed and inputs = same snapshots)
//! - Optional human control per team, AI for everyone else
//! - Serde snapshots and events for any renderer
//! - JSON/YAML tuning with presets
//!
//! ```rust
//! use pp_core::{MatchConfig, MatchState, TeamCommands};
//!
//! let mut state = MatchState::new(MatchConfig::default()).unwrap();
//! let out = state.advance(&TeamCommands::none(), 1.0 / 60.0);
//! assert_eq!(out.snapshot.tick, 1);
//! ```

// Engine APIs thread state, config and RNG through many helpers
#![allow(clippy::too_many_arguments)]
// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used in tests and presets
#![allow(clippy::field_reassign_with_default)]

pub mod engine;
pub mod error;

pub use engine::{
    advance, BallOwner, BodyRef, ControlCommand, FieldGeometry, GoalSide, MatchConfig, MatchEvent,
    MatchPhase, MatchState, Role, Score, Team, TeamCommands, TickOutput, TickSnapshot, Vec2,
    TEAM_SIZE,
};
pub use error::{CoreError, Result};

/// Library version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
