//! # Arena Match Engine
//!
//! One [`MatchState`] per match, stepped with [`MatchState::advance`].
//!
//! ```text
//!  TeamCommands ──► control ──┐
//!                             ├─► physics ──► possession ──► TickSnapshot + events
//!  match RNG ─────► ai ───────┘
//! ```
//!
//! Leaves first: `types`, `field`, `body`, `steering`, `physics`,
//! `possession`, `ai`, `control`, `match_state`, `simulation`.

pub mod ai;
pub mod body;
pub mod config;
pub mod control;
pub mod events;
pub mod field;
pub mod match_state;
pub mod physics;
pub mod physics_constants;
pub mod possession;
pub mod simulation;
pub mod snapshot;
pub mod steering;
pub mod timestep;
pub mod types;

#[cfg(test)]
mod contract_tests;

pub use body::{BallOwner, BodyRef, Role, Team, TEAM_SIZE};
pub use config::MatchConfig;
pub use control::ControlCommand;
pub use events::MatchEvent;
pub use field::{FieldGeometry, GoalSide};
pub use match_state::{MatchPhase, MatchState, Score};
pub use simulation::{advance, TeamCommands, TickOutput};
pub use snapshot::TickSnapshot;
pub use types::Vec2;
