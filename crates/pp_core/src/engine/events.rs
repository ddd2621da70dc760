//! Host-facing match events.
//!
//! Emitted per tick as a side channel next to the snapshot. The core never
//! reads them back; hosts use them for effects, sounds and result logging.

use serde::{Deserialize, Serialize};

use super::body::Team;
use super::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    /// Ball's leading edge entered a goal mouth
    Goal { scoring_team: Team },
    /// Possession changed team (interception, keeper claim or tackle)
    Turnover { to_team: Team },
    /// A tackle connected
    Tackle { at_position: Vec2 },
    /// Entities reset; `team` holds the ball
    Kickoff { team: Team },
    Dash { team: Team, at_position: Vec2 },
    WallBounce { at_position: Vec2 },
}

impl MatchEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            MatchEvent::Goal { .. } => "goal",
            MatchEvent::Turnover { .. } => "turnover",
            MatchEvent::Tackle { .. } => "tackle",
            MatchEvent::Kickoff { .. } => "kickoff",
            MatchEvent::Dash { .. } => "dash",
            MatchEvent::WallBounce { .. } => "wall_bounce",
        }
    }
}
