//! Kickoff and Scoring Configuration

use serde::{Deserialize, Serialize};

use crate::engine::body::Team;
use crate::engine::physics_constants::rules;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Points per goal before the multiplier (default: 100)
    pub goal_points: u32,
    /// Per-team point multiplier, indexed by team (default: [1, 1])
    pub point_multiplier: [u32; 2],
    /// Frozen time after a kickoff reset (default: 0.5s)
    pub kickoff_delay: f32,
    /// Max random offset from home anchors at kickoff (default: 8)
    pub kickoff_jitter: f32,
    /// Team holding the ball at the opening kickoff (default: A)
    pub first_kickoff: Team,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            goal_points: rules::GOAL_POINTS,
            point_multiplier: [1, 1],
            kickoff_delay: rules::KICKOFF_DELAY,
            kickoff_jitter: rules::KICKOFF_JITTER,
            first_kickoff: Team::A,
        }
    }
}

impl RulesConfig {
    pub fn points_for_goal(&self, team: Team) -> u32 {
        self.goal_points.saturating_mul(self.point_multiplier[team.index()])
    }
}
