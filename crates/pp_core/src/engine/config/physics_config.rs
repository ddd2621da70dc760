//! Physics Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{ball, body, motion};

/// Body sizes, drag, collision and ball-handling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // === Radii ===
    /// Field player radius (default: 13)
    pub player_radius: f32,
    /// Goalkeeper radius (default: 16)
    pub goalkeeper_radius: f32,
    /// Ball radius (default: 7)
    pub ball_radius: f32,

    // === Drag / Bounce ===
    /// Player drag k (default: 1.1)
    pub player_drag: f32,
    /// Ball drag k (default: 1.06)
    pub ball_drag: f32,
    /// Wall restitution (default: 0.9)
    pub restitution: f32,

    // === Collision ===
    /// Minimum resolution passes (default: 2)
    pub collision_passes: u8,
    /// Maximum resolution passes while overlaps remain (default: 8)
    pub max_collision_passes: u8,
    /// Guaranteed separating speed at contact (default: 30)
    pub separation_min_speed: f32,
    /// Overlap tolerated after resolution (default: 0.01)
    pub overlap_slack: f32,

    // === Step ===
    /// dt cap per tick in seconds (default: 1/30)
    pub max_dt: f32,

    // === Ball handling ===
    /// Pickup reach beyond body radius for a slow ball (default: 16)
    pub dribble_reach: f32,
    /// Carried-ball gap between owner edge and ball edge (default: 2)
    pub carry_gap: f32,
    /// Carried ball velocity as a fraction of the owner's (default: 0.6)
    pub carry_velocity_scale: f32,
    /// Same for a keeper-held ball (default: 0.2)
    pub keeper_carry_velocity_scale: f32,
    /// Free ball at or below this speed is slow (default: 420)
    pub slow_ball_speed: f32,
    /// Slack on radius sums for fast-ball contact (default: 4)
    pub contact_slack: f32,
    /// Pass speed (default: 800)
    pub pass_speed: f32,
    /// Shot speed (default: 1000)
    pub shot_speed: f32,
    /// After-touch lateral acceleration (default: 230)
    pub aftertouch: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            player_radius: body::PLAYER_RADIUS,
            goalkeeper_radius: body::GOALKEEPER_RADIUS,
            ball_radius: body::BALL_RADIUS,

            player_drag: motion::PLAYER_DRAG,
            ball_drag: motion::BALL_DRAG,
            restitution: motion::RESTITUTION,

            collision_passes: motion::COLLISION_PASSES,
            max_collision_passes: motion::MAX_COLLISION_PASSES,
            separation_min_speed: motion::SEPARATION_MIN_SPEED,
            overlap_slack: motion::OVERLAP_SLACK,

            max_dt: motion::MAX_DT,

            dribble_reach: ball::DRIBBLE_REACH,
            carry_gap: ball::CARRY_GAP,
            carry_velocity_scale: ball::CARRY_VELOCITY_SCALE,
            keeper_carry_velocity_scale: ball::KEEPER_CARRY_VELOCITY_SCALE,
            slow_ball_speed: ball::SLOW_SPEED,
            contact_slack: ball::CONTACT_SLACK,
            pass_speed: ball::PASS_SPEED,
            shot_speed: ball::SHOT_SPEED,
            aftertouch: ball::AFTERTOUCH,
        }
    }
}

impl PhysicsConfig {
    /// Reach for picking up a slow free ball.
    #[inline]
    pub fn pickup_radius(&self, body_radius: f32) -> f32 {
        body_radius + self.dribble_reach
    }

    /// Centre distance at which a fast ball touches a body.
    #[inline]
    pub fn contact_distance(&self, body_radius: f32) -> f32 {
        body_radius + self.ball_radius + self.contact_slack
    }

    /// Centre distance from a holder to the ball it carries.
    #[inline]
    pub fn carry_offset(&self, body_radius: f32) -> f32 {
        body_radius + self.ball_radius + self.carry_gap
    }
}
