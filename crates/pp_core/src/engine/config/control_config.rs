//! Controlled Player Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{ball, control};

/// Handling and per-action cooldowns for the controlled player
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Top running speed (default: 290)
    pub max_speed: f32,
    /// Velocity blend rate toward the input target (default: 12.5)
    pub responsiveness: f32,
    /// Dash impulse (default: 520)
    pub dash_impulse: f32,
    /// Tackle probe distance ahead of the player (default: 26)
    pub tackle_probe: f32,
    /// Knockback applied to a tackled opponent (default: 520)
    pub tackle_knockback: f32,
    /// Stun applied to a tackled opponent (default: 0.55s)
    pub stun_time: f32,
    /// First-touch pass reach beyond body radius (default: 18)
    pub first_touch_reach: f32,
    /// Ball speed when a tackle knocks it loose (default: 420)
    pub tackle_loose_speed: f32,
    /// Shot aim inset from each post (default: 18)
    pub shot_post_inset: f32,
    /// Shot aim depth past the goal-mouth centre (default: 6)
    pub shot_depth_offset: f32,
    pub pass_aftertouch: f32,
    pub shot_aftertouch: f32,

    // === Cooldowns (s) ===
    pub pass_cooldown: f32,
    pub shoot_cooldown: f32,
    pub tackle_cooldown: f32,
    pub dash_cooldown: f32,
    pub switch_cooldown: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            max_speed: control::MAX_SPEED,
            responsiveness: control::RESPONSIVENESS,
            dash_impulse: control::DASH_IMPULSE,
            tackle_probe: control::TACKLE_PROBE,
            tackle_knockback: control::TACKLE_KNOCKBACK,
            stun_time: control::STUN_TIME,
            first_touch_reach: control::FIRST_TOUCH_REACH,
            tackle_loose_speed: ball::TACKLE_LOOSE_SPEED,
            shot_post_inset: control::SHOT_POST_INSET,
            shot_depth_offset: control::SHOT_DEPTH_OFFSET,
            pass_aftertouch: ball::PASS_AFTERTOUCH_S,
            shot_aftertouch: ball::SHOT_AFTERTOUCH_S,

            pass_cooldown: control::PASS_COOLDOWN,
            shoot_cooldown: control::SHOT_COOLDOWN,
            tackle_cooldown: control::TACKLE_COOLDOWN,
            dash_cooldown: control::DASH_COOLDOWN,
            switch_cooldown: control::SWITCH_COOLDOWN,
        }
    }
}
