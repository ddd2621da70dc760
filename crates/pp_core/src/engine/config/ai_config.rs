//! AI Director Configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{ai, ball};

/// Carrier, passing, off-ball and goalkeeper tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    // === Carrier ===
    /// Max distance to the goal line for a shot (default: 260)
    pub shoot_range: f32,
    /// Opponent clearance around the shot lane (default: 20)
    pub shot_lane_clearance: f32,
    /// Probability of aiming at the upper post first (default: 0.65)
    pub upper_post_bias: f32,
    /// Near-post aim point inset from the post (default: 22)
    pub near_post_inset: f32,
    /// Aim may follow the ball this far around the near-post point (default: 36)
    pub near_post_spread: f32,
    pub shot_aftertouch: f32,
    /// Opponent this close forces a pass (default: 90)
    pub danger_radius: f32,
    /// Distance from an edge that counts as pinned (default: 22)
    pub pinned_margin: f32,
    /// Dribble acceleration (default: 300)
    pub dribble_accel: f32,
    pub dribble_wall_weight: f32,

    // === Passing ===
    pub pass_min_dist: f32,
    pub pass_max_dist: f32,
    /// Forward cone half-angle in radians (default: 0.85π)
    pub pass_open_angle: f32,
    /// Weight on the receiver's nearest-opponent distance (default: 0.9)
    pub pass_opponent_weight: f32,
    /// Bonus for passing to a striker (default: 80)
    pub pass_striker_bonus: f32,
    /// Uniform jitter added to each pass score (default: 10)
    pub pass_jitter: f32,
    pub pass_aftertouch: f32,

    // === Off-ball ===
    pub press_accel: f32,
    pub press_wall_weight: f32,
    pub run_accel: f32,
    pub run_wall_accel: f32,
    /// Run targets stay this far inside the field (default: 60)
    pub run_margin: f32,
    /// Blend of ball offset into home anchors without possession (default: 0.28)
    pub ball_bias: f32,
    pub wall_avoid_dist: f32,
    pub corner_repel: f32,
    pub separation_dist: f32,
    pub separation_push: f32,

    // === Presser tackle ===
    /// Allow the presser to tackle the carrier (default: true)
    pub presser_tackles: bool,
    /// Edge-to-edge reach for a presser tackle (default: 10)
    pub tackle_reach: f32,
    /// Chance per eligible tick (default: 0.35)
    pub tackle_chance: f32,
    /// Per-team cooldown after an AI tackle attempt (default: 1.2s)
    pub tackle_cooldown: f32,

    // === Goalkeeper ===
    pub keeper_max_speed: f32,
    pub keeper_track_gain: f32,
    pub keeper_catch_reach: f32,
    /// Tracking range inset from the box's top and bottom (default: 24)
    pub keeper_box_inset: f32,
    /// Catch box widened by this on both x sides (default: 6)
    pub keeper_catch_box_pad: f32,
    pub clearance_speed: f32,
    pub clearance_lift: f32,
    pub clearance_aftertouch: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            shoot_range: ai::SHOOT_RANGE_X,
            shot_lane_clearance: ai::SHOT_LANE_CLEARANCE,
            upper_post_bias: ai::UPPER_POST_BIAS,
            near_post_inset: ai::NEAR_POST_INSET,
            near_post_spread: ai::NEAR_POST_SPREAD,
            shot_aftertouch: ball::AI_SHOT_AFTERTOUCH_S,
            danger_radius: ai::DANGER_RADIUS,
            pinned_margin: ai::PINNED_MARGIN,
            dribble_accel: ai::DRIBBLE_ACCEL,
            dribble_wall_weight: ai::DRIBBLE_WALL_WEIGHT,

            pass_min_dist: ai::PASS_MIN_DIST,
            pass_max_dist: ai::PASS_MAX_DIST,
            pass_open_angle: ai::PASS_OPEN_ANGLE,
            pass_opponent_weight: ai::PASS_OPPONENT_WEIGHT,
            pass_striker_bonus: ai::PASS_STRIKER_BONUS,
            pass_jitter: ai::PASS_JITTER,
            pass_aftertouch: ball::AI_PASS_AFTERTOUCH_S,

            press_accel: ai::PRESS_ACCEL,
            press_wall_weight: ai::PRESS_WALL_WEIGHT,
            run_accel: ai::RUN_ACCEL,
            run_wall_accel: ai::RUN_WALL_ACCEL,
            run_margin: ai::RUN_MARGIN,
            ball_bias: ai::BALL_BIAS,
            wall_avoid_dist: ai::WALL_AVOID_DIST,
            corner_repel: ai::CORNER_REPEL,
            separation_dist: ai::SEPARATION_DIST,
            separation_push: ai::SEPARATION_PUSH,

            presser_tackles: true,
            tackle_reach: ai::TACKLE_REACH,
            tackle_chance: ai::TACKLE_CHANCE,
            tackle_cooldown: ai::TACKLE_COOLDOWN,

            keeper_max_speed: ai::KEEPER_MAX_SPEED,
            keeper_track_gain: ai::KEEPER_TRACK_GAIN,
            keeper_catch_reach: ai::KEEPER_CATCH_REACH,
            keeper_box_inset: ai::KEEPER_BOX_INSET,
            keeper_catch_box_pad: ai::KEEPER_CATCH_BOX_PAD,
            clearance_speed: ball::CLEARANCE_SPEED,
            clearance_lift: ball::CLEARANCE_LIFT,
            clearance_aftertouch: ball::CLEARANCE_AFTERTOUCH_S,
        }
    }
}
