//! Default tuning constants for the arena match.
//!
//! Units are arena pixels and seconds. The config structs in
//! [`crate::engine::config`] default to these values; engine code reads the
//! config, not these constants, so presets can override them.

/// Arena canvas and field rectangle
pub mod field {
    /// Canvas width
    pub const CANVAS_W: f32 = 1280.0;
    /// Canvas height
    pub const CANVAS_H: f32 = 720.0;
    /// Horizontal inset of the playable field from the canvas edge
    pub const INSET_X: f32 = 90.0;
    /// Vertical inset of the playable field from the canvas edge
    pub const INSET_Y: f32 = 70.0;
}

/// Goal mouth and penalty box
pub mod goal {
    /// Goal mouth height (vertical opening)
    pub const HEIGHT: f32 = 200.0;
    /// Goal depth behind the goal line
    pub const DEPTH: f32 = 26.0;
    /// Leading edge within this distance of the goal line counts as crossed
    pub const LINE_SLACK: f32 = 2.0;
    /// Penalty box depth from the goal line
    pub const BOX_W: f32 = 150.0;
    /// Penalty box height
    pub const BOX_H: f32 = 300.0;
}

/// Body radii
pub mod body {
    pub const PLAYER_RADIUS: f32 = 13.0;
    pub const GOALKEEPER_RADIUS: f32 = 16.0;
    pub const BALL_RADIUS: f32 = 7.0;
}

/// Integration, drag and collision
pub mod motion {
    /// Player drag coefficient k in `v *= exp(-k·dt)`
    pub const PLAYER_DRAG: f32 = 1.1;
    /// Ball drag coefficient (lower = longer travel)
    pub const BALL_DRAG: f32 = 1.06;
    /// Normal-velocity fraction kept after a wall bounce
    pub const RESTITUTION: f32 = 0.9;
    /// Above this speed a player counts as moving: heading, AI facing and
    /// dash direction follow velocity instead of facing
    pub const MOVING_SPEED: f32 = 4.0;
    /// Minimum Gauss-Seidel collision passes per tick
    pub const COLLISION_PASSES: u8 = 2;
    /// Upper bound on collision passes when overlaps persist
    pub const MAX_COLLISION_PASSES: u8 = 8;
    /// Separation speed guaranteed along a contact normal
    pub const SEPARATION_MIN_SPEED: f32 = 30.0;
    /// Overlap tolerated after resolution
    pub const OVERLAP_SLACK: f32 = 0.01;
    /// Largest simulated step per tick (s)
    pub const MAX_DT: f32 = 1.0 / 30.0;
}

/// Possession, kicks and after-touch
pub mod ball {
    /// Extra pickup reach beyond the body radius for a slow free ball
    pub const DRIBBLE_REACH: f32 = 16.0;
    /// Gap between owner edge and ball edge while carried
    pub const CARRY_GAP: f32 = 2.0;
    /// Carried ball velocity as a fraction of the owner's
    pub const CARRY_VELOCITY_SCALE: f32 = 0.6;
    /// Keeper-held ball velocity as a fraction of the keeper's
    pub const KEEPER_CARRY_VELOCITY_SCALE: f32 = 0.2;
    /// At or below this speed a free ball is "slow"
    pub const SLOW_SPEED: f32 = 420.0;
    /// Slack added to radius sums for the fast-ball contact check
    pub const CONTACT_SLACK: f32 = 4.0;
    pub const PASS_SPEED: f32 = 800.0;
    pub const SHOT_SPEED: f32 = 1000.0;
    /// Lateral after-touch acceleration
    pub const AFTERTOUCH: f32 = 230.0;
    pub const PASS_AFTERTOUCH_S: f32 = 0.12;
    pub const SHOT_AFTERTOUCH_S: f32 = 0.24;
    pub const AI_PASS_AFTERTOUCH_S: f32 = 0.16;
    pub const AI_SHOT_AFTERTOUCH_S: f32 = 0.25;
    pub const CLEARANCE_AFTERTOUCH_S: f32 = 0.10;
    /// Upfield goalkeeper clearance speed
    pub const CLEARANCE_SPEED: f32 = 700.0;
    /// Vertical component of a clearance
    pub const CLEARANCE_LIFT: f32 = 60.0;
    /// Ball speed when knocked loose by a tackle
    pub const TACKLE_LOOSE_SPEED: f32 = 420.0;
}

/// Controlled player handling
pub mod control {
    pub const MAX_SPEED: f32 = 290.0;
    /// Velocity blend rate toward the input target (1/s)
    pub const RESPONSIVENESS: f32 = 12.5;
    pub const DASH_IMPULSE: f32 = 520.0;
    pub const TACKLE_PROBE: f32 = 26.0;
    pub const TACKLE_KNOCKBACK: f32 = 520.0;
    pub const STUN_TIME: f32 = 0.55;
    /// Extra reach for a first-touch pass on a free ball
    pub const FIRST_TOUCH_REACH: f32 = 18.0;
    /// Shot aim inset from each post
    pub const SHOT_POST_INSET: f32 = 18.0;
    /// Shot aim depth past the goal centre
    pub const SHOT_DEPTH_OFFSET: f32 = 6.0;

    pub const PASS_COOLDOWN: f32 = 0.10;
    pub const SHOT_COOLDOWN: f32 = 0.22;
    pub const SWITCH_COOLDOWN: f32 = 0.15;
    pub const TACKLE_COOLDOWN: f32 = 0.55;
    pub const DASH_COOLDOWN: f32 = 1.0;
}

/// AI director
pub mod ai {
    pub const SHOOT_RANGE_X: f32 = 260.0;
    /// Aim inset from a post when picking the near-post point
    pub const NEAR_POST_INSET: f32 = 22.0;
    /// Spread allowed around the near-post point
    pub const NEAR_POST_SPREAD: f32 = 36.0;
    /// Probability of preferring the upper post
    pub const UPPER_POST_BIAS: f32 = 0.65;
    /// Opponent clearance required around the shot lane
    pub const SHOT_LANE_CLEARANCE: f32 = 20.0;
    pub const DANGER_RADIUS: f32 = 90.0;
    /// Carrier within this distance of an edge is pinned
    pub const PINNED_MARGIN: f32 = 22.0;

    pub const WALL_AVOID_DIST: f32 = 50.0;
    pub const CORNER_REPEL: f32 = 1300.0;
    pub const BALL_BIAS: f32 = 0.28;

    pub const PASS_MIN_DIST: f32 = 70.0;
    pub const PASS_MAX_DIST: f32 = 560.0;
    pub const PASS_OPEN_ANGLE: f32 = std::f32::consts::PI * 0.85;
    pub const PASS_OPPONENT_WEIGHT: f32 = 0.9;
    pub const PASS_STRIKER_BONUS: f32 = 80.0;
    pub const PASS_JITTER: f32 = 10.0;

    pub const DRIBBLE_ACCEL: f32 = 300.0;
    pub const DRIBBLE_WALL_WEIGHT: f32 = 0.6;
    pub const PRESS_ACCEL: f32 = 320.0;
    pub const PRESS_WALL_WEIGHT: f32 = 0.5;
    pub const RUN_ACCEL: f32 = 280.0;
    pub const RUN_WALL_ACCEL: f32 = 80.0;
    /// Run targets stay this far inside the field
    pub const RUN_MARGIN: f32 = 60.0;

    /// Off-ball runs relative to the carrier: (lead toward goal, lateral)
    pub const STRIKER_RUN: (f32, f32) = (140.0, 80.0);
    pub const WINGER_RUN: (f32, f32) = (120.0, 110.0);
    pub const MIDFIELDER_RUN: (f32, f32) = (60.0, 40.0);
    /// Share of the ball's offset from centre applied on top of `BALL_BIAS`
    pub const DRIFT_SCALE: f32 = 0.6;

    pub const SEPARATION_DIST: f32 = 56.0;
    pub const SEPARATION_PUSH: f32 = 950.0;

    pub const TACKLE_REACH: f32 = 10.0;
    pub const TACKLE_CHANCE: f32 = 0.35;
    pub const TACKLE_COOLDOWN: f32 = 1.2;

    pub const KEEPER_BOX_INSET: f32 = 24.0;
    pub const KEEPER_TRACK_GAIN: f32 = 6.0;
    pub const KEEPER_MAX_SPEED: f32 = 270.0;
    pub const KEEPER_CATCH_REACH: f32 = 18.0;
    /// Catch box is widened by this much on both x sides
    pub const KEEPER_CATCH_BOX_PAD: f32 = 6.0;
}

/// Kickoff and scoring
pub mod rules {
    pub const GOAL_POINTS: u32 = 100;
    pub const KICKOFF_DELAY: f32 = 0.5;
    pub const KICKOFF_JITTER: f32 = 8.0;
}
