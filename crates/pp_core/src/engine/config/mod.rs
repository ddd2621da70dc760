//! # Match Configuration
//!
//! Every tuning value the engine reads lives here, grouped by concern.
//! Each section defaults to [`crate::engine::physics_constants`].
//!
//! ## Usage
//! ```rust
//! use pp_core::engine::config::MatchConfig;
//!
//! let config = MatchConfig::default();
//! let arcade = MatchConfig::arcade();
//! assert!(arcade.physics.shot_speed > config.physics.shot_speed);
//! ```

mod ai_config;
mod control_config;
mod physics_config;
mod rules_config;

pub use ai_config::AiConfig;
pub use control_config::ControlConfig;
pub use physics_config::PhysicsConfig;
pub use rules_config::RulesConfig;

use serde::{Deserialize, Serialize};

use crate::engine::field::FieldGeometry;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// RNG seed; same seed and inputs give the same match
    pub seed: u64,
    pub field: FieldGeometry,
    pub physics: PhysicsConfig,
    pub ai: AiConfig,
    pub control: ControlConfig,
    pub rules: RulesConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field: FieldGeometry::default(),
            physics: PhysicsConfig::default(),
            ai: AiConfig::default(),
            control: ControlConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Faster ball, more aggressive AI.
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.physics.shot_speed = 1150.0;
        cfg.physics.pass_speed = 880.0;
        cfg.physics.ball_drag = 0.9;
        cfg.ai.shoot_range = 320.0;
        cfg.ai.tackle_chance = 0.5;
        cfg.ai.press_accel = 360.0;
        cfg.rules.kickoff_delay = 0.25;
        cfg
    }

    /// Look up a preset by name (`default` or `arcade`).
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "standard" => Ok(Self::default()),
            "arcade" => Ok(Self::arcade()),
            other => Err(CoreError::invalid("preset", format!("unknown preset '{}'", other))),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the physics or the invariants.
    pub fn validate(&self) -> Result<()> {
        let f = &self.field;
        if !(f.right > f.left && f.bottom > f.top) {
            return Err(CoreError::invalid("field", "bounds must have positive size"));
        }
        if f.goal_height <= 0.0 || f.goal_height >= f.height() {
            return Err(CoreError::invalid("field.goal_height", "must fit the field height"));
        }
        if f.box_width <= 0.0 || f.box_height < f.goal_height || f.box_height > f.height() {
            return Err(CoreError::invalid("field.box_*", "box must cover the goal and fit the field"));
        }

        let p = &self.physics;
        positive("physics.player_radius", p.player_radius)?;
        positive("physics.goalkeeper_radius", p.goalkeeper_radius)?;
        positive("physics.ball_radius", p.ball_radius)?;
        if 2.0 * p.goalkeeper_radius >= f.box_width {
            return Err(CoreError::invalid("physics.goalkeeper_radius", "keeper must fit its box"));
        }
        non_negative("physics.player_drag", p.player_drag)?;
        non_negative("physics.ball_drag", p.ball_drag)?;
        if !(p.restitution > 0.0 && p.restitution < 1.0) {
            return Err(CoreError::invalid("physics.restitution", "must be in (0, 1)"));
        }
        if p.collision_passes == 0 {
            return Err(CoreError::invalid("physics.collision_passes", "must be >= 1"));
        }
        if p.max_collision_passes < p.collision_passes {
            return Err(CoreError::invalid(
                "physics.max_collision_passes",
                "must be >= collision_passes",
            ));
        }
        positive("physics.max_dt", p.max_dt)?;
        positive("physics.pass_speed", p.pass_speed)?;
        positive("physics.shot_speed", p.shot_speed)?;
        non_negative("physics.slow_ball_speed", p.slow_ball_speed)?;

        let a = &self.ai;
        if a.pass_min_dist >= a.pass_max_dist {
            return Err(CoreError::invalid("ai.pass_min_dist", "must be below pass_max_dist"));
        }
        if !(0.0..=1.0).contains(&a.tackle_chance) || !(0.0..=1.0).contains(&a.upper_post_bias) {
            return Err(CoreError::invalid("ai", "probabilities must be in [0, 1]"));
        }
        positive("ai.wall_avoid_dist", a.wall_avoid_dist)?;

        let c = &self.control;
        positive("control.max_speed", c.max_speed)?;
        positive("control.responsiveness", c.responsiveness)?;
        for (name, v) in [
            ("control.pass_cooldown", c.pass_cooldown),
            ("control.shoot_cooldown", c.shoot_cooldown),
            ("control.tackle_cooldown", c.tackle_cooldown),
            ("control.dash_cooldown", c.dash_cooldown),
            ("control.switch_cooldown", c.switch_cooldown),
        ] {
            non_negative(name, v)?;
        }

        non_negative("rules.kickoff_delay", self.rules.kickoff_delay)?;
        non_negative("rules.kickoff_jitter", self.rules.kickoff_jitter)?;
        Ok(())
    }
}

fn positive(field: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(CoreError::invalid(field, format!("must be > 0, got {}", v)))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::invalid(field, format!("must be >= 0, got {}", v)))
    }
}

// ========== Tests ==========
