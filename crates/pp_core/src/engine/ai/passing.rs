//! Pass-target heuristic
//!
//! Among teammates within `[pass_min_dist, pass_max_dist]` and inside a
//! forward-biased cone:
//!
//! ```text
//! score = -distance + nearest_opponent_distance * w + striker_bonus + U(0, jitter)
//! ```
//!
//! The highest score wins. The jitter keeps two AI sides from replaying the
//! same pass every time the same shape comes up.

use rand::Rng;

use crate::engine::body::Role;
use crate::engine::config::AiConfig;
use crate::engine::match_state::TeamState;
use crate::engine::types::{Vec2, EPSILON};

/// Receiver distance used when the opponents field nobody
const NO_OPPONENT_DIST: f32 = 999.0;

/// Whether a receiver at `delta` from the passer lies inside the cone.
///
/// Lateral offset counts a quarter toward the forward component so square
/// passes stay available.
pub fn in_forward_cone(delta: Vec2, attack_sign: f32, open_angle: f32) -> bool {
    let d = delta.length().max(EPSILON);
    let cos = ((delta.x * attack_sign + delta.y.abs() * 0.25) / d).clamp(-1.0, 1.0);
    cos.acos() <= open_angle
}

/// Best teammate to pass to from `origin`, skipping `exclude` (the passer).
pub fn best_pass_target<R: Rng>(
    own: &TeamState,
    opponents: &TeamState,
    origin: Vec2,
    exclude: Option<usize>,
    cfg: &AiConfig,
    rng: &mut R,
) -> Option<usize> {
    let sign = own.team.attack_sign();
    let mut best: Option<(usize, f32)> = None;

    for (i, mate) in own.players.iter().enumerate() {
        if exclude == Some(i) {
            continue;
        }
        let delta = mate.body.position - origin;
        let d = delta.length();
        if d < cfg.pass_min_dist || d > cfg.pass_max_dist {
            continue;
        }
        if !in_forward_cone(delta, sign, cfg.pass_open_angle) {
            continue;
        }

        let foe_dist = opponents
            .players
            .iter()
            .map(|f| f.body.position.distance(mate.body.position))
            .fold(None, |acc: Option<f32>, d| Some(acc.map_or(d, |a| a.min(d))))
            .unwrap_or(NO_OPPONENT_DIST);
        let bonus = if mate.role == Role::Striker { cfg.pass_striker_bonus } else { 0.0 };
        let score =
            -d + foe_dist * cfg.pass_opponent_weight + bonus + rng.gen::<f32>() * cfg.pass_jitter;

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}
