//! Ball-carrier decisions
//!
//! Precedence each tick:
//! 1. Shoot when in range and a near-post lane is clear of every opponent
//! 2. Pass when an opponent is close or the carrier is pinned to an edge
//! 3. Dribble toward goal (always applied; a kick simply releases the ball)

use rand::Rng;
use tracing::trace;

use crate::engine::body::{BodyRef, Team};
use crate::engine::config::AiConfig;
use crate::engine::field::{FieldGeometry, GoalSide};
use crate::engine::match_state::{split_teams, MatchState, TeamState};
use crate::engine::steering::wall_avoidance;
use crate::engine::types::{point_to_segment_distance, Vec2};

use super::passing::best_pass_target;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarrierAction {
    Shoot { aim: Vec2 },
    Pass { to: usize },
    Dribble,
}

/// Near-post aim point: `near_post_inset` inside the chosen post, following
/// the ball by at most `near_post_spread`.
pub fn near_post_aim(field: &FieldGeometry, team: Team, ball: Vec2, upper: bool, cfg: &AiConfig) -> Vec2 {
    let side = GoalSide::attacked_by(team);
    let (top_post, bottom_post) = field.posts(side);
    let post = if upper { top_post + cfg.near_post_inset } else { bottom_post - cfg.near_post_inset };
    let y = ball.y.clamp(post - cfg.near_post_spread, post + cfg.near_post_spread);
    Vec2::new(field.goal_mouth(side).center().x, y)
}

/// No opponent body (field players and keeper) within `clearance` of the lane.
pub fn lane_is_clear(from: Vec2, to: Vec2, opponents: &TeamState, clearance: f32) -> bool {
    let keeper = std::iter::once(&opponents.goalkeeper.body);
    opponents
        .players
        .iter()
        .map(|p| &p.body)
        .chain(keeper)
        .all(|b| point_to_segment_distance(b.position, from, to) > b.radius + clearance)
}

/// Pick the carrier's action. Consumes RNG for the post choice and the pass
/// jitter in a fixed order.
pub fn decide<R: Rng>(
    own: &TeamState,
    opponents: &TeamState,
    index: usize,
    ball: Vec2,
    field: &FieldGeometry,
    cfg: &AiConfig,
    rng: &mut R,
) -> CarrierAction {
    let team = own.team;
    let carrier = own.players[index].body.position;

    let upper_first = rng.gen::<f32>() < cfg.upper_post_bias;
    if field.distance_to_attacked_goal_line(team, ball) < cfg.shoot_range {
        for upper in [upper_first, !upper_first] {
            let aim = near_post_aim(field, team, ball, upper, cfg);
            if lane_is_clear(ball, aim, opponents, cfg.shot_lane_clearance) {
                return CarrierAction::Shoot { aim };
            }
        }
    }

    let nearest_to_ball = opponents
        .nearest_player(ball)
        .map(|i| opponents.players[i].body.position.distance(carrier));
    let pressured = nearest_to_ball.is_some_and(|d| d < cfg.danger_radius);
    let pinned = field.edge_distance(carrier) < cfg.pinned_margin;
    if pressured || pinned {
        if let Some(to) = best_pass_target(own, opponents, carrier, Some(index), cfg, rng) {
            return CarrierAction::Pass { to };
        }
    }
    CarrierAction::Dribble
}

impl MatchState {
    /// Drive an AI ball carrier for one tick.
    pub(crate) fn drive_carrier(&mut self, team: Team, index: usize, dt: f32) {
        let field = self.config.field;
        let cfg = self.config.ai.clone();
        let ball_pos = self.ball.body.position;

        let action = {
            let MatchState { teams, rng, .. } = self;
            let (own, opponents) = split_teams(teams, team);
            decide(own, opponents, index, ball_pos, &field, &cfg, rng)
        };

        let p = &mut self.teams[team.index()].players[index];
        let mouth = field.goal_mouth(GoalSide::attacked_by(team));
        let drift = if ball_pos.y < mouth.y {
            0.1
        } else if ball_pos.y > mouth.y + mouth.h {
            -0.1
        } else {
            0.0
        };
        let to_goal = Vec2::new(team.attack_sign(), drift).normalized_or(team.attack_dir());
        let push = wall_avoidance(&field, p.body.position, cfg.wall_avoid_dist, cfg.corner_repel);
        p.body.velocity += (to_goal + push * cfg.dribble_wall_weight) * (cfg.dribble_accel * dt);

        let kicker = BodyRef::Field { team, index };
        match action {
            CarrierAction::Shoot { aim } => {
                let dir = (aim - ball_pos).normalized_or(team.attack_dir());
                trace!(?team, index, ?aim, "ai shot");
                self.kick(kicker, dir * self.config.physics.shot_speed, cfg.shot_aftertouch);
            }
            CarrierAction::Pass { to } => {
                let target = self.teams[team.index()].players[to].body.position;
                let dir = (target - ball_pos).normalized_or(team.attack_dir());
                trace!(?team, index, to, "ai pass");
                self.kick(kicker, dir * self.config.physics.pass_speed, cfg.pass_aftertouch);
            }
            CarrierAction::Dribble => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::MatchConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn cleared_state() -> MatchState {
        let mut state = MatchState::new(MatchConfig::default()).unwrap();
        for (i, p) in state.teams[0].players.iter_mut().enumerate() {
            p.body.position = Vec2::new(200.0, 120.0 + 60.0 * i as f32);
        }
        for (i, p) in state.teams[1].players.iter_mut().enumerate() {
            p.body.position = Vec2::new(300.0, 120.0 + 60.0 * i as f32);
        }
        state
    }

    #[test]
    fn test_near_post_aim() {
        let field = FieldGeometry::default();
        let cfg = MatchConfig::default().ai;
        let upper = near_post_aim(&field, Team::A, Vec2::new(1000.0, 100.0), true, &cfg);
        assert_eq!(upper, Vec2::new(1203.0, 246.0));
        let lower = near_post_aim(&field, Team::B, Vec2::new(200.0, 440.0), false, &cfg);
        assert_eq!(lower, Vec2::new(77.0, 440.0));
    }

    #[test]
    fn test_lane_blocked_by_keeper() {
        let state = cleared_state();
        let keeper_b = state.teams[1].goalkeeper.body.position;
        let from = keeper_b - Vec2::new(150.0, 0.0);
        let to = keeper_b + Vec2::new(29.0, 0.0);
        assert!(!lane_is_clear(from, to, &state.teams[1], 20.0));
        let wide = to + Vec2::new(0.0, 90.0);
        let from_wide = from + Vec2::new(0.0, 90.0);
        assert!(lane_is_clear(from_wide, wide, &state.teams[1], 20.0));
    }

    #[test]
    fn test_shoots_in_range_with_clear_lane() {
        let mut state = cleared_state();
        let field = state.config.field;
        let cfg = state.config.ai.clone();
        state.teams[0].players[0].body.position = Vec2::new(1050.0, 440.0);
        state.teams[1].goalkeeper.body.position = Vec2::new(1174.0, 226.0);
        let ball = Vec2::new(1072.0, 440.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let [a, b] = &state.teams;
        let action = decide(a, b, 0, ball, &field, &cfg, &mut rng);
        assert!(matches!(action, CarrierAction::Shoot { .. }), "got {:?}", action);
    }

    #[test]
    fn test_out_of_range_unpressured_dribbles() {
        let mut state = cleared_state();
        let field = state.config.field;
        let cfg = state.config.ai.clone();
        state.teams[0].players[0].body.position = Vec2::new(700.0, 360.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let [a, b] = &state.teams;
        let action = decide(a, b, 0, Vec2::new(722.0, 360.0), &field, &cfg, &mut rng);
        assert_eq!(action, CarrierAction::Dribble);
    }

    #[test]
    fn test_pressured_carrier_passes() {
        let mut state = cleared_state();
        let field = state.config.field;
        let cfg = state.config.ai.clone();
        state.teams[0].players[3].body.position = Vec2::new(700.0, 360.0);
        state.teams[0].players[0].body.position = Vec2::new(900.0, 300.0);
        state.teams[1].players[2].body.position = Vec2::new(760.0, 360.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let [a, b] = &state.teams;
        let action = decide(a, b, 3, Vec2::new(722.0, 360.0), &field, &cfg, &mut rng);
        assert_eq!(action, CarrierAction::Pass { to: 0 });
    }

    #[test]
    fn test_drive_carrier_shot_releases_ball() {
        let mut state = cleared_state();
        state.phase = crate::engine::match_state::MatchPhase::InPlay;
        state.teams[0].players[0].body.position = Vec2::new(1050.0, 440.0);
        state.teams[1].goalkeeper.body.position = Vec2::new(1174.0, 226.0);
        state.ball.owner = crate::engine::body::BallOwner::CarriedBy { team: Team::A, index: 0 };
        state.slave_carried_ball();
        state.drive_carrier(Team::A, 0, 1.0 / 60.0);
        assert!(state.ball.owner.is_free());
        assert!((state.ball.body.speed() - state.config.physics.shot_speed).abs() < 1e-2);
        assert_eq!(state.ball.kicker, Some(BodyRef::Field { team: Team::A, index: 0 }));
        assert!(state.ball.body.velocity.x > 0.0);
    }
}
