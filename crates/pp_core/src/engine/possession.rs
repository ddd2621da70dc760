//! Possession Model
//!
//! ```text
//! Free --pickup--> Carried --pass/shot/clearance--> Free --goal--> Scored
//!                     \--tackle--> Free
//! ```
//!
//! A carried ball is slaved to its holder every tick. A free ball flies under
//! [`super::physics`] and is taken at the end of the tick by the nearest
//! eligible body:
//! - slow ball (speed <= `slow_ball_speed`): within `radius + dribble_reach`
//! - fast ball: within contact distance `radius + ball_radius + contact_slack`
//!
//! Eligible means not stunned and not the kicker while after-touch runs.
//! Keepers are eligible only while the ball is inside their own box.
//! Candidates are scanned A players, B players, keeper A, keeper B and the
//! first at the minimum distance wins.
//!
//! The check is a per-tick point distance, not a swept test: a very fast
//! ball can pass through a body between two ticks without being taken.

use tracing::{debug, trace};

use super::body::{BallOwner, BodyRef, Team};
use super::events::MatchEvent;
use super::field::{FieldGeometry, GoalSide};
use super::match_state::MatchState;
use super::types::Vec2;

/// Shot aim point: goal-mouth centre pushed `depth_offset` into the goal,
/// with y following the ball but kept `post_inset` inside the posts.
pub fn shot_aim_point(
    field: &FieldGeometry,
    team: Team,
    ball_y: f32,
    post_inset: f32,
    depth_offset: f32,
) -> Vec2 {
    let side = GoalSide::attacked_by(team);
    let mouth = field.goal_mouth(side);
    let (upper, lower) = field.posts(side);
    let lo = (upper + post_inset).min(lower - post_inset);
    let hi = (upper + post_inset).max(lower - post_inset);
    Vec2::new(mouth.center().x + team.attack_sign() * depth_offset, ball_y.clamp(lo, hi))
}

impl MatchState {
    /// Pin a held ball to its holder.
    ///
    /// Field players carry it just ahead along their heading; keepers hold
    /// it at their centre. Free balls are left alone.
    pub(crate) fn slave_carried_ball(&mut self) {
        let field = self.config.field;
        let cfg = &self.config.physics;
        let ball = &mut self.ball;
        match ball.owner {
            BallOwner::Free => {}
            BallOwner::CarriedBy { team, index } => {
                let p = &self.teams[team.index()].players[index];
                let ahead = p.body.position + p.heading() * cfg.carry_offset(p.body.radius);
                ball.body.position = field.clamp_to_field(ahead, ball.body.radius);
                ball.body.velocity = p.body.velocity * cfg.carry_velocity_scale;
            }
            BallOwner::CarriedByGoalkeeper { team } => {
                let k = &self.teams[team.index()].goalkeeper;
                ball.body.position = field.clamp_to_field(k.body.position, ball.body.radius);
                ball.body.velocity = k.body.velocity * cfg.keeper_carry_velocity_scale;
            }
        }
    }

    /// Release the ball with `velocity`, opening an after-touch window.
    pub(crate) fn kick(&mut self, kicker: BodyRef, velocity: Vec2, after_touch: f32) {
        let ball = &mut self.ball;
        ball.owner = BallOwner::Free;
        ball.body.velocity = velocity;
        ball.last_touch = kicker.team();
        ball.kicker = Some(kicker);
        ball.after_touch = after_touch.max(0.0);
        trace!(?kicker, speed = velocity.length(), "kick");
    }

    /// Hand the ball to `body`. Emits a turnover when the possessing team
    /// changes and moves the team's control to a field-player taker.
    pub(crate) fn take_ball(&mut self, body: BodyRef, events: &mut Vec<MatchEvent>) {
        let team = body.team();
        let previous = self.ball.possession;

        let ball = &mut self.ball;
        ball.owner = BallOwner::from(body);
        ball.body.velocity = Vec2::ZERO;
        ball.after_touch = 0.0;
        ball.kicker = None;
        ball.last_touch = team;
        ball.possession = Some(team);

        if let BodyRef::Field { index, .. } = body {
            self.team_mut(team).controlled = index;
        }
        if previous != Some(team) {
            events.push(MatchEvent::Turnover { to_team: team });
            debug!(?team, ?body, tick = self.tick, "turnover");
        } else {
            trace!(?body, "pickup");
        }
        self.slave_carried_ball();
    }

    /// End-of-tick pickup of a free ball.
    ///
    /// Point-distance check against the ball's end position only; a fast
    /// ball can pass through a body between two ticks.
    pub(crate) fn resolve_pickup(&mut self, events: &mut Vec<MatchEvent>) {
        if !self.ball.owner.is_free() {
            return;
        }
        let cfg = &self.config.physics;
        let ball = &self.ball;
        let slow = ball.body.speed() <= cfg.slow_ball_speed;
        let blocked = if ball.after_touch > 0.0 { ball.kicker } else { None };

        let reach = |r: f32| if slow { cfg.pickup_radius(r) } else { cfg.contact_distance(r) };

        let mut best: Option<(BodyRef, f32)> = None;
        let mut consider = |body: BodyRef, pos: Vec2, r: f32| {
            if blocked == Some(body) {
                return;
            }
            let d = pos.distance(ball.body.position);
            if d < reach(r) && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((body, d));
            }
        };

        for side in &self.teams {
            for (index, p) in side.players.iter().enumerate() {
                if !p.is_stunned() {
                    consider(BodyRef::Field { team: side.team, index }, p.body.position, p.body.radius);
                }
            }
        }
        let field = &self.config.field;
        for side in &self.teams {
            if !field.point_in_penalty_box(GoalSide::defended_by(side.team), ball.body.position) {
                continue;
            }
            let k = &side.goalkeeper.body;
            consider(BodyRef::Keeper { team: side.team }, k.position, k.radius);
        }

        if let Some((body, _)) = best {
            self.take_ball(body, events);
        }
    }

    /// A tackle by `tackler` connected with opponent field player `victim`.
    ///
    /// The victim is stunned and shoved along `normal`; if it carried the
    /// ball, the ball is knocked loose along `normal` and possession passes
    /// to the tackling team.
    pub(crate) fn apply_tackle(
        &mut self,
        tackler: Team,
        victim: usize,
        normal: Vec2,
        events: &mut Vec<MatchEvent>,
    ) {
        let ctl = &self.config.control;
        let opponent = tackler.opponent();
        let foe = &mut self.teams[opponent.index()].players[victim];
        foe.stun = ctl.stun_time;
        foe.body.velocity += normal * ctl.tackle_knockback;
        let at_position = foe.body.position;
        events.push(MatchEvent::Tackle { at_position });

        if self.ball.owner == (BallOwner::CarriedBy { team: opponent, index: victim }) {
            let ball = &mut self.ball;
            ball.owner = BallOwner::Free;
            ball.body.velocity = normal * ctl.tackle_loose_speed;
            ball.last_touch = tackler;
            ball.kicker = None;
            ball.after_touch = 0.0;
            if ball.possession != Some(tackler) {
                ball.possession = Some(tackler);
                events.push(MatchEvent::Turnover { to_team: tackler });
            }
        }
        debug!(?tackler, victim, tick = self.tick, "tackle");
    }
}
