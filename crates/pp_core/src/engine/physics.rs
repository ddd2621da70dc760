//! Physics Stepper
//!
//! Integration, exponential drag, body-body collision resolution and free
//! ball flight with goal detection and wall bounces.
//!
//! ## Order within a tick
//! 1. Integrate players (drag, move, clamp) and goalkeepers (move, clamp to box)
//! 2. Resolve collisions over all twelve bodies
//! 3. Ball: slave to its holder, or fly free (after-touch, drag, move,
//!    goal check, bounce)
//!
//! The goal check runs before the bounce so a ball arriving at the goal
//! mouth scores instead of reflecting.

use rand::Rng;
use tracing::trace;

use super::body::{Ball, KinematicBody, Team};
use super::config::PhysicsConfig;
use super::events::MatchEvent;
use super::field::{FieldGeometry, GoalSide};
use super::match_state::MatchState;
use super::types::{Vec2, EPSILON};

// ============================================================================
// Primitives
// ============================================================================

/// Where a body is allowed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Field,
    /// Goalkeepers stay inside their own penalty box
    Box(GoalSide),
}

/// Clamp a body centre into its region.
#[inline]
pub fn confine(field: &FieldGeometry, region: Region, p: Vec2, r: f32) -> Vec2 {
    match region {
        Region::Field => field.clamp_to_field(p, r),
        Region::Box(side) => field.clamp_to_box(side, p, r),
    }
}

/// `v *= exp(-k·dt)`
#[inline]
pub fn apply_drag(v: Vec2, k: f32, dt: f32) -> Vec2 {
    v * (-k * dt).exp()
}

/// Move a body by its velocity and clamp it into `region`.
pub fn integrate(body: &mut KinematicBody, field: &FieldGeometry, region: Region, dt: f32) {
    let moved = body.position + body.velocity * dt;
    body.position = confine(field, region, moved, body.radius);
}

/// Overlap between two bodies along the a-from-b normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    pub overlap: f32,
}

/// Contact between two separated-centre bodies, if they overlap.
///
/// Coincident centres return `None`; the resolver picks a direction for them.
pub fn check_contact(a: &KinematicBody, b: &KinematicBody) -> Option<Contact> {
    let delta = a.position - b.position;
    let d = delta.length();
    let min = a.radius + b.radius;
    if d < EPSILON || d >= min {
        return None;
    }
    Some(Contact { normal: delta * (1.0 / d), overlap: min - d })
}

/// Push a pair apart by half the overlap each and guarantee a minimum
/// separating speed along the normal.
fn separate_pair(a: &mut KinematicBody, b: &mut KinematicBody, contact: Contact, min_speed: f32) {
    let push = contact.normal * (contact.overlap * 0.5);
    a.position += push;
    b.position -= push;

    let rel = (a.velocity - b.velocity).dot(contact.normal);
    let correction = min_speed - rel;
    if correction > 0.0 {
        let impulse = contact.normal * (correction * 0.5);
        a.velocity += impulse;
        b.velocity -= impulse;
    }
}

/// Gauss-Seidel resolution over every body pair.
///
/// Runs at least `collision_passes` passes and keeps going (up to
/// `max_collision_passes`) while any overlap above `overlap_slack` remains.
/// Each body is re-confined after every pass. Returns the passes used.
pub fn resolve_collisions<R: Rng>(
    bodies: &mut [(KinematicBody, Region)],
    field: &FieldGeometry,
    cfg: &PhysicsConfig,
    rng: &mut R,
) -> u8 {
    let min_passes = cfg.collision_passes.max(1);
    let max_passes = cfg.max_collision_passes.max(min_passes);
    let mut passes = 0u8;

    while passes < max_passes {
        passes += 1;
        let mut worst = 0.0f32;

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (head, tail) = bodies.split_at_mut(j);
                let a = &mut head[i].0;
                let b = &mut tail[0].0;

                let contact = match check_contact(a, b) {
                    Some(c) => c,
                    None if a.position.distance_sq(b.position) < EPSILON * EPSILON => {
                        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                        Contact {
                            normal: Vec2::new(angle.cos(), angle.sin()),
                            overlap: a.radius + b.radius,
                        }
                    }
                    None => continue,
                };
                worst = worst.max(contact.overlap);
                separate_pair(a, b, contact, cfg.separation_min_speed);
            }
        }

        for (body, region) in bodies.iter_mut() {
            body.position = confine(field, *region, body.position, body.radius);
        }

        if passes >= min_passes && worst <= cfg.overlap_slack {
            break;
        }
    }
    passes
}

// ============================================================================
// Ball
// ============================================================================

/// Outcome of one free-ball step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallStep {
    Rolling,
    Bounced(Vec2),
    Goal(Team),
}

/// Advance a free ball: after-touch, drag, move, goal check, wall bounce.
///
/// `steer` is the kicking team's lateral input in `[-1, 1]`; it only acts
/// while the after-touch timer is positive.
pub fn step_free_ball(
    ball: &mut Ball,
    field: &FieldGeometry,
    cfg: &PhysicsConfig,
    steer: f32,
    dt: f32,
) -> BallStep {
    if ball.after_touch > 0.0 {
        if steer != 0.0 {
            let n = ball.body.velocity.normalized_or(Vec2::ZERO);
            ball.body.velocity += n.perp() * (cfg.aftertouch * dt * steer);
        }
        ball.after_touch = (ball.after_touch - dt).max(0.0);
        if ball.after_touch == 0.0 {
            ball.kicker = None;
        }
    }

    let body = &mut ball.body;
    body.velocity = apply_drag(body.velocity, cfg.ball_drag, dt);
    body.position += body.velocity * dt;

    let r = body.radius;
    for side in [GoalSide::Left, GoalSide::Right] {
        if field.ball_entering_goal(side, body.position, r) {
            return BallStep::Goal(side.scoring_team());
        }
    }

    let mut bounced = false;
    if body.position.x - r < field.left {
        body.position.x = field.left + r;
        body.velocity.x = body.velocity.x.abs() * cfg.restitution;
        bounced = true;
    }
    if body.position.x + r > field.right {
        body.position.x = field.right - r;
        body.velocity.x = -body.velocity.x.abs() * cfg.restitution;
        bounced = true;
    }
    if body.position.y - r < field.top {
        body.position.y = field.top + r;
        body.velocity.y = body.velocity.y.abs() * cfg.restitution;
        bounced = true;
    }
    if body.position.y + r > field.bottom {
        body.position.y = field.bottom - r;
        body.velocity.y = -body.velocity.y.abs() * cfg.restitution;
        bounced = true;
    }

    if bounced {
        BallStep::Bounced(body.position)
    } else {
        BallStep::Rolling
    }
}

// ============================================================================
// Match step
// ============================================================================

impl MatchState {
    /// Move every body, resolve contacts and fly or slave the ball.
    ///
    /// `steer` holds each team's after-touch input. Returns the scoring
    /// team when the ball entered a goal this tick.
    pub(crate) fn step_physics(
        &mut self,
        steer: [f32; 2],
        dt: f32,
        events: &mut Vec<MatchEvent>,
    ) -> Option<Team> {
        let MatchState { config, teams, ball, rng, .. } = self;
        let field = config.field;
        let cfg = &config.physics;

        for team in teams.iter_mut() {
            for p in team.players.iter_mut() {
                p.body.velocity = apply_drag(p.body.velocity, cfg.player_drag, dt);
                integrate(&mut p.body, &field, Region::Field, dt);
            }
            let side = GoalSide::defended_by(team.team);
            integrate(&mut team.goalkeeper.body, &field, Region::Box(side), dt);
        }

        let mut bodies: Vec<(KinematicBody, Region)> = Vec::with_capacity(12);
        for team in teams.iter() {
            bodies.extend(team.players.iter().map(|p| (p.body, Region::Field)));
        }
        for team in teams.iter() {
            let side = GoalSide::defended_by(team.team);
            bodies.push((team.goalkeeper.body, Region::Box(side)));
        }
        let passes = resolve_collisions(&mut bodies, &field, cfg, rng);
        if passes > cfg.collision_passes {
            trace!(passes, "collision resolution needed extra passes");
        }

        let mut resolved = bodies.into_iter().map(|(body, _)| body);
        for team in teams.iter_mut() {
            for p in team.players.iter_mut() {
                if let Some(body) = resolved.next() {
                    p.body = body;
                }
            }
        }
        for team in teams.iter_mut() {
            if let Some(body) = resolved.next() {
                team.goalkeeper.body = body;
            }
        }

        if !ball.owner.is_free() {
            self.slave_carried_ball();
            return None;
        }

        let steer = steer[self.ball.last_touch.index()];
        let cfg = &self.config.physics;
        match step_free_ball(&mut self.ball, &field, cfg, steer, dt) {
            BallStep::Rolling => None,
            BallStep::Bounced(at_position) => {
                events.push(MatchEvent::WallBounce { at_position });
                None
            }
            BallStep::Goal(team) => Some(team),
        }
    }
}
