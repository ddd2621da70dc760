//! Match State Machine
//!
//! `MatchState` owns every mutable value of a match: bodies, ball, score,
//! clock, phase, per-team cooldowns and the seeded RNG. It is threaded
//! through [`MatchState::advance`] and nothing else holds match state, so
//! several matches can run side by side.
//!
//! ## Phases
//! ```text
//! Kickoff{remaining} --delay elapsed--> InPlay --goal--> GoalScored --next tick--> Kickoff
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::body::{
    keeper_home, spawn_team, Ball, BallOwner, Goalkeeper, Player, Role, Team, TEAM_SIZE,
};
use super::config::MatchConfig;
use super::control::Cooldowns;
use super::field::{FieldGeometry, GoalSide};
use super::types::Vec2;
use crate::error::Result;

/// Overlap tolerated by the non-penetration contract
pub const PENETRATION_TOLERANCE: f32 = 0.5;
/// Position tolerance for the bounds contract
const BOUNDS_TOLERANCE: f32 = 1e-3;

// ============================================================================
// Phase / Score
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum MatchPhase {
    /// Frozen until `remaining` runs out; `team` holds the ball
    Kickoff { team: Team, remaining: f32 },
    InPlay,
    /// The ball crossed the line this tick; the reset happens next tick
    GoalScored { scoring: Team },
}

impl MatchPhase {
    pub fn is_in_play(self) -> bool {
        matches!(self, MatchPhase::InPlay)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub goals_a: u32,
    pub goals_b: u32,
    pub points_a: u32,
    pub points_b: u32,
}

impl Score {
    pub fn goals(&self, team: Team) -> u32 {
        match team {
            Team::A => self.goals_a,
            Team::B => self.goals_b,
        }
    }

    pub fn points(&self, team: Team) -> u32 {
        match team {
            Team::A => self.points_a,
            Team::B => self.points_b,
        }
    }

    fn record_goal(&mut self, team: Team, points: u32) {
        match team {
            Team::A => {
                self.goals_a += 1;
                self.points_a = self.points_a.saturating_add(points);
            }
            Team::B => {
                self.goals_b += 1;
                self.points_b = self.points_b.saturating_add(points);
            }
        }
    }
}

// ============================================================================
// TeamState
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub team: Team,
    pub players: Vec<Player>,
    pub goalkeeper: Goalkeeper,
    /// Index of the controlled field player (always valid)
    pub controlled: usize,
    pub cooldowns: Cooldowns,
    /// Shared by the team's AI pressers
    pub ai_tackle_cooldown: f32,
}

impl TeamState {
    fn spawn(team: Team, config: &MatchConfig) -> Self {
        let field = &config.field;
        let players = spawn_team(team, field, config.physics.player_radius);
        let keeper_r = config.physics.goalkeeper_radius;
        let goalkeeper = Goalkeeper::new(team, keeper_home(team, field, keeper_r), keeper_r);
        Self {
            team,
            players,
            goalkeeper,
            controlled: 0,
            cooldowns: Cooldowns::default(),
            ai_tackle_cooldown: 0.0,
        }
    }

    pub fn controlled_player(&self) -> &Player {
        &self.players[self.controlled]
    }

    /// Slot of the team's striker.
    pub fn striker_index(&self) -> usize {
        self.players.iter().position(|p| p.role == Role::Striker).unwrap_or(0)
    }

    /// Field player nearest `point`; ties go to the lower index.
    pub fn nearest_player(&self, point: Vec2) -> Option<usize> {
        nearest_index(self.players.iter().map(|p| p.body.position), point)
    }
}

/// Index of the position nearest `point`; earlier entries win ties.
pub fn nearest_index(positions: impl Iterator<Item = Vec2>, point: Vec2) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, pos) in positions.enumerate() {
        let d = pos.distance_sq(point);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Split the two teams into (own, opponent).
pub fn split_teams(teams: &mut [TeamState; 2], team: Team) -> (&mut TeamState, &mut TeamState) {
    let [a, b] = teams;
    match team {
        Team::A => (a, b),
        Team::B => (b, a),
    }
}

// ============================================================================
// MatchState
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    /// Indexed by [`Team::index`]
    pub teams: [TeamState; 2],
    pub ball: Ball,
    pub score: Score,
    pub clock: f32,
    pub tick: u64,
    pub phase: MatchPhase,
    pub(crate) rng: ChaCha8Rng,
}

impl MatchState {
    /// Validate the config, spawn both teams and set up the opening kickoff.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let teams = [TeamState::spawn(Team::A, &config), TeamState::spawn(Team::B, &config)];
        let ball = Ball::new(config.field.center(), config.physics.ball_radius);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let first = config.rules.first_kickoff;

        let mut state = Self {
            config,
            teams,
            ball,
            score: Score::default(),
            clock: 0.0,
            tick: 0,
            phase: MatchPhase::InPlay,
            rng,
        };
        state.kickoff_reset(first);
        Ok(state)
    }

    #[inline]
    pub fn field(&self) -> &FieldGeometry {
        &self.config.field
    }

    #[inline]
    pub fn team(&self, team: Team) -> &TeamState {
        &self.teams[team.index()]
    }

    #[inline]
    pub fn team_mut(&mut self, team: Team) -> &mut TeamState {
        &mut self.teams[team.index()]
    }

    /// Put everyone back on their anchors and hand the ball to `team`'s striker.
    pub fn kickoff_reset(&mut self, team: Team) {
        let field = self.config.field;
        let jitter = self.config.rules.kickoff_jitter;

        for side in self.teams.iter_mut() {
            for p in side.players.iter_mut() {
                let offset = if jitter > 0.0 {
                    Vec2::new(
                        self.rng.gen_range(-jitter..=jitter),
                        self.rng.gen_range(-jitter..=jitter),
                    )
                } else {
                    Vec2::ZERO
                };
                p.body.position = field.clamp_to_field(p.home + offset, p.body.radius);
                p.body.velocity = Vec2::ZERO;
                p.stun = 0.0;
                p.run_target = p.home;
                p.facing = p.team.attack_dir();
            }
            side.goalkeeper.body.position = side.goalkeeper.home;
            side.goalkeeper.body.velocity = Vec2::ZERO;
        }

        let striker = self.team(team).striker_index();
        self.team_mut(team).controlled = striker;

        let ball = &mut self.ball;
        ball.owner = BallOwner::CarriedBy { team, index: striker };
        ball.after_touch = 0.0;
        ball.kicker = None;
        ball.last_touch = team;
        ball.possession = Some(team);
        ball.body.velocity = Vec2::ZERO;
        self.slave_carried_ball();

        self.phase = MatchPhase::Kickoff { team, remaining: self.config.rules.kickoff_delay };
        debug!(?team, tick = self.tick, "kickoff");
    }

    /// Credit a goal and enter `GoalScored`; the ball stays where it crossed.
    pub(crate) fn record_goal(&mut self, scoring: Team) {
        let points = self.config.rules.points_for_goal(scoring);
        self.score.record_goal(scoring, points);
        self.ball.owner = BallOwner::Free;
        self.ball.after_touch = 0.0;
        self.phase = MatchPhase::GoalScored { scoring };
        debug!(
            ?scoring,
            goals_a = self.score.goals_a,
            goals_b = self.score.goals_b,
            tick = self.tick,
            "goal"
        );
    }

    /// Count down cooldowns, stun and the AI tackle timer.
    pub(crate) fn tick_timers(&mut self, dt: f32) {
        for team in self.teams.iter_mut() {
            team.cooldowns.tick(dt);
            team.ai_tackle_cooldown = (team.ai_tackle_cooldown - dt).max(0.0);
            for p in team.players.iter_mut() {
                if p.stun > 0.0 {
                    p.stun = (p.stun - dt).max(0.0);
                }
            }
        }
    }

    /// Check the tick-end invariants; returns the first violation found.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let field = &self.config.field;

        for team in &self.teams {
            if team.players.len() != TEAM_SIZE {
                return Err(format!("team {:?} has {} players", team.team, team.players.len()));
            }
            if team.controlled >= team.players.len() {
                return Err(format!("team {:?} controls slot {}", team.team, team.controlled));
            }
            for (i, p) in team.players.iter().enumerate() {
                let pos = p.body.position;
                if !pos.is_finite() || !field.contains_body(pos, p.body.radius, BOUNDS_TOLERANCE) {
                    return Err(format!("player {:?}#{} out of bounds at {:?}", team.team, i, pos));
                }
            }
            let keeper = &team.goalkeeper.body;
            let side = GoalSide::defended_by(team.team);
            let boxed = field.clamp_to_box(side, keeper.position, keeper.radius);
            if !keeper.position.is_finite() || keeper.position.distance(boxed) > BOUNDS_TOLERANCE {
                return Err(format!("keeper {:?} outside its box at {:?}", team.team, keeper.position));
            }
        }

        match self.ball.owner {
            BallOwner::CarriedBy { team, index } if index >= self.team(team).players.len() => {
                return Err(format!("ball held by missing player {:?}#{}", team, index));
            }
            _ => {}
        }
        let ball = &self.ball.body;
        let scored = matches!(self.phase, MatchPhase::GoalScored { .. });
        if !scored && !field.contains_body(ball.position, ball.radius, BOUNDS_TOLERANCE) {
            return Err(format!("ball out of bounds at {:?}", ball.position));
        }

        let bodies: Vec<_> = self
            .teams
            .iter()
            .flat_map(|t| t.players.iter().map(|p| p.body))
            .chain(self.teams.iter().map(|t| t.goalkeeper.body))
            .collect();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if bodies[i].gap(&bodies[j]) < -PENETRATION_TOLERANCE {
                    return Err(format!(
                        "bodies {} and {} overlap by {}",
                        i,
                        j,
                        -bodies[i].gap(&bodies[j])
                    ));
                }
            }
        }
        Ok(())
    }
}
