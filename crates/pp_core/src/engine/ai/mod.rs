//! AI Director
//!
//! Drives every field player a team's human is not steering this tick, plus
//! both goalkeepers. Per tick:
//!
//! 1. Refresh run targets for both teams ([`offball`])
//! 2. Per team: the carrier decides ([`carrier`]), the presser closes down
//!    and may tackle, everyone else runs to their target
//! 3. Same-team soft separation
//! 4. Goalkeepers track, claim and distribute ([`goalkeeper`])
//!
//! All randomness comes from the match RNG in a fixed call order.

pub mod carrier;
pub mod goalkeeper;
pub mod offball;
pub mod passing;

use rand::Rng;
use tracing::trace;

use super::body::{BallOwner, Team};
use super::events::MatchEvent;
use super::match_state::MatchState;
use super::physics_constants::motion::MOVING_SPEED;
use super::steering::{apply_team_separation, seek, wall_avoidance};

impl MatchState {
    /// One AI tick. `human[t]` is the slot team `t`'s human steered this
    /// tick, if it sent a command.
    pub(crate) fn run_ai(&mut self, human: [Option<usize>; 2], dt: f32, events: &mut Vec<MatchEvent>) {
        for team in Team::ALL {
            self.plan_runs(team);
        }
        for team in Team::ALL {
            self.drive_team(team, human[team.index()], dt, events);
        }
        let (radius, push) = (self.config.ai.separation_dist, self.config.ai.separation_push);
        for side in self.teams.iter_mut() {
            apply_team_separation(&mut side.players, radius, push, dt);
        }
        for team in Team::ALL {
            self.step_goalkeeper(team, events);
        }
    }

    /// AI-driven player nearest the ball when `team` does not hold it.
    pub(crate) fn presser_index(&self, team: Team, human: Option<usize>) -> Option<usize> {
        if self.ball.owner.team() == Some(team) {
            return None;
        }
        let ball = self.ball.body.position;
        self.team(team)
            .players
            .iter()
            .enumerate()
            .filter(|(i, p)| human != Some(*i) && !p.is_stunned())
            .fold(None, |best: Option<(usize, f32)>, (i, p)| {
                let d = p.body.position.distance_sq(ball);
                if best.map_or(true, |(_, bd)| d < bd) {
                    Some((i, d))
                } else {
                    best
                }
            })
            .map(|(i, _)| i)
    }

    fn drive_team(&mut self, team: Team, human: Option<usize>, dt: f32, events: &mut Vec<MatchEvent>) {
        let presser = self.presser_index(team, human);
        for index in 0..self.team(team).players.len() {
            if human == Some(index) || self.team(team).players[index].is_stunned() {
                continue;
            }
            if self.ball.owner == (BallOwner::CarriedBy { team, index }) {
                self.drive_carrier(team, index, dt);
            } else if presser == Some(index) {
                self.drive_presser(team, index, dt, events);
            } else {
                self.drive_runner(team, index, dt);
            }

            let p = &mut self.teams[team.index()].players[index];
            if p.body.speed() > MOVING_SPEED {
                p.facing = p.body.velocity.normalized_or(p.facing);
            }
        }
    }

    fn drive_presser(&mut self, team: Team, index: usize, dt: f32, events: &mut Vec<MatchEvent>) {
        let field = self.config.field;
        let cfg = &self.config.ai;
        let ball = self.ball.body.position;
        let p = &mut self.teams[team.index()].players[index];
        let wall = wall_avoidance(&field, p.body.position, cfg.wall_avoid_dist, cfg.corner_repel);
        let press = seek(p.body.position, ball, 1.0) + wall * cfg.press_wall_weight;
        p.body.velocity += press * (cfg.press_accel * dt);

        self.try_presser_tackle(team, index, events);
    }

    /// Presser tackle on an opposing field carrier in reach. An attempt
    /// always starts the team's AI tackle cooldown; it connects on an RNG roll.
    pub(crate) fn try_presser_tackle(&mut self, team: Team, index: usize, events: &mut Vec<MatchEvent>) {
        let cfg = &self.config.ai;
        if !cfg.presser_tackles || self.teams[team.index()].ai_tackle_cooldown > 0.0 {
            return;
        }
        let Some(victim) = self.ball.owner.field_index_for(team.opponent()) else {
            return;
        };
        let me = self.teams[team.index()].players[index].body;
        let carrier = self.teams[team.opponent().index()].players[victim].body;
        if me.gap(&carrier) >= cfg.tackle_reach {
            return;
        }

        let (chance, cooldown) = (cfg.tackle_chance, cfg.tackle_cooldown);
        self.teams[team.index()].ai_tackle_cooldown = cooldown;
        let roll: f32 = self.rng.gen();
        trace!(?team, index, victim, roll, "presser tackle attempt");
        if roll < chance {
            let normal = (carrier.position - me.position).normalized_or(team.attack_dir());
            self.apply_tackle(team, victim, normal, events);
        }
    }

    fn drive_runner(&mut self, team: Team, index: usize, dt: f32) {
        let field = self.config.field;
        let cfg = &self.config.ai;
        let p = &mut self.teams[team.index()].players[index];
        let run = seek(p.body.position, p.run_target, cfg.run_accel);
        let wall = wall_avoidance(&field, p.body.position, cfg.wall_avoid_dist, cfg.corner_repel);
        p.body.velocity += (run + wall * cfg.run_wall_accel) * dt;
    }
}
