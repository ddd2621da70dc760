//! Tick Snapshot
//!
//! Read-only picture of the match at the end of a tick. It carries
//! everything a renderer needs and nothing about AI internals.
//!
//! ## Usage
//! ```text
//! let out = state.advance(&commands, dt);
//! renderer.draw(&out.snapshot);
//! ```

use serde::{Deserialize, Serialize};

use super::body::{BallOwner, Role, Team};
use super::match_state::{MatchPhase, MatchState, Score};
use super::types::Vec2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: u64,
    /// Simulated seconds since the match started
    pub clock: f32,
    pub phase: MatchPhase,
    pub score: Score,
    /// Team A players by index, then team B
    pub players: Vec<PlayerSnap>,
    /// Keeper A, keeper B
    pub goalkeepers: Vec<KeeperSnap>,
    pub ball: BallSnap,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnap {
    pub team: Team,
    pub index: usize,
    pub role: Role,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Vec2,
    pub stunned: bool,
    pub controlled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeeperSnap {
    pub team: Team,
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnap {
    pub position: Vec2,
    pub velocity: Vec2,
    pub owner: BallOwner,
    pub after_touch: f32,
    pub possession: Option<Team>,
}

impl TickSnapshot {
    pub fn from_match_state(state: &MatchState) -> Self {
        let players = state
            .teams
            .iter()
            .flat_map(|team| {
                team.players.iter().enumerate().map(move |(index, p)| PlayerSnap {
                    team: team.team,
                    index,
                    role: p.role,
                    position: p.body.position,
                    velocity: p.body.velocity,
                    facing: p.facing,
                    stunned: p.is_stunned(),
                    controlled: index == team.controlled,
                })
            })
            .collect();

        let goalkeepers = state
            .teams
            .iter()
            .map(|team| KeeperSnap {
                team: team.team,
                position: team.goalkeeper.body.position,
                velocity: team.goalkeeper.body.velocity,
            })
            .collect();

        let ball = &state.ball;
        Self {
            tick: state.tick,
            clock: state.clock,
            phase: state.phase,
            score: state.score,
            players,
            goalkeepers,
            ball: BallSnap {
                position: ball.body.position,
                velocity: ball.body.velocity,
                owner: ball.owner,
                after_touch: ball.after_touch,
                possession: ball.possession,
            },
        }
    }

    pub fn player(&self, team: Team, index: usize) -> Option<&PlayerSnap> {
        self.players.iter().find(|p| p.team == team && p.index == index)
    }

    pub fn controlled(&self, team: Team) -> impl Iterator<Item = &PlayerSnap> {
        self.players.iter().filter(move |p| p.team == team && p.controlled)
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::body::TEAM_SIZE;
    use crate::engine::config::MatchConfig;

    #[test]
    fn test_snapshot_covers_every_body() {
        let state = MatchState::new(MatchConfig::default()).unwrap();
        let snap = TickSnapshot::from_match_state(&state);
        assert_eq!(snap.players.len(), 2 * TEAM_SIZE);
        assert_eq!(snap.goalkeepers.len(), 2);
        assert_eq!(snap.controlled(Team::A).count(), 1);
        assert_eq!(snap.controlled(Team::B).count(), 1);
        assert_eq!(snap.player(Team::B, 4).map(|p| p.role), Some(Role::Midfielder));
    }

    #[test]
    fn test_snapshot_json_has_tagged_owner() {
        let state = MatchState::new(MatchConfig::default()).unwrap();
        let json = TickSnapshot::from_match_state(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ball"]["owner"]["state"], "carried_by");
        assert_eq!(value["phase"]["phase"], "kickoff");
    }
}
