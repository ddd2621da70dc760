//! Simulation Loop
//!
//! ## Tick order
//! 1. Clamp `dt`; an unusable step returns an empty tick (no clock change)
//! 2. Phase gate: `GoalScored` resets for kickoff, `Kickoff` stays frozen
//!    until its delay runs out
//! 3. Cooldowns, stun and AI tackle timers count down
//! 4. Human commands for teams that sent one; malformed ones are dropped
//! 5. AI director for everyone else and both keepers
//! 6. Physics, then goal check or end-of-tick pickup
//! 7. Snapshot
//!
//! Same seed and same command stream give bit-identical snapshots.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::body::Team;
use super::control::{prepare, ControlCommand};
use super::events::MatchEvent;
use super::match_state::{MatchPhase, MatchState};
use super::snapshot::TickSnapshot;
use super::timestep::clamp_dt;

/// Inputs for one tick. A team without a command is fully AI-driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamCommands {
    pub a: Option<ControlCommand>,
    pub b: Option<ControlCommand>,
}

impl TeamCommands {
    /// Both teams AI-driven.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_team(&self, team: Team) -> Option<&ControlCommand> {
        match team {
            Team::A => self.a.as_ref(),
            Team::B => self.b.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub snapshot: TickSnapshot,
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    /// Advance the match by one tick of `dt` seconds.
    pub fn advance(&mut self, commands: &TeamCommands, dt: f32) -> TickOutput {
        let mut events = Vec::new();
        let Some(dt) = clamp_dt(dt, self.config.physics.max_dt) else {
            trace!(dt, "skipping tick with unusable dt");
            return self.output(events);
        };

        self.tick += 1;
        self.clock += dt;

        match self.phase {
            MatchPhase::GoalScored { scoring } => {
                let conceding = scoring.opponent();
                self.kickoff_reset(conceding);
                events.push(MatchEvent::Kickoff { team: conceding });
                return self.output(events);
            }
            MatchPhase::Kickoff { team, remaining } => {
                let left = remaining - dt;
                if left > 0.0 {
                    self.phase = MatchPhase::Kickoff { team, remaining: left };
                    return self.output(events);
                }
                self.phase = MatchPhase::InPlay;
            }
            MatchPhase::InPlay => {}
        }

        self.tick_timers(dt);

        let mut human = [None; 2];
        let mut steer = [0.0; 2];
        for team in Team::ALL {
            let Some(raw) = commands.for_team(team) else {
                continue;
            };
            // A dropped command still keeps the AI off the human's player.
            if let Some(cmd) = prepare(team, raw) {
                self.apply_command(team, &cmd, dt, &mut events);
                steer[team.index()] = cmd.move_x;
            }
            human[team.index()] = Some(self.team(team).controlled);
        }

        self.run_ai(human, dt, &mut events);

        match self.step_physics(steer, dt, &mut events) {
            Some(scoring) => {
                self.record_goal(scoring);
                events.push(MatchEvent::Goal { scoring_team: scoring });
            }
            None => self.resolve_pickup(&mut events),
        }

        #[cfg(feature = "strict_contracts")]
        self.enforce_contracts();

        self.output(events)
    }

    #[cfg(feature = "strict_contracts")]
    fn enforce_contracts(&self) {
        if let Err(violation) = self.check_invariants() {
            panic!("tick {} contract violation: {}", self.tick, violation);
        }
    }

    fn output(&self, events: Vec<MatchEvent>) -> TickOutput {
        TickOutput { snapshot: TickSnapshot::from_match_state(self), events }
    }
}

/// Functional form: consume a state, return the next one with the tick output.
pub fn advance(mut state: MatchState, commands: &TeamCommands, dt: f32) -> (MatchState, TickOutput) {
    let output = state.advance(commands, dt);
    (state, output)
}
