//! Input Command Processor
//!
//! A host sends at most one [`ControlCommand`] per team per tick. Action
//! flags are edge-triggered on the host side; here an action fires when its
//! flag is set and the team's matching cooldown has run out.
//!
//! ## Action order
//! movement, dash, pass (carrying or first touch), tackle, shoot, switch.
//!
//! A stunned controlled player skips everything except switching, so the
//! human can hand control to a teammate who is able to act.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::ai::passing::best_pass_target;
use super::body::{BallOwner, BodyRef, Team};
use super::events::MatchEvent;
use super::match_state::{nearest_index, split_teams, MatchState};
use super::physics_constants::motion::MOVING_SPEED;
use super::possession::shot_aim_point;
use super::types::{Vec2, EPSILON};

// ============================================================================
// ControlCommand
// ============================================================================

/// One team's input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlCommand {
    /// Horizontal axis in `[-1, 1]`; also steers after-touch
    pub move_x: f32,
    /// Vertical axis in `[-1, 1]`
    pub move_y: f32,
    pub pass: bool,
    pub shoot: bool,
    pub tackle: bool,
    pub dash: bool,
    pub switch: bool,
}

impl ControlCommand {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_move(mut self, x: f32, y: f32) -> Self {
        self.move_x = x;
        self.move_y = y;
        self
    }

    #[inline]
    pub fn move_vector(&self) -> Vec2 {
        Vec2::new(self.move_x, self.move_y)
    }

    /// Finite axes with a movement vector no longer than 1.
    pub fn is_sane(&self) -> bool {
        let v = self.move_vector();
        v.is_finite() && v.length() <= 1.0 + EPSILON
    }

    /// Either axis is NaN or infinite.
    pub fn is_malformed(&self) -> bool {
        !self.move_x.is_finite() || !self.move_y.is_finite()
    }

    /// Malformed commands collapse to [`ControlCommand::idle`]; longer-than-unit
    /// movement is rescaled.
    pub fn sanitize(mut self) -> Self {
        if self.is_malformed() {
            return Self::idle();
        }
        let v = self.move_vector();
        if v.length() > 1.0 + EPSILON {
            let n = v.normalized();
            self.move_x = n.x;
            self.move_y = n.y;
        }
        self
    }
}

/// Sanitise a host command, logging when it had to be fixed.
///
/// A malformed command is dropped (`None`): the team's controlled player
/// neither moves nor acts this tick.
pub fn prepare(team: Team, cmd: &ControlCommand) -> Option<ControlCommand> {
    if cmd.is_sane() {
        return Some(*cmd);
    }
    if cmd.is_malformed() {
        warn!(?team, move_x = cmd.move_x, move_y = cmd.move_y, "dropped malformed control command");
        return None;
    }
    warn!(?team, move_x = cmd.move_x, move_y = cmd.move_y, "rescaled control command");
    Some(cmd.sanitize())
}

// ============================================================================
// Cooldowns
// ============================================================================

/// Remaining seconds per action; an action is ready at 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldowns {
    pub pass: f32,
    pub shoot: f32,
    pub tackle: f32,
    pub dash: f32,
    pub switch: f32,
}

impl Cooldowns {
    pub fn tick(&mut self, dt: f32) {
        for cd in [&mut self.pass, &mut self.shoot, &mut self.tackle, &mut self.dash, &mut self.switch] {
            *cd = (*cd - dt).max(0.0);
        }
    }
}

#[inline]
fn ready(cooldown: f32) -> bool {
    cooldown <= 0.0
}

// ============================================================================
// Controlled player
// ============================================================================

impl MatchState {
    /// Apply a sanitised command to `team`'s controlled player.
    pub(crate) fn apply_command(
        &mut self,
        team: Team,
        cmd: &ControlCommand,
        dt: f32,
        events: &mut Vec<MatchEvent>,
    ) {
        let index = self.team(team).controlled;
        if !self.team(team).players[index].is_stunned() {
            self.steer_controlled(team, index, cmd, dt);
            if cmd.dash {
                self.try_dash(team, index, cmd, events);
            }
            if cmd.pass {
                self.try_pass(team, index);
            }
            if cmd.tackle {
                self.try_tackle(team, index, events);
            }
            if cmd.shoot {
                self.try_shoot(team, index);
            }
        }
        if cmd.switch {
            self.try_switch(team);
        }
    }

    fn steer_controlled(&mut self, team: Team, index: usize, cmd: &ControlCommand, dt: f32) {
        let ctl = &self.config.control;
        let dir = cmd.move_vector();
        let p = &mut self.teams[team.index()].players[index];
        let blend = (ctl.responsiveness * dt).min(1.0);
        p.body.velocity += (dir * ctl.max_speed - p.body.velocity) * blend;
        if dir.length() > EPSILON {
            p.facing = dir.normalized();
        }
    }

    fn try_dash(&mut self, team: Team, index: usize, cmd: &ControlCommand, events: &mut Vec<MatchEvent>) {
        let ctl = &self.config.control;
        let side = &mut self.teams[team.index()];
        if !ready(side.cooldowns.dash) {
            return;
        }
        let p = &mut side.players[index];
        let dir = if p.body.speed() > MOVING_SPEED {
            p.body.velocity.normalized_or(p.facing)
        } else {
            cmd.move_vector().normalized_or(p.facing)
        };
        p.body.velocity += dir * ctl.dash_impulse;
        side.cooldowns.dash = ctl.dash_cooldown;
        events.push(MatchEvent::Dash { team, at_position: p.body.position });
    }

    fn try_pass(&mut self, team: Team, index: usize) {
        if !ready(self.team(team).cooldowns.pass) {
            return;
        }
        let p = &self.team(team).players[index];
        let origin = p.body.position;
        let heading = p.heading();
        let carrying = self.ball.owner == (BallOwner::CarriedBy { team, index });
        let first_touch = self.ball.owner.is_free()
            && origin.distance(self.ball.body.position) < p.body.radius + self.config.control.first_touch_reach;
        if !carrying && !first_touch {
            return;
        }

        let exclude = carrying.then_some(index);
        let target = {
            let MatchState { teams, rng, config, .. } = self;
            let (own, opponents) = split_teams(teams, team);
            best_pass_target(own, opponents, origin, exclude, &config.ai, rng)
        };

        let ctl = &self.config.control;
        let (cooldown, after_touch) = (ctl.pass_cooldown, ctl.pass_aftertouch);
        self.team_mut(team).cooldowns.pass = cooldown;
        let ball = self.ball.body.position;
        let dir = match target {
            Some(to) => (self.team(team).players[to].body.position - ball).normalized_or(heading),
            None => heading,
        };
        trace!(?team, index, ?target, first_touch, "human pass");
        let speed = self.config.physics.pass_speed;
        self.kick(BodyRef::Field { team, index }, dir * speed, after_touch);
    }

    fn try_tackle(&mut self, team: Team, index: usize, events: &mut Vec<MatchEvent>) {
        let ctl = &self.config.control;
        let (cooldown, reach) = (ctl.tackle_cooldown, ctl.tackle_probe);
        if !ready(self.team(team).cooldowns.tackle) {
            return;
        }
        self.team_mut(team).cooldowns.tackle = cooldown;

        let p = &self.team(team).players[index];
        let (from, facing) = (p.body.position, p.facing);
        let probe = from + facing * reach;
        let foes = &self.team(team.opponent()).players;
        let Some(victim) = nearest_index(foes.iter().map(|f| f.body.position), probe) else {
            return;
        };
        let foe = foes[victim].body.position;
        if foe.distance(probe) >= reach {
            return;
        }
        let normal = (foe - from).normalized_or(facing);
        self.apply_tackle(team, victim, normal, events);
    }

    fn try_shoot(&mut self, team: Team, index: usize) {
        let ctl = &self.config.control;
        let carrying = self.ball.owner == (BallOwner::CarriedBy { team, index });
        if !carrying || !ready(self.team(team).cooldowns.shoot) {
            return;
        }
        let (cooldown, after_touch) = (ctl.shoot_cooldown, ctl.shot_aftertouch);
        let ball = self.ball.body.position;
        let aim = shot_aim_point(&self.config.field, team, ball.y, ctl.shot_post_inset, ctl.shot_depth_offset);
        self.team_mut(team).cooldowns.shoot = cooldown;
        let dir = (aim - ball).normalized_or(team.attack_dir());
        trace!(?team, index, ?aim, "human shot");
        let speed = self.config.physics.shot_speed;
        self.kick(BodyRef::Field { team, index }, dir * speed, after_touch);
    }

    /// Hand control to the teammate nearest the ball (possibly the current one).
    fn try_switch(&mut self, team: Team) {
        let cooldown = self.config.control.switch_cooldown;
        let ball = self.ball.body.position;
        let side = self.team_mut(team);
        if !ready(side.cooldowns.switch) {
            return;
        }
        side.cooldowns.switch = cooldown;
        if let Some(i) = side.nearest_player(ball) {
            trace!(?team, from = side.controlled, to = i, "switch");
            side.controlled = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::MatchConfig;
    use crate::engine::match_state::MatchPhase;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn open_play() -> MatchState {
        let mut state = MatchState::new(MatchConfig::default()).unwrap();
        state.phase = MatchPhase::InPlay;
        state
    }

    /// Park A's other players out of pass range so no target exists.
    fn isolate_striker(state: &mut MatchState) {
        for (i, p) in state.teams[0].players.iter_mut().enumerate().skip(1) {
            p.body.position = Vec2::new(1100.0, 100.0 + 100.0 * i as f32);
        }
    }

    #[test]
    fn test_sanitize() {
        let cmd = ControlCommand { shoot: true, ..ControlCommand::idle().with_move(f32::NAN, 0.5) };
        assert_eq!(cmd.sanitize(), ControlCommand::idle());
        let cmd = ControlCommand::idle().with_move(3.0, 4.0).sanitize();
        assert!((cmd.move_x - 0.6).abs() < 1e-6 && (cmd.move_y - 0.8).abs() < 1e-6);
        assert!(ControlCommand::idle().with_move(0.6, 0.8).is_sane());
        assert!(!ControlCommand::idle().with_move(f32::INFINITY, 0.0).is_sane());
    }

    #[test]
    fn test_command_json_defaults() {
        let cmd: ControlCommand = serde_json::from_str(r#"{ "move_x": 1.0, "dash": true }"#).unwrap();
        assert_eq!(cmd, ControlCommand { move_x: 1.0, dash: true, ..ControlCommand::default() });
    }

    #[test]
    fn test_cooldowns_tick_floor() {
        let mut cd = Cooldowns { pass: 0.1, dash: 1.0, ..Cooldowns::default() };
        cd.tick(0.25);
        assert_eq!(cd.pass, 0.0);
        assert!((cd.dash - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_movement_blends_toward_input() {
        let mut state = open_play();
        let mut events = Vec::new();
        let cmd = ControlCommand::idle().with_move(0.0, 1.0);
        state.apply_command(Team::A, &cmd, DT, &mut events);
        let p = state.team(Team::A).controlled_player();
        // 290 * 12.5 / 60
        assert!((p.body.velocity.y - 290.0 * 12.5 * DT).abs() < 1e-3);
        assert_eq!(p.facing, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_stunned_player_ignores_actions_but_can_switch() {
        let mut state = open_play();
        state.teams[0].players[0].stun = 0.5;
        state.ball.owner = BallOwner::Free;
        state.ball.body.position = state.teams[0].players[3].body.position;
        let cmd = ControlCommand { move_x: 1.0, dash: true, switch: true, ..ControlCommand::default() };
        let mut events = Vec::new();
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert_eq!(state.teams[0].players[0].body.velocity, Vec2::ZERO);
        assert!(events.is_empty());
        assert_eq!(state.team(Team::A).controlled, 3);
    }

    #[test]
    fn test_dash_respects_cooldown() {
        let mut state = open_play();
        let cmd = ControlCommand { dash: true, ..ControlCommand::default() };
        let mut events = Vec::new();
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert_eq!(events.len(), 1);
        assert!((state.teams[0].players[0].body.velocity.x - 520.0).abs() < 1e-3);
        assert_eq!(state.team(Team::A).cooldowns.dash, state.config.control.dash_cooldown);

        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_pass_without_target_goes_along_heading() {
        let mut state = open_play();
        isolate_striker(&mut state);
        let cmd = ControlCommand { pass: true, ..ControlCommand::default() };
        let mut events = Vec::new();
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert!(state.ball.owner.is_free());
        let v = state.ball.body.velocity;
        assert!((v.x - state.config.physics.pass_speed).abs() < 1e-2);
        assert_eq!(state.ball.after_touch, state.config.control.pass_aftertouch);
        assert_eq!(state.team(Team::A).cooldowns.pass, state.config.control.pass_cooldown);
    }

    #[test]
    fn test_first_touch_pass_on_free_ball() {
        let mut state = open_play();
        let p = state.teams[0].players[0].body.position;
        state.ball.owner = BallOwner::Free;
        state.ball.body.position = p + Vec2::new(25.0, 0.0);
        state.ball.body.velocity = Vec2::new(-600.0, 0.0);
        let cmd = ControlCommand { pass: true, ..ControlCommand::default() };
        let mut events = Vec::new();
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert_eq!(state.ball.kicker, Some(BodyRef::Field { team: Team::A, index: 0 }));
        assert!((state.ball.body.speed() - state.config.physics.pass_speed).abs() < 1e-2);

        // Out of reach: nothing happens and the cooldown is untouched.
        let mut state = open_play();
        state.ball.owner = BallOwner::Free;
        state.ball.body.position = p + Vec2::new(40.0, 0.0);
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert_eq!(state.ball.kicker, None);
        assert_eq!(state.team(Team::A).cooldowns.pass, 0.0);
    }

    #[test]
    fn test_shoot_requires_carrying() {
        let mut state = open_play();
        let cmd = ControlCommand { shoot: true, ..ControlCommand::default() };
        let mut events = Vec::new();
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert!(state.ball.owner.is_free());
        assert!((state.ball.body.speed() - state.config.physics.shot_speed).abs() < 1e-2);
        assert!(state.ball.body.velocity.x > 0.0);

        // Ball already gone: shoot is a no-op.
        let before = state.ball.body.velocity;
        state.team_mut(Team::A).cooldowns.shoot = 0.0;
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert_eq!(state.ball.body.velocity, before);
    }

    #[test]
    fn test_tackle_hits_foe_ahead() {
        let mut state = open_play();
        let p = state.teams[0].players[0].body.position;
        state.teams[1].players[2].body.position = p + Vec2::new(30.0, 0.0);
        let cmd = ControlCommand { tackle: true, ..ControlCommand::default() };
        let mut events = Vec::new();
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert!(state.teams[1].players[2].is_stunned());
        assert!(matches!(events[0], MatchEvent::Tackle { .. }));
        assert_eq!(state.team(Team::A).cooldowns.tackle, state.config.control.tackle_cooldown);
    }

    #[test]
    fn test_whiffed_tackle_still_costs_cooldown() {
        let mut state = open_play();
        let cmd = ControlCommand { tackle: true, ..ControlCommand::default() };
        let mut events = Vec::new();
        state.apply_command(Team::A, &cmd, DT, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.team(Team::A).cooldowns.tackle, state.config.control.tackle_cooldown);
    }

    #[test]
    fn test_prepare_drops_malformed_and_rescales_long() {
        let bad = ControlCommand { pass: true, dash: true, ..ControlCommand::idle().with_move(0.2, f32::INFINITY) };
        assert_eq!(prepare(Team::B, &bad), None);
        let long = ControlCommand { pass: true, ..ControlCommand::idle().with_move(2.0, 0.0) };
        let fixed = prepare(Team::B, &long).unwrap();
        assert!(fixed.pass);
        assert!((fixed.move_x - 1.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_sane_and_idempotent(x in proptest::num::f32::ANY, y in proptest::num::f32::ANY) {
            let cmd = ControlCommand::idle().with_move(x, y).sanitize();
            prop_assert!(cmd.is_sane());
            prop_assert_eq!(cmd.sanitize(), cmd);
        }

        #[test]
        fn prop_sane_commands_pass_through(x in -0.7f32..0.7, y in -0.7f32..0.7) {
            let cmd = ControlCommand::idle().with_move(x, y);
            prop_assert_eq!(prepare(Team::A, &cmd), Some(cmd));
        }
    }
}
