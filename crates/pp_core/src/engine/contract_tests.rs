//! Whole-match contract tests: scripted scenarios, long AI-vs-AI runs and
//! replay determinism.

use proptest::prelude::*;
use sha2::{Digest, Sha256};

use super::body::{BallOwner, Team};
use super::config::MatchConfig;
use super::control::{ControlCommand, Cooldowns};
use super::events::MatchEvent;
use super::match_state::{MatchPhase, MatchState};
use super::simulation::{TeamCommands, TickOutput};
use super::timestep::DEFAULT_DT;
use super::types::Vec2;

fn open_play(config: MatchConfig) -> MatchState {
    let mut state = MatchState::new(config).unwrap();
    state.phase = MatchPhase::InPlay;
    state
}

fn give_ball(state: &mut MatchState, team: Team, index: usize) {
    state.ball.owner = BallOwner::CarriedBy { team, index };
    state.ball.possession = Some(team);
    state.ball.last_touch = team;
    state.ball.body.velocity = Vec2::ZERO;
    state.team_mut(team).controlled = index;
    state.slave_carried_ball();
}

fn place(state: &mut MatchState, team: Team, positions: [(f32, f32); 5]) {
    for (p, (x, y)) in state.team_mut(team).players.iter_mut().zip(positions) {
        p.body.position = Vec2::new(x, y);
        p.body.velocity = Vec2::ZERO;
        p.facing = team.attack_dir();
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Hash of every snapshot of an AI-vs-AI run.
fn run_hash(seed: u64, ticks: usize) -> String {
    let mut state = MatchState::new(MatchConfig::default().with_seed(seed)).unwrap();
    let mut bytes = Vec::new();
    for _ in 0..ticks {
        let out = state.advance(&TeamCommands::none(), DEFAULT_DT);
        bytes.extend_from_slice(out.snapshot.to_json().unwrap().as_bytes());
        bytes.push(b'\n');
    }
    sha256_hex(&bytes)
}

fn assert_tick_contracts(prev_goal: &mut Option<Team>, out: &TickOutput, state: &MatchState) {
    if let Err(violation) = state.check_invariants() {
        panic!("tick {}: {}", state.tick, violation);
    }
    if let Some(scoring) = prev_goal.take() {
        let conceding = scoring.opponent();
        assert_eq!(out.events, vec![MatchEvent::Kickoff { team: conceding }]);
        assert_eq!(out.snapshot.ball.owner.team(), Some(conceding));
    }
    for event in &out.events {
        if let MatchEvent::Goal { scoring_team } = event {
            *prev_goal = Some(*scoring_team);
        }
    }
    assert!(out.snapshot.ball.position.is_finite());
}

#[test]
fn test_human_pass_reaches_teammate() {
    let mut state = open_play(MatchConfig::default());
    place(
        &mut state,
        Team::A,
        [(500.0, 360.0), (580.0, 360.0), (150.0, 320.0), (150.0, 360.0), (150.0, 400.0)],
    );
    place(
        &mut state,
        Team::B,
        [(1100.0, 150.0), (1100.0, 250.0), (1100.0, 350.0), (1100.0, 450.0), (1100.0, 550.0)],
    );
    give_ball(&mut state, Team::A, 0);

    let pass = ControlCommand { pass: true, ..ControlCommand::idle() };
    let first = state.advance(&TeamCommands { a: Some(pass), b: None }, DEFAULT_DT);
    assert!(first.snapshot.ball.owner.is_free());
    assert!(first.snapshot.ball.velocity.x > 0.0);

    let idle = ControlCommand::idle();
    let mut received = false;
    for _ in 0..5 {
        let out = state.advance(&TeamCommands { a: Some(idle), b: None }, DEFAULT_DT);
        assert!(!out.events.iter().any(|e| matches!(e, MatchEvent::Turnover { .. })));
        if out.snapshot.ball.owner == (BallOwner::CarriedBy { team: Team::A, index: 1 }) {
            received = true;
            break;
        }
    }
    assert!(received, "pass never reached A#1");
    assert_eq!(state.team(Team::A).controlled, 1);
    assert!((state.ball.body.position.y - 360.0).abs() < 1.0);
}

#[test]
fn test_ai_striker_shoots_and_scores() {
    let mut state = open_play(MatchConfig::default());
    place(
        &mut state,
        Team::B,
        [(300.0, 150.0), (300.0, 250.0), (300.0, 350.0), (300.0, 450.0), (300.0, 550.0)],
    );
    state.teams[0].players[0].body.position = Vec2::new(1070.0, 440.0);
    state.teams[1].goalkeeper.body.position = Vec2::new(1174.0, 226.0);
    give_ball(&mut state, Team::A, 0);

    let first = state.advance(&TeamCommands::none(), DEFAULT_DT);
    assert!(first.snapshot.ball.owner.is_free(), "striker should shoot at once");
    assert!(first.snapshot.ball.velocity.x > 0.0);
    assert!(first.snapshot.ball.velocity.length() > 900.0);

    let mut scored_at = None;
    for _ in 0..60 {
        let out = state.advance(&TeamCommands::none(), DEFAULT_DT);
        if out.events.contains(&MatchEvent::Goal { scoring_team: Team::A }) {
            scored_at = Some(state.tick);
            break;
        }
    }
    assert!(scored_at.is_some(), "shot never crossed the line");
    assert_eq!(state.score.goals_a, 1);
    assert_eq!(state.score.goals_b, 0);

    let next = state.advance(&TeamCommands::none(), DEFAULT_DT);
    assert_eq!(next.events, vec![MatchEvent::Kickoff { team: Team::B }]);
    assert!(matches!(next.snapshot.ball.owner, BallOwner::CarriedBy { team: Team::B, .. }));
}

#[test]
fn test_ai_vs_ai_holds_invariants() {
    for seed in [1u64, 7, 42] {
        let mut state = MatchState::new(MatchConfig::default().with_seed(seed)).unwrap();
        let mut prev_goal = None;
        for _ in 0..1800 {
            let out = state.advance(&TeamCommands::none(), DEFAULT_DT);
            assert_tick_contracts(&mut prev_goal, &out, &state);
        }
        assert!(state.clock > 29.0);
    }
}

#[test]
fn test_arcade_preset_holds_invariants() {
    let mut state = MatchState::new(MatchConfig::arcade().with_seed(3)).unwrap();
    let mut prev_goal = None;
    for _ in 0..1200 {
        let out = state.advance(&TeamCommands::none(), DEFAULT_DT);
        assert_tick_contracts(&mut prev_goal, &out, &state);
    }
}

#[test]
fn test_held_dash_respects_cooldown() {
    let mut state = MatchState::new(MatchConfig::default()).unwrap();
    let cooldown = state.config.control.dash_cooldown;
    let dash = ControlCommand { dash: true, ..ControlCommand::idle().with_move(1.0, 0.0) };

    let mut dash_clocks = Vec::new();
    for _ in 0..600 {
        let out = state.advance(&TeamCommands { a: Some(dash), b: None }, DEFAULT_DT);
        if out.events.iter().any(|e| matches!(e, MatchEvent::Dash { team: Team::A, .. })) {
            dash_clocks.push(state.clock);
        }
    }
    assert!(dash_clocks.len() >= 3, "only {} dashes", dash_clocks.len());
    for pair in dash_clocks.windows(2) {
        assert!(pair[1] - pair[0] >= cooldown - 1e-3, "dashes {:?} too close", pair);
    }
}

/// Clocks at which team A's `cooldown` was restarted while `cmd` was held
/// every tick. With `carry`, A's controlled player is handed the ball before
/// each open-play tick so ball actions are always possible.
fn held_action_clocks(cmd: ControlCommand, carry: bool, cooldown: fn(&Cooldowns) -> f32) -> Vec<f32> {
    let mut state = MatchState::new(MatchConfig::default()).unwrap();
    let mut clocks = Vec::new();
    for _ in 0..600 {
        if carry && state.phase.is_in_play() {
            let index = state.team(Team::A).controlled;
            give_ball(&mut state, Team::A, index);
            state.ball.kicker = None;
            state.ball.after_touch = 0.0;
        }
        let before = cooldown(&state.team(Team::A).cooldowns);
        state.advance(&TeamCommands { a: Some(cmd), b: None }, DEFAULT_DT);
        if cooldown(&state.team(Team::A).cooldowns) > before {
            clocks.push(state.clock);
        }
    }
    clocks
}

fn assert_spaced(name: &str, clocks: &[f32], cooldown: f32, min_count: usize) {
    assert!(clocks.len() >= min_count, "{}: only {} firings", name, clocks.len());
    for pair in clocks.windows(2) {
        assert!(pair[1] - pair[0] >= cooldown - 1e-3, "{}: {:?} closer than {}", name, pair, cooldown);
    }
}

#[test]
fn test_held_pass_respects_cooldown() {
    let control = MatchConfig::default().control;
    let cmd = ControlCommand { pass: true, ..ControlCommand::idle() };
    let clocks = held_action_clocks(cmd, true, |cd| cd.pass);
    assert_spaced("pass", &clocks, control.pass_cooldown, 10);
}

#[test]
fn test_held_shoot_respects_cooldown() {
    let control = MatchConfig::default().control;
    let cmd = ControlCommand { shoot: true, ..ControlCommand::idle() };
    let clocks = held_action_clocks(cmd, true, |cd| cd.shoot);
    assert_spaced("shoot", &clocks, control.shoot_cooldown, 10);
}

#[test]
fn test_held_tackle_respects_cooldown() {
    let control = MatchConfig::default().control;
    let cmd = ControlCommand { tackle: true, ..ControlCommand::idle().with_move(0.0, 1.0) };
    let clocks = held_action_clocks(cmd, false, |cd| cd.tackle);
    assert_spaced("tackle", &clocks, control.tackle_cooldown, 5);
}

#[test]
fn test_held_switch_respects_cooldown() {
    let control = MatchConfig::default().control;
    let cmd = ControlCommand { switch: true, ..ControlCommand::idle().with_move(-1.0, 0.0) };
    let clocks = held_action_clocks(cmd, false, |cd| cd.switch);
    assert_spaced("switch", &clocks, control.switch_cooldown, 10);
}

#[test]
fn test_malformed_commands_never_act() {
    let mut state = open_play(MatchConfig::default());
    give_ball(&mut state, Team::A, 0);
    let bad = ControlCommand {
        move_x: f32::NAN,
        pass: true,
        shoot: true,
        tackle: true,
        dash: true,
        switch: true,
        ..ControlCommand::default()
    };
    for _ in 0..30 {
        let out = state.advance(&TeamCommands { a: Some(bad), b: None }, DEFAULT_DT);
        assert!(!out.events.iter().any(|e| matches!(e, MatchEvent::Dash { .. } | MatchEvent::Tackle { .. })));
    }
    assert_eq!(state.team(Team::A).cooldowns, Cooldowns::default());
    assert_eq!(state.team(Team::A).controlled, 0);
}

#[test]
fn test_same_seed_same_snapshots() {
    assert_eq!(run_hash(42, 600), run_hash(42, 600));
}

#[test]
fn test_different_seed_diverges() {
    assert_ne!(run_hash(42, 600), run_hash(43, 600));
}

#[test]
fn test_replayed_command_stream_matches() {
    let commands: Vec<TeamCommands> = (0..240)
        .map(|i| {
            let angle = i as f32 * 0.05;
            let cmd = ControlCommand {
                pass: i % 45 == 0,
                shoot: i % 70 == 0,
                tackle: i % 30 == 0,
                switch: i % 90 == 0,
                ..ControlCommand::idle().with_move(angle.cos(), angle.sin())
            };
            TeamCommands { a: Some(cmd), b: None }
        })
        .collect();

    let play = || {
        let mut state = MatchState::new(MatchConfig::default().with_seed(5)).unwrap();
        commands
            .iter()
            .map(|c| state.advance(c, DEFAULT_DT))
            .collect::<Vec<_>>()
    };
    assert_eq!(play(), play());
}

fn command_strategy() -> impl Strategy<Value = ControlCommand> {
    (
        prop_oneof![Just(f32::NAN), Just(f32::INFINITY), -3.0f32..3.0],
        -3.0f32..3.0,
        any::<[bool; 5]>(),
    )
        .prop_map(|(x, y, [pass, shoot, tackle, dash, switch])| ControlCommand {
            move_x: x,
            move_y: y,
            pass,
            shoot,
            tackle,
            dash,
            switch,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn prop_random_commands_hold_invariants(
        seed in any::<u64>(),
        stream in proptest::collection::vec((command_strategy(), proptest::option::of(command_strategy())), 120..240),
    ) {
        let mut state = MatchState::new(MatchConfig::default().with_seed(seed)).unwrap();
        let mut prev_goal = None;
        for (a, b) in stream {
            let out = state.advance(&TeamCommands { a: Some(a), b }, DEFAULT_DT);
            assert_tick_contracts(&mut prev_goal, &out, &state);
            prop_assert_eq!(out.snapshot.controlled(Team::A).count(), 1);
        }
    }
}
