//! Headless match runner
//!
//! Loads a config, plays a fixed number of ticks and tallies the result.
//! Snapshots can be streamed out as JSON lines for replay tooling.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pp_core::engine::timestep::ticks_for;
use pp_core::{BallOwner, ControlCommand, MatchConfig, MatchState, Score, Team, TeamCommands};
use serde::Serialize;
use tracing::{debug, info};

/// Preset, optionally overridden by a JSON or YAML file.
pub fn load_config(preset: &str, path: Option<&Path>, seed: Option<u64>) -> Result<MatchConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let yaml = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            );
            let parsed = if yaml { MatchConfig::from_yaml_str(&text) } else { MatchConfig::from_json_str(&text) };
            parsed.with_context(|| format!("parsing config {}", path.display()))?
        }
        None => MatchConfig::preset(preset).with_context(|| format!("loading preset '{}'", preset))?,
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub seconds: f32,
    pub dt: f32,
    /// Drive team A with the scripted chaser instead of the AI
    pub scripted_a: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub clock: f32,
    pub score: Score,
    pub events: BTreeMap<&'static str, u32>,
}

/// Simple stand-in for a human: chase the ball, shoot when carrying in range.
pub fn scripted_command(state: &MatchState, team: Team) -> ControlCommand {
    let me = state.team(team).controlled_player();
    let ball = state.ball.body.position;
    let to_ball = (ball - me.body.position).normalized_or(team.attack_dir());
    let carrying = state.ball.owner == BallOwner::CarriedBy { team, index: state.team(team).controlled };

    if carrying {
        let goal_dir = team.attack_dir();
        let near_goal = state.field().distance_to_attacked_goal_line(team, ball) < 220.0;
        ControlCommand { shoot: near_goal, ..ControlCommand::idle().with_move(goal_dir.x, goal_dir.y) }
    } else {
        let close = me.body.position.distance(ball) < 60.0;
        ControlCommand {
            tackle: close && state.ball.owner.team() == Some(team.opponent()),
            switch: !close,
            ..ControlCommand::idle().with_move(to_ball.x, to_ball.y)
        }
    }
}

/// Play one match. Each tick's snapshot is written to `snapshots` as a JSON line.
pub fn run_match(config: MatchConfig, opts: &RunOptions, mut snapshots: Option<&mut dyn Write>) -> Result<RunSummary> {
    let seed = config.seed;
    let mut state = MatchState::new(config).context("building match")?;
    let ticks = ticks_for(opts.seconds, opts.dt);
    info!(seed, ticks, dt = opts.dt, scripted_a = opts.scripted_a, "match start");

    let mut events: BTreeMap<&'static str, u32> = BTreeMap::new();
    for _ in 0..ticks {
        let commands = TeamCommands {
            a: opts.scripted_a.then(|| scripted_command(&state, Team::A)),
            b: None,
        };
        let out = state.advance(&commands, opts.dt);
        for event in &out.events {
            *events.entry(event.kind()).or_default() += 1;
            debug!(tick = out.snapshot.tick, ?event, "event");
        }
        if let Some(w) = snapshots.as_mut() {
            let line = out.snapshot.to_json().context("encoding snapshot")?;
            writeln!(w, "{}", line).context("writing snapshot")?;
        }
    }

    info!(goals_a = state.score.goals_a, goals_b = state.score.goals_b, "match end");
    Ok(RunSummary { seed, ticks: state.tick, clock: state.clock, score: state.score, events })
}
