use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use pp_core::engine::timestep::DEFAULT_DT;
use pp_core::{ControlCommand, MatchConfig, MatchState, TeamCommands};

fn bench_single_tick(c: &mut Criterion) {
    let mut state = MatchState::new(MatchConfig::default()).expect("default config");
    // Get past the kickoff freeze so the tick does real work.
    for _ in 0..60 {
        state.advance(&TeamCommands::none(), DEFAULT_DT);
    }
    c.bench_function("advance_ai_vs_ai", |b| {
        b.iter_batched(
            || state.clone(),
            |mut s| black_box(s.advance(&TeamCommands::none(), DEFAULT_DT)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_half(c: &mut Criterion) {
    let cmd = ControlCommand { dash: true, ..ControlCommand::idle().with_move(1.0, 0.3) };
    let commands = TeamCommands { a: Some(cmd), b: None };
    c.bench_function("thirty_seconds_human_vs_ai", |b| {
        b.iter(|| {
            let mut state = MatchState::new(MatchConfig::default().with_seed(9)).expect("default config");
            for _ in 0..1800 {
                black_box(state.advance(&commands, DEFAULT_DT));
            }
            state.score
        })
    });
}

criterion_group!(benches, bench_single_tick, bench_full_half);
criterion_main!(benches);
