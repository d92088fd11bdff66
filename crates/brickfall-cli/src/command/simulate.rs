use std::io::{self, Write as _};

use brickfall_engine::{Command, CommandQueue, GameSession, PieceSeed};
use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::Serialize;

/// PCG stream used for simulated input, kept apart from the piece stream.
const INPUT_STREAM: u64 = 0xb51c_f0e1;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Stop after this many commands even if the game is still running
    #[clap(long, default_value_t = 10_000)]
    pub(crate) max_commands: usize,
    /// Player commands issued between two timer ticks
    #[clap(long, default_value_t = 4)]
    pub(crate) commands_per_tick: usize,
    /// Pretty-print the JSON summary
    #[clap(long)]
    pub(crate) pretty: bool,
}

/// Outcome of one headless game, printed as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SimulationSummary {
    seed: PieceSeed,
    score: usize,
    cleared_rows: usize,
    locked_pieces: usize,
    commands: usize,
    game_over: bool,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        max_commands,
        commands_per_tick,
        pretty,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let summary = simulate(seed, *max_commands, *commands_per_tick);

    let mut stdout = io::stdout().lock();
    if *pretty {
        serde_json::to_writer_pretty(&mut stdout, &summary)?;
    } else {
        serde_json::to_writer(&mut stdout, &summary)?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Plays one game with uniformly random player commands and a tick after
/// every `commands_per_tick` of them, all through one command queue.
pub(crate) fn simulate(
    seed: PieceSeed,
    max_commands: usize,
    commands_per_tick: usize,
) -> SimulationSummary {
    let bytes = seed.to_bytes();
    let mut state = [0; 8];
    state.copy_from_slice(&bytes[..8]);
    let mut rng = Pcg32::new(u64::from_le_bytes(state), INPUT_STREAM);

    let mut session = GameSession::with_seed(seed);
    session.start();

    let mut queue = CommandQueue::new();
    let mut commands = 0;
    let mut since_tick = 0;
    while commands < max_commands && !session.grid().is_game_over() {
        let command = if since_tick == commands_per_tick {
            since_tick = 0;
            Command::Tick
        } else {
            since_tick += 1;
            rng.random()
        };
        queue.push(command);
        session.process(&mut queue);
        session.drain_events().for_each(drop);
        commands += 1;
    }

    SimulationSummary {
        seed,
        score: session.score(),
        cleared_rows: session.stats().cleared_rows(),
        locked_pieces: session.stats().locked_pieces(),
        commands,
        game_over: session.grid().is_game_over(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_summary() {
        let seed = PieceSeed::from(2024);
        assert_eq!(simulate(seed, 2_000, 4), simulate(seed, 2_000, 4));
    }

    #[test]
    fn test_stops_at_command_limit() {
        let summary = simulate(PieceSeed::from(1), 10, 4);
        assert_eq!(summary.commands, 10);
        assert!(!summary.game_over);

        let summary = simulate(PieceSeed::from(1), 0, 4);
        assert_eq!(summary.commands, 0);
        assert_eq!(summary.locked_pieces, 0);
    }

    #[test]
    fn test_runs_until_game_over() {
        let summary = simulate(PieceSeed::from(99), usize::MAX, 0);
        assert!(summary.game_over);
        assert!(summary.locked_pieces > 0);
        assert_eq!(summary.score, summary.cleared_rows * 10);
    }

    #[test]
    fn test_huge_tick_spacing_never_ticks() {
        let summary = simulate(PieceSeed::from(3), 200, usize::MAX);
        assert!(summary.commands <= 200);
        assert_eq!(summary.score, summary.cleared_rows * 10);
        assert_eq!(
            simulate(PieceSeed::from(3), 200, usize::MAX),
            simulate(PieceSeed::from(3), 200, usize::MAX - 1)
        );
    }

    #[test]
    fn test_summary_json_fields() {
        let summary = simulate(PieceSeed::from(5), 0, 4);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["seed"], "00000000000000000000000000000005");
        assert_eq!(json["score"], 0);
        assert_eq!(json["game_over"], false);
        for key in ["cleared_rows", "locked_pieces", "commands"] {
            assert!(json.get(key).is_some(), "{key}");
        }
    }
}
