use std::time::Duration;

use brickfall_engine::{GameSession, PieceSeed};

use crate::{
    command::play::app::PlayApp,
    tui::{RenderMode, Tui},
};

mod app;

const DEFAULT_DROP_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Milliseconds between automatic drops
    #[clap(
        long,
        default_value_t = DEFAULT_DROP_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    drop_interval_ms: u64,
    /// Redraw at a fixed rate (frames per second) instead of only after changes
    #[clap(long)]
    frame_rate: Option<u32>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            frame_rate: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        drop_interval_ms,
        frame_rate,
    } = arg;

    let session = seed.map_or_else(GameSession::new_random, GameSession::with_seed);
    let render_mode = frame_rate
        .filter(|&rate| rate > 0)
        .map_or(RenderMode::OnDirty, |rate| {
            RenderMode::Interval(Duration::from_secs(1) / rate)
        });

    let mut app = PlayApp::new(session, Duration::from_millis(*drop_interval_ms), render_mode);
    Tui::new().run(&mut app)?;

    let stats = app.session().stats();
    println!(
        "score: {}, rows: {}, pieces: {}",
        app.session().score(),
        stats.cleared_rows(),
        stats.locked_pieces()
    );
    Ok(())
}
