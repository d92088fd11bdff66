use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a game with random input and print a JSON summary
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["brickfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_parse_simulate_args() {
        let args = CommandArgs::try_parse_from([
            "brickfall",
            "simulate",
            "--seed",
            "000000000000000000000000000000ff",
            "--max-commands",
            "50",
        ])
        .unwrap();
        let Some(Mode::Simulate(arg)) = args.mode else {
            panic!("expected simulate mode");
        };
        assert_eq!(arg.max_commands, 50);
        assert_eq!(arg.seed.unwrap().to_bytes()[15], 0xff);
    }

    #[test]
    fn test_rejects_malformed_seed() {
        let result = CommandArgs::try_parse_from(["brickfall", "play", "--seed", "nope"]);
        assert!(result.is_err());
    }
}
