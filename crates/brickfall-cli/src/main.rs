mod command;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
