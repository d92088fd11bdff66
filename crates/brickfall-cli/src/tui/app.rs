use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// An application driven by [`Tui::run`].
///
/// Every method is called from the loop thread, one event at a time.
pub trait App {
    /// Called once before the first event, to set the tick interval and render mode.
    fn init(&mut self, tui: &mut Tui);

    /// Checked before each event; `true` ends the loop.
    fn should_exit(&self) -> bool;

    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Called on every tick of the interval set with [`Tui::set_tick_interval`].
    fn update(&mut self, tui: &mut Tui);
}
