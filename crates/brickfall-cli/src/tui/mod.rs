//! Single-threaded terminal runtime.
//!
//! Timer ticks, renders and terminal input are all produced by one
//! [`EventLoop`](event_loop::EventLoop) and handed to an [`App`] one at a
//! time, so game state is never touched from two places at once.

mod app;
mod event_loop;
mod runner;

pub use self::{app::App, event_loop::RenderMode, runner::Tui};
