use std::collections::VecDeque;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// A request to change the falling piece.
///
/// Timer ticks and player input both become commands, so a single consumer
/// can apply them strictly one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    /// Player-requested move down.
    SoftDrop,
    /// Timer-driven move down.
    Tick,
}

/// Picks one of the player commands uniformly at random (never [`Command::Tick`]).
impl Distribution<Command> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Command {
        match rng.random_range(0..4) {
            0 => Command::MoveLeft,
            1 => Command::MoveRight,
            2 => Command::Rotate,
            _ => Command::SoftDrop,
        }
    }
}

/// First-in, first-out queue of pending [`Command`]s.
///
/// Producers (timer, input) only push; the session pops and applies each
/// command to completion before looking at the next one.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops every pending command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = CommandQueue::new();
        queue.push(Command::Tick);
        queue.extend([Command::MoveLeft, Command::Rotate]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(Command::Tick));
        assert_eq!(queue.pop(), Some(Command::MoveLeft));
        assert_eq!(queue.pop(), Some(Command::Rotate));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut queue = CommandQueue::new();
        queue.extend([Command::SoftDrop; 5]);
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_random_commands_exclude_tick() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let command: Command = rng.random();
            assert!(!command.is_tick());
        }
    }
}
