/// Counters kept alongside the score for one session.
///
/// - **Locked pieces**: pieces written into the grid
/// - **Cleared rows**: rows removed across the whole session
/// - **Clear counter**: how many locks cleared 0, 1, 2, 3 or 4 rows at once
///
/// The score itself lives on [`Grid`](crate::Grid).
///
/// # Example
///
/// ```
/// use brickfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_lock(2);
/// stats.record_lock(0);
///
/// assert_eq!(stats.locked_pieces(), 2);
/// assert_eq!(stats.cleared_rows(), 2);
/// assert_eq!(stats.clear_counter()[2], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    locked_pieces: usize,
    cleared_rows: usize,
    clear_counter: [usize; 5],
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            locked_pieces: 0,
            cleared_rows: 0,
            clear_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    #[must_use]
    pub const fn cleared_rows(&self) -> usize {
        self.cleared_rows
    }

    /// Returns a histogram of locks by rows cleared at once.
    ///
    /// Index `n` counts locks that cleared exactly `n` rows. Clears of more
    /// than 4 rows (only possible on a hand-filled grid) are left out.
    #[must_use]
    pub const fn clear_counter(&self) -> &[usize; 5] {
        &self.clear_counter
    }

    /// Records one locked piece and the rows it cleared.
    pub const fn record_lock(&mut self, cleared_rows: usize) {
        self.locked_pieces += 1;
        self.cleared_rows += cleared_rows;
        if cleared_rows < self.clear_counter.len() {
            self.clear_counter[cleared_rows] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_clear_counts_rows_only() {
        let mut stats = GameStats::new();
        stats.record_lock(6);
        assert_eq!(stats.locked_pieces(), 1);
        assert_eq!(stats.cleared_rows(), 6);
        assert_eq!(stats.clear_counter(), &[0; 5]);
    }
}
