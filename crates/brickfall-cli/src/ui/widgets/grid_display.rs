use std::iter;

use brickfall_engine::{Cell, Grid, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

/// The playing field: locked cells with the falling piece drawn on top.
#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    falling_piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            falling_piece: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Option<&'a Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Grid::COLS as u16 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Grid::ROWS as u16 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    /// Locked cells with the visible part of the falling piece overlaid.
    fn cells(&self) -> [[Cell; Grid::COLS]; Grid::ROWS] {
        let mut cells = [[Cell::Empty; Grid::COLS]; Grid::ROWS];
        for (dst, src) in iter::zip(&mut cells, self.grid.rows()) {
            *dst = *src;
        }
        if let Some(piece) = self.falling_piece {
            for (row, col) in piece.visible_positions() {
                cells[row][col] = Cell::Piece(piece.kind());
            }
        }
        cells
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..Grid::COLS).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let row_constraints = (0..Grid::ROWS).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Grid::ROWS }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Grid::COLS }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(cell, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use brickfall_engine::{DiscardEvents, PieceKind};

    use super::*;

    #[test]
    fn test_falling_piece_overlays_visible_cells() {
        let mut grid = Grid::new();
        grid.set_cell(19, 0, Cell::Piece(PieceKind::Z));
        let mut piece = Piece::new(PieceKind::O);
        piece.move_down(&mut grid, &mut DiscardEvents);

        let cells = GridDisplay::new(&grid).falling_piece(Some(&piece)).cells();
        assert_eq!(cells[19][0], Cell::Piece(PieceKind::Z));
        assert_eq!(cells[0][3], Cell::Piece(PieceKind::O));
        assert_eq!(cells[0][4], Cell::Piece(PieceKind::O));
        assert_eq!(cells.iter().flatten().filter(|c| !c.is_empty()).count(), 3);
        // overlay only; the grid itself is untouched
        assert!(grid.cell(0, 3).is_empty());
    }

    #[test]
    fn test_size_includes_border() {
        let grid = Grid::new();
        let display = GridDisplay::new(&grid).block(BlockWidget::bordered());
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 22);
    }
}
