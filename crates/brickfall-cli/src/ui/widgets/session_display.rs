use brickfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{GridDisplay, StatsDisplay, color, style};

/// The whole game screen: stats panel, playing field and state popup.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    cleared_rows: Option<usize>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            cleared_rows: None,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    /// Highlights the field after rows were cleared.
    pub fn cleared_rows(self, cleared_rows: Option<usize>) -> Self {
        Self {
            cleared_rows,
            ..self
        }
    }

    fn border_color(&self) -> Color {
        match self.session.state() {
            SessionState::Playing if self.cleared_rows.is_some() => color::CYAN,
            SessionState::Playing => color::WHITE,
            SessionState::Idle => color::GRAY,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn popup(&self) -> Option<(&'static str, Style)> {
        match self.session.state() {
            SessionState::Idle | SessionState::Playing => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let border_color = self.border_color();

        let field_block = {
            let block = Block::bordered()
                .border_style(border_color)
                .style(style::DEFAULT);
            match self.cleared_rows {
                Some(1) => block.title(Line::from(" +1 ROW ").centered()),
                Some(n) => block.title(Line::from(format!(" +{n} ROWS ")).centered()),
                None => block,
            }
        };
        let field = GridDisplay::new(self.session.grid())
            .falling_piece(self.session.falling_piece())
            .block(field_block);
        let stats = StatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::symmetric(
                    self.horizontal_padding,
                    self.vertical_padding,
                ))
                .border_style(border_color)
                .style(style::DEFAULT),
        );

        let [stats_column, field_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(field.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);
        let [field_area] = Layout::vertical([Constraint::Length(field.height())]).areas(field_column);

        let field_width = field.width();
        stats.render(stats_area, buf);
        field.render(field_area, buf);

        if let Some((text, style)) = self.popup() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = field_area.centered(Constraint::Length(field_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
