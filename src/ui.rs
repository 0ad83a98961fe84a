pub mod charting;
pub mod geometry;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    grid::Cell,
    session::{GameSession, Phase},
    ui::geometry::GridGeometry,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const HUD_LINES: u16 = 4;

const PLAY_LEGEND: &str =
    "click or (space) the highlighted cell / arrows move / (g)rid size / (esc)ape";
const PLAY_LEGEND_SHORT: &str = "(space) click / (g)rid / (esc)ape";
const RESULTS_LEGEND: &str = "(r)eset / (esc)ape";

/// Screen regions while a round is idle or running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayLayout {
    pub hud: Rect,
    pub board: Rect,
    pub legend: Rect,
}

pub fn play_layout(area: Rect) -> PlayLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(HUD_LINES),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    PlayLayout {
        hud: chunks[0],
        board: chunks[1],
        legend: chunks[2],
    }
}

/// Board placement for a full terminal area, shared by rendering and mouse
/// hit-testing so both agree on where every cell is.
pub fn board_geometry(area: Rect, session: &GameSession) -> Option<GridGeometry> {
    GridGeometry::fit(play_layout(area).board, session.grid_size())
}

/// Renders one frame of the game: HUD and board while playing, results once
/// the round is over.
pub struct GameView<'a> {
    pub session: &'a GameSession,
    /// Keyboard selection, drawn as a marker on the board
    pub cursor: Cell,
}

impl<'a> GameView<'a> {
    pub fn new(session: &'a GameSession, cursor: Cell) -> Self {
        Self { session, cursor }
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session.phase() {
            Phase::Idle | Phase::Active => self.render_play(area, buf),
            Phase::GameOver => self.render_results(area, buf),
        }
    }
}

impl GameView<'_> {
    fn render_play(&self, area: Rect, buf: &mut Buffer) {
        let layout = play_layout(area);
        let readout = self.session.readout();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let status_style = dim_style.add_modifier(Modifier::ITALIC);

        let status = match readout.phase {
            Phase::Idle => "click the highlighted cell to start",
            _ => "",
        };

        let hud = Paragraph::new(vec![
            Line::from(Span::styled(readout.time, bold_style)),
            Line::from(Span::styled(format!("{} BPS", readout.bps), bold_style)),
            Line::from(Span::styled(
                format!("{} NTPM · {}", readout.ntpm, readout.grid_size),
                bold_style,
            )),
            Line::from(Span::styled(status, status_style)),
        ])
        .alignment(Alignment::Center);
        hud.render(layout.hud, buf);

        match GridGeometry::fit(layout.board, self.session.grid_size()) {
            Some(geometry) => self.render_board(&geometry, buf),
            None => {
                Paragraph::new(Span::styled(
                    format!("terminal too small for a {} grid", readout.grid_size),
                    Style::default().fg(Color::Yellow),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(layout.board, buf);
            }
        }

        let legend = if PLAY_LEGEND.width() <= layout.legend.width as usize {
            PLAY_LEGEND
        } else {
            PLAY_LEGEND_SHORT
        };
        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(layout.legend, buf);
    }

    fn render_board(&self, geometry: &GridGeometry, buf: &mut Buffer) {
        let target = self.session.target();
        let side = self.session.grid_size().side();

        let cell_style = Style::default().bg(Color::DarkGray);
        let target_style = Style::default().bg(Color::White);

        for row in 0..side {
            for col in 0..side {
                let cell = Cell::new(row, col);
                let mut rect = geometry.cell_rect(cell);
                // leave a one column gutter between wide cells
                if rect.width > 1 {
                    rect.width -= 1;
                }
                let style = if cell == target {
                    target_style
                } else {
                    cell_style
                };
                buf.set_style(rect, style);
            }
        }

        let cursor_rect = geometry.cell_rect(self.cursor);
        if let Some(marker) = buf.cell_mut((cursor_rect.x, cursor_rect.y)) {
            let fg = if self.cursor == target {
                Color::Black
            } else {
                Color::Yellow
            };
            marker.set_symbol("+");
            marker.set_style(Style::default().fg(fg).add_modifier(Modifier::BOLD));
        }
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let session = self.session;
        let summary = session.summary();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let magenta_style = Style::default().fg(Color::Magenta);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),    // chart
                Constraint::Length(1), // scores
                Constraint::Length(1), // click rhythm
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        let (overall_duration, highest_bps) =
            charting::compute_chart_params(session.history(), session.round_secs());

        let tuples: Vec<(f64, f64)> = session.history().iter().map(|&p| p.into()).collect();
        let datasets = vec![Dataset::default()
            .marker(ratatui::symbols::Marker::Braille)
            .style(magenta_style)
            .graph_type(GraphType::Line)
            .data(&tuples)];

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title("seconds")
                    .bounds([1.0, overall_duration])
                    .labels(vec![
                        Span::styled("1", bold_style),
                        Span::styled(charting::format_label(overall_duration), bold_style),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("bps")
                    .bounds([0.0, highest_bps])
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(charting::format_label(highest_bps), bold_style),
                    ]),
            );
        chart.render(chunks[0], buf);

        Paragraph::new(Span::styled(
            format!(
                "{} BPS   {} NTPM   {} hits   {} misses   {}% acc   {}",
                crate::scoring::format_bps(summary.bps),
                summary.ntpm,
                summary.hits,
                summary.misses,
                summary.accuracy,
                session.grid_size()
            ),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let rhythm = match (summary.mean_interval_ms, summary.interval_std_dev_ms) {
            (Some(mean), Some(sd)) => format!("{mean:.0} ms between clicks ({sd:.0} sd)"),
            _ => String::from("not enough clicks to measure rhythm"),
        };
        Paragraph::new(Span::styled(rhythm, Style::default().fg(Color::Cyan)))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(RESULTS_LEGEND, italic_style)).render(chunks[4], buf);
    }
}
