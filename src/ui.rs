//! Layout and drawing: playfield, next preview, score panel and screen overlays.

use crate::app::{Screen, Session};
use crate::grid::Grid;
use crate::theme::{Paint, Theme};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::collections::HashSet;
use std::time::Instant;
use tachyonfx::{
    CellFilter, Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx, ref_count,
};

/// Terminal columns per grid cell; keeps cells roughly square.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 20;
const LINE_CLEAR_FADE_MS: u32 = 300;

/// Outer size (border included) of the playfield for a grid.
fn playfield_outer_size(grid: &Grid) -> (u16, u16) {
    (
        grid.width() as u16 * CELL_WIDTH + 2,
        grid.height() as u16 + 2,
    )
}

/// Fade of the rows removed by the latest clear. Created by the app when a
/// `ClearRow` sound is seen; the effect itself is built on first draw.
pub struct LineClearFlash {
    rows: Vec<usize>,
    effect: Option<Effect>,
    last_process: Option<Instant>,
}

impl LineClearFlash {
    pub fn new(rows: Vec<usize>) -> Self {
        Self {
            rows,
            effect: None,
            last_process: None,
        }
    }

    pub fn done(&self) -> bool {
        self.effect.as_ref().is_some_and(|e| e.done())
    }
}

/// Draw the board, sidebar and the overlay for the current screen.
pub fn draw(
    frame: &mut Frame,
    session: &Session,
    theme: &Theme,
    flash: &mut Option<LineClearFlash>,
    now: Instant,
) {
    let area = frame.area();
    let board_rect = draw_game(frame, session, theme, area);

    if let Some(flash) = flash {
        apply_line_clear_effect(frame, theme, board_rect, flash, now);
    }

    match session.screen() {
        Screen::Playing => {}
        Screen::NotStarted => draw_message(
            frame,
            theme,
            area,
            " Blockfall ",
            vec![
                Line::from(""),
                Line::from(Span::styled("Press SPACE to start", theme.title)),
                Line::from(""),
                Line::from(Span::styled("←/→ move  ↑/↓ rotate", theme.main_fg)),
                Line::from(Span::styled("SPACE drop  P pause  Q quit", theme.main_fg)),
            ],
        ),
        Screen::Paused => draw_message(
            frame,
            theme,
            area,
            " Paused ",
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    " PAUSED ",
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                )),
                Line::from(""),
                Line::from(Span::styled("SPACE resume   Q quit", theme.main_fg)),
            ],
        ),
        Screen::GameOver => {
            let board = session.board();
            draw_message(
                frame,
                theme,
                area,
                " Game Over ",
                vec![
                    Line::from(""),
                    Line::from(Span::styled("GAME OVER", theme.title).bold()),
                    Line::from(vec![
                        Span::styled("Score: ", theme.title),
                        Span::styled(board.score().to_string(), theme.main_fg),
                    ]),
                    Line::from(vec![
                        Span::styled("Lines: ", theme.title),
                        Span::styled(board.lines_cleared().to_string(), theme.main_fg),
                    ]),
                    Line::from(""),
                    Line::from(Span::styled("SPACE play again   Q quit", theme.main_fg)),
                ],
            );
        }
    }
}

/// Playfield + sidebar centred in `area`. Returns the inner board rect.
fn draw_game(frame: &mut Frame, session: &Session, theme: &Theme, area: Rect) -> Rect {
    let board = session.board();
    let (pw, ph) = playfield_outer_size(board.grid());
    let total_w = pw + SIDEBAR_WIDTH;

    let horiz_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph),
            Constraint::Fill(1),
        ])
        .split(horiz_chunks[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert_chunks[1]);

    let board_rect = draw_playfield(frame, &board.render_grid(), theme, inner[0]);
    draw_sidebar(frame, session, theme, inner[1]);
    board_rect
}

fn draw_playfield(frame: &mut Frame, grid: &Grid, theme: &Theme, area: Rect) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Blockfall ", theme.title));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());
    draw_grid(frame.buffer_mut(), grid, theme, inner);
    inner
}

/// Paint every cell of `grid` into `area`, clipped to it.
fn draw_grid(buf: &mut Buffer, grid: &Grid, theme: &Theme, area: Rect) {
    for (y, row) in grid.rows().enumerate() {
        let ry = area.y + y as u16;
        if ry >= area.bottom() {
            break;
        }
        for (x, cell) in row.iter().enumerate() {
            let rx = area.x + x as u16 * CELL_WIDTH;
            if rx + CELL_WIDTH > area.right() {
                break;
            }
            draw_cell(buf, rx, ry, theme.cell_paint(*cell), theme);
        }
    }
}

fn draw_cell(buf: &mut Buffer, x: u16, y: u16, paint: Option<Paint>, theme: &Theme) {
    let (glyphs, style) = match paint {
        None => ([' ', ' '], Style::default().bg(theme.bg)),
        Some(Paint::Textured { glyphs, fg, bg }) => (glyphs, Style::default().fg(fg).bg(bg)),
        Some(paint @ Paint::Solid(c)) => (paint.glyphs(), Style::default().fg(c).bg(theme.bg)),
    };
    for (i, g) in glyphs.into_iter().enumerate() {
        buf[(x + i as u16, y)].set_char(g).set_style(style);
    }
}

fn draw_sidebar(frame: &mut Frame, session: &Session, theme: &Theme, area: Rect) {
    let board = session.board();
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Next (border + title + 4 rows)
            Constraint::Length(1),
            Constraint::Length(5), // Score, lines, pieces
        ])
        .split(area);

    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], frame.buffer_mut());
    let next_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(4)])
        .split(next_inner);
    Paragraph::new(Line::from(Span::styled("Next", title_style)))
        .render(next_layout[0], frame.buffer_mut());
    draw_grid(
        frame.buffer_mut(),
        &board.preview_grid(),
        theme,
        next_layout[1],
    );

    let stats_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let stats_inner = stats_block.inner(chunks[2]);
    stats_block.render(chunks[2], frame.buffer_mut());
    let stat = |label: &'static str, value: u32| {
        Line::from(vec![
            Span::styled(label, title_style),
            Span::styled(value.to_string(), fg_style),
        ])
    };
    Paragraph::new(vec![
        stat("Score: ", board.score()),
        stat("Lines: ", board.lines_cleared()),
        stat("Pieces: ", board.pieces_placed()),
    ])
    .render(stats_inner, frame.buffer_mut());
}

/// Centred popup with a border and centred lines.
fn draw_message(frame: &mut Frame, theme: &Theme, area: Rect, title: &str, lines: Vec<Line>) {
    let popup_w = 30u16;
    let popup_h = lines.len() as u16 + 3;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(title.to_string(), theme.title));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg))
        .block(block)
        .render(popup, frame.buffer_mut());
}

/// Buffer positions covered by the given grid rows.
fn row_buffer_positions(board_rect: Rect, rows: &[usize]) -> HashSet<(u16, u16)> {
    rows.iter()
        .map(|&y| board_rect.y + y as u16)
        .filter(|&by| by < board_rect.bottom())
        .flat_map(|by| (board_rect.x..board_rect.right()).map(move |bx| (bx, by)))
        .collect()
}

fn apply_line_clear_effect(
    frame: &mut Frame,
    theme: &Theme,
    board_rect: Rect,
    flash: &mut LineClearFlash,
    now: Instant,
) {
    let delta = flash
        .last_process
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    let tfx_delta = TfxDuration::from_millis(delta_ms);
    flash.last_process = Some(now);

    if flash.effect.is_none() {
        let clearing_set = row_buffer_positions(board_rect, &flash.rows);
        let filter = CellFilter::PositionFn(ref_count(move |pos: Position| {
            clearing_set.contains(&(pos.x, pos.y))
        }));
        let bg = theme.bg;
        let effect = fx::fade_to(bg, bg, (LINE_CLEAR_FADE_MS, Interpolation::Linear))
            .with_filter(filter)
            .with_area(board_rect);
        flash.effect = Some(effect);
    }

    if let Some(effect) = &mut flash.effect {
        frame.render_effect(effect, board_rect, tfx_delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::shapes::TetrominoKind;

    #[test]
    fn playfield_size_includes_border() {
        let g = Grid::new(10, 20).unwrap();
        assert_eq!(playfield_outer_size(&g), (22, 22));
    }

    #[test]
    fn row_positions_are_clipped_to_board() {
        let rect = Rect::new(5, 3, 4, 2);
        let set = row_buffer_positions(rect, &[1, 7]);
        assert_eq!(set.len(), 4);
        assert!(set.contains(&(5, 4)));
        assert!(set.contains(&(8, 4)));
    }

    #[test]
    fn grid_cells_are_two_columns_wide() {
        let mut theme = Theme::default();
        theme.textured = false;
        let mut g = Grid::new(2, 1).unwrap();
        g.set(1, 0, Cell::Settled(TetrominoKind::I));
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        draw_grid(&mut buf, &g, &theme, area);
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(2, 0)].symbol(), "█");
        assert_eq!(buf[(3, 0)].symbol(), "█");
        assert_eq!(buf[(2, 0)].fg, theme.piece_color(TetrominoKind::I));
    }
}
