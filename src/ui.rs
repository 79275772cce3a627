//! Layout and drawing: title, tutorial, playfield, sidebar, pause, game over.

use crate::game::{
    Cell, FLOOR_ROW, GAME_OVER_COUNTDOWN, GRID_WIDTH, GameOverCause, GameState, INTERIOR_COLUMNS,
    PIECE_SIZE, Piece,
};
use crate::session::{Screen, Session};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Each grid cell is two terminal columns wide so the board looks square.
const CELL_WIDTH: u16 = 2;
/// Playfield in terminal cells, border included.
const BOARD_W: u16 = (GRID_WIDTH as u16 - 2) * CELL_WIDTH + 2;
const BOARD_H: u16 = FLOOR_ROW as u16 + 1 + 2;
const SIDEBAR_WIDTH: u16 = 24;

const CONTAINER: &str = "██";
const EMPTY: &str = " ·";

/// Fade-in when a screen appears.
const SCREEN_FADE_MS: u32 = 350;

/// Effect played over the whole frame when the screen changes.
pub fn screen_entrance_effect(theme: &Theme) -> Effect {
    fx::fade_from(theme.bg, theme.bg, (SCREEN_FADE_MS, Interpolation::QuadOut))
}

/// Draw the current screen, then advance the entrance effect if one is running.
pub fn draw(
    frame: &mut Frame,
    session: &Session,
    theme: &Theme,
    screen_effect: &mut Option<Effect>,
    effect_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let area = frame.area();
    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(area, frame.buffer_mut());

    match session.screen {
        Screen::TitleScreen => draw_title(frame, session.hiscore, theme, area),
        Screen::Tutorial => draw_tutorial(frame, theme, area),
        Screen::Playing => {
            draw_game(frame, &session.game, session.hiscore, theme, area);
            if session.game.paused {
                draw_pause_overlay(frame, theme, area);
            }
        }
        Screen::GameOver => {
            draw_game(frame, &session.game, session.hiscore, theme, area);
            draw_game_over(frame, session, theme, area);
        }
    }

    apply_screen_effect(frame, area, screen_effect, effect_process_time, now);
}

fn apply_screen_effect(
    frame: &mut Frame,
    area: Rect,
    screen_effect: &mut Option<Effect>,
    effect_process_time: &mut Option<Instant>,
    now: Instant,
) {
    let Some(effect) = screen_effect else {
        return;
    };
    let delta = effect_process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    *effect_process_time = Some(now);

    frame.render_effect(effect, area, TfxDuration::from_millis(delta_ms));
    if effect.done() {
        *screen_effect = None;
        *effect_process_time = None;
    }
}

/// `width` x `height` rect centred in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn framed(theme: &Theme, title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(title, theme.title))
}

fn draw_title(frame: &mut Frame, hiscore: i64, theme: &Theme, area: Rect) {
    let fg = Style::default().fg(theme.main_fg);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "W A S T E D U M P",
            Style::default().fg(theme.title).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled("Hazardous material handling", fg)),
        Line::from(Span::styled("one container at a time", fg)),
        Line::from(""),
        Line::from(vec![
            Span::styled("High Score  ", Style::default().fg(theme.title)),
            Span::styled(format!("{hiscore:05}"), fg),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Enter] to Start",
            Style::default().fg(theme.title).bold(),
        )),
        Line::from(Span::styled("Q  Quit", Style::default().fg(theme.inactive_fg))),
    ];
    let popup = centered(area, 40, lines.len() as u16 + 2);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(framed(theme, ""))
        .render(popup, frame.buffer_mut());
}

fn draw_tutorial(frame: &mut Frame, theme: &Theme, area: Rect) {
    let fg = Style::default().fg(theme.main_fg);
    let swatch = |color| Span::styled(CONTAINER, Style::default().fg(theme.waste_color(color)));
    let lines = vec![
        Line::from(Span::styled("Welcome to the dump.", Style::default().fg(theme.title).bold())),
        Line::from(""),
        Line::from(Span::styled(
            "Containers of waste drop into the pit one at a time. Steer them with Left/Right (h/l) and hold Down (j) to speed them up.",
            fg,
        )),
        Line::from(""),
        Line::from(vec![
            swatch(crate::game::WasteColor::Red),
            Span::raw(" "),
            swatch(crate::game::WasteColor::Blue),
            Span::raw(" "),
            swatch(crate::game::WasteColor::Yellow),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "A container landing on another slides down a free diagonal, trying left before right.",
            fg,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Never let two containers of one colour touch. The reaction costs 200 points and the dump goes up two seconds later.",
            Style::default().fg(theme.danger),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Fill a row from wall to wall and it is hauled away. Every row hauled makes deliveries faster.",
            fg,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Enter] to begin",
            Style::default().fg(theme.title).bold(),
        )),
    ];
    let popup = centered(area, 60, 22);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(framed(theme, " How to play "))
        .render(popup, frame.buffer_mut());
}

/// Draw game: playfield + sidebar, centred.
fn draw_game(frame: &mut Frame, game: &GameState, hiscore: i64, theme: &Theme, area: Rect) {
    let total_w = BOARD_W + SIDEBAR_WIDTH;

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
            Constraint::Length(BOARD_H),
            Constraint::Fill(1),
        ])
        .split(horiz_chunks[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_W), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert_chunks[1]);

    draw_playfield(frame, game, theme, inner[0]);
    draw_sidebar(frame, game, hiscore, theme, inner[1]);
}

fn draw_playfield(frame: &mut Frame, game: &GameState, theme: &Theme, area: Rect) {
    let block = framed(theme, " Wastedump ");
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    for y in 0..=FLOOR_ROW {
        for x in INTERIOR_COLUMNS {
            let rx = inner.x + (x as u16 - 1) * CELL_WIDTH;
            let ry = inner.y + y as u16;
            if rx + CELL_WIDTH > inner.x + inner.width || ry >= inner.y + inner.height {
                continue;
            }
            let (symbol, style) = cell_glyph(game, theme, x, y);
            buf.set_string(rx, ry, symbol, style);
        }
    }
}

fn cell_glyph(game: &GameState, theme: &Theme, x: usize, y: usize) -> (&'static str, Style) {
    let style = Style::default().bg(theme.bg);
    match game.playfield.get(x, y) {
        Some(Cell::Moving | Cell::Full) => {
            let color = game
                .cell_color(x, y)
                .map_or(theme.main_fg, |c| theme.waste_color(c));
            (CONTAINER, style.fg(color))
        }
        Some(Cell::Fading) => {
            let color = if game.phase.fade_lit() {
                theme.fade_lit
            } else {
                theme.fade_dim
            };
            (CONTAINER, style.fg(color))
        }
        _ => (EMPTY, style.fg(theme.inactive_fg)),
    }
}

fn draw_sidebar(frame: &mut Frame, game: &GameState, hiscore: i64, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PIECE_SIZE as u16 + 3), // Next (border + title + preview)
            Constraint::Length(1),
            Constraint::Length(6), // Stats
            Constraint::Length(1),
            Constraint::Length(4), // Status
        ])
        .split(area);

    // --- Next ---
    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], frame.buffer_mut());
    let next_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(PIECE_SIZE as u16)])
        .split(next_inner);
    Paragraph::new(Line::from(Span::styled("Next", title_style)))
        .render(next_layout[0], frame.buffer_mut());
    draw_next_preview(frame, &game.incoming, theme, next_layout[1]);

    // --- Stats ---
    let stats_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let stats_inner = stats_block.inner(chunks[2]);
    stats_block.render(chunks[2], frame.buffer_mut());
    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, title_style),
            Span::styled(value, fg_style),
        ])
    };
    let stats_lines = vec![
        stat("Score:      ", format!("{:05}", game.stats.score)),
        stat("High Score: ", format!("{hiscore:05}")),
        stat("Lines:      ", format!("{:04}", game.stats.lines)),
        stat("Level:      ", game.stats.level.to_string()),
    ];
    Paragraph::new(stats_lines).render(stats_inner, frame.buffer_mut());

    // --- Status: countdown once armed ---
    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let status_inner = status_block.inner(chunks[4]);
    status_block.render(chunks[4], frame.buffer_mut());
    let status_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(status_inner);
    match game.countdown() {
        Some(ticks_left) => {
            Paragraph::new(Line::from(Span::styled(
                "!! REACTION !!",
                Style::default().fg(theme.danger).bold(),
            )))
            .alignment(Alignment::Center)
            .render(status_layout[0], frame.buffer_mut());
            Gauge::default()
                .ratio(f64::from(ticks_left) / f64::from(GAME_OVER_COUNTDOWN))
                .label("")
                .gauge_style(Style::default().fg(theme.danger).bg(theme.bg))
                .render(status_layout[1], frame.buffer_mut());
        }
        None => {
            Paragraph::new(Line::from(Span::styled(
                "Stable",
                Style::default().fg(theme.inactive_fg),
            )))
            .alignment(Alignment::Center)
            .render(status_layout[0], frame.buffer_mut());
        }
    }
}

/// Next piece in its 4x4 scaffold, so the spawn column can be read off.
fn draw_next_preview(frame: &mut Frame, piece: &Piece, theme: &Theme, area: Rect) {
    let width = PIECE_SIZE as u16 * CELL_WIDTH;
    let off_x = area.width.saturating_sub(width) / 2;
    let buf = frame.buffer_mut();
    for py in 0..PIECE_SIZE {
        for px in 0..PIECE_SIZE {
            let rx = area.x + off_x + px as u16 * CELL_WIDTH;
            let ry = area.y + py as u16;
            if rx + CELL_WIDTH > area.x + area.width || ry >= area.y + area.height {
                continue;
            }
            let style = Style::default().bg(theme.bg);
            let (symbol, style) = match piece.get(px, py) {
                Cell::Moving => (CONTAINER, style.fg(theme.waste_color(piece.color))),
                _ => (EMPTY, style.fg(theme.inactive_fg)),
            };
            buf.set_string(rx, ry, symbol, style);
        }
    }
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup = centered(area, 28, 5);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(theme.title),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " P  Resume    Q  Quit ",
            Style::default().fg(theme.main_fg),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .style(Style::default().bg(theme.bg))
        .render(popup, frame.buffer_mut());
}

fn game_over_message(cause: Option<GameOverCause>) -> &'static str {
    match cause {
        Some(GameOverCause::AdjacentMatch) => "Two of a kind touched. Meltdown.",
        Some(GameOverCause::Overflow) => "The dump is full to the brim.",
        Some(GameOverCause::BlockedSpawn) => "No room for the next delivery.",
        None => "",
    }
}

fn draw_game_over(frame: &mut Frame, session: &Session, theme: &Theme, area: Rect) {
    let fg = Style::default().fg(theme.main_fg);
    let game = &session.game;
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Game Over ",
            Style::default().fg(Color::White).bg(theme.danger),
        )),
        Line::from(""),
        Line::from(Span::styled(game_over_message(game.game_over_cause()), fg)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Final Score  ", Style::default().fg(theme.title)),
            Span::styled(format!("{:05}", game.stats.score), fg),
        ]),
        Line::from(vec![
            Span::styled("Previous High Score  ", Style::default().fg(theme.title)),
            Span::styled(format!("{:05}", session.hiscore), fg),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press [Enter] to continue", fg)),
    ];
    let popup = centered(area, 40, lines.len() as u16 + 2);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(framed(theme, " Wastedump "))
        .style(Style::default().bg(theme.bg))
        .render(popup, frame.buffer_mut());
}
