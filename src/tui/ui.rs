//! UI rendering using ratatui
//!
//! One screen: header with scores and clock, the board, the found-words
//! panel, and popups for the notice, pause and end of round.

use crate::app::{AppCoordinator, Phase, RoundView};
use crate::game::{Outcome, SIZE};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

/// Terminal columns per board cell
pub const CELL_WIDTH: u16 = 4;
/// Terminal rows per board cell
pub const CELL_HEIGHT: u16 = 2;

const BOARD_WIDTH: u16 = SIZE as u16 * CELL_WIDTH + 2;

/// Draw the whole screen. Returns the board's inner area for mouse hit-testing.
pub fn render(frame: &mut Frame, app: &AppCoordinator) -> Rect {
    let view = app.view();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board and side panel
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], &view);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_WIDTH), Constraint::Min(20)])
        .split(layout[1]);

    let board = render_board(frame, body[0], &view, app.cursor_index());
    render_side_panel(frame, body[1], &view);
    render_footer(frame, layout[2], &view);

    match view.phase {
        Phase::Idle => render_popup(
            frame,
            board,
            "Word Swap",
            vec![
                Line::from("Press s to start"),
                Line::from(format!("Session: {}", view.session_score)),
            ],
            Color::Cyan,
        ),
        Phase::Paused => render_popup(
            frame,
            board,
            "Paused",
            vec![Line::from("Press p to resume")],
            Color::Yellow,
        ),
        Phase::Ended(outcome) if !view.busy => render_end_of_round(frame, board, &view, outcome),
        _ => {}
    }

    if let Some(notice) = view.notice {
        render_popup(
            frame,
            board,
            "Notice",
            vec![
                Line::from(notice.to_string()),
                Line::from("Enter to continue").style(Style::default().fg(Color::DarkGray)),
            ],
            Color::Red,
        );
    }

    board
}

/// Board cell under a terminal position, if any.
pub fn cell_at(board: Rect, x: u16, y: u16) -> Option<usize> {
    if x < board.x || y < board.y {
        return None;
    }
    let col = usize::from((x - board.x) / CELL_WIDTH);
    let row = usize::from((y - board.y) / CELL_HEIGHT);
    (row < SIZE && col < SIZE).then_some(row * SIZE + col)
}

/// Render the header: title, scores, clock
fn render_header(frame: &mut Frame, area: Rect, view: &RoundView) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Title
            Constraint::Min(20),    // Scores
            Constraint::Length(8),  // Clock
        ])
        .split(inner);

    let title = Paragraph::new("WORDSWAP")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(title, header_layout[0]);

    let scores = Paragraph::new(format!(
        "Round {}   Session {}   Last +{}   Bag {}",
        view.round_score, view.session_score, view.last_batch, view.bag_remaining
    ))
    .style(Style::default().fg(Color::Magenta).bold())
    .alignment(Alignment::Center);
    frame.render_widget(scores, header_layout[1]);

    let clock_color = if view.seconds_left < 10 {
        Color::Red
    } else {
        Color::Green
    };
    let clock = Paragraph::new(view.time_left.as_str())
        .style(Style::default().fg(clock_color).bold())
        .alignment(Alignment::Right);
    frame.render_widget(clock, header_layout[2]);
}

fn render_board(frame: &mut Frame, area: Rect, view: &RoundView, cursor: usize) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Board");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for index in 0..SIZE * SIZE {
        let (row, col) = ((index / SIZE) as u16, (index % SIZE) as u16);
        let cell = Rect {
            x: inner.x + col * CELL_WIDTH,
            y: inner.y + row * CELL_HEIGHT,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        };
        if cell.right() > inner.right() || cell.bottom() > inner.bottom() {
            continue;
        }

        let letter = view.grid.get(index).map_or(String::from("·"), String::from);
        let mut style = cell_style(view, index);
        if index == cursor && !matches!(view.phase, Phase::Idle | Phase::Ended(_)) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        frame.render_widget(
            Paragraph::new(letter).style(style).alignment(Alignment::Center),
            cell,
        );
    }

    Rect {
        width: inner.width.min(SIZE as u16 * CELL_WIDTH),
        height: inner.height.min(SIZE as u16 * CELL_HEIGHT),
        ..inner
    }
}

/// Colour a cell by what is happening to it, most urgent first
fn cell_style(view: &RoundView, index: usize) -> Style {
    let base = Style::default().fg(Color::White).bold();
    if view.deleted.contains(&index) {
        base.fg(Color::Black).bg(Color::Red)
    } else if view.trail.last() == Some(&index) {
        base.fg(Color::Black).bg(Color::Yellow)
    } else if view.trail.contains(&index) {
        base.bg(Color::DarkGray)
    } else if view.spawned.contains(&index) {
        base.fg(Color::Green)
    } else if view.origin == Some(index) {
        base.fg(Color::Black).bg(Color::Cyan)
    } else if view.grid.get(index).is_none() {
        Style::default().fg(Color::DarkGray)
    } else {
        base
    }
}

/// Render the bag count and the list of found words (right panel)
fn render_side_panel(frame: &mut Frame, area: Rect, view: &RoundView) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let bag = Paragraph::new(format!("{} letters left", view.bag_remaining))
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("Bag"),
        );
    frame.render_widget(bag, layout[0]);

    let items: Vec<ListItem> = view
        .found_words
        .iter()
        .map(|found| {
            ListItem::new(format!("{:<9}+{}", found.word, found.points))
                .style(Style::default().fg(Color::Green))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Words"),
    );
    frame.render_widget(list, layout[1]);
}

fn render_footer(frame: &mut Frame, area: Rect, view: &RoundView) {
    let help = match view.phase {
        Phase::Idle => "s Start  q Quit",
        Phase::Ended(_) => "n New game  q Quit",
        _ => "←↑↓→ Move  Space Select  p Pause  q Quit",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Render the end-of-round summary over the board
fn render_end_of_round(frame: &mut Frame, area: Rect, view: &RoundView, outcome: Outcome) {
    let (title, headline, color) = match outcome {
        Outcome::Won => ("Bag empty", "YOU WIN!", Color::Green),
        Outcome::Lost => ("Board full", "GAME OVER", Color::Red),
    };
    render_popup(
        frame,
        area,
        title,
        vec![
            Line::from(headline).style(Style::default().fg(color).bold()),
            Line::from(format!("Round score: {}", view.round_score)),
            Line::from(format!("Session: {}", view.session_score)),
            Line::from(format!("Words: {}", view.found_words.len())),
            Line::from("n New game").style(Style::default().fg(Color::DarkGray)),
        ],
        color,
    );
}

fn render_popup(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, color: Color) {
    let height = lines.len() as u16 + 2;
    let popup = centered_rect(area, area.width.saturating_sub(4), height);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title.to_string()),
    );
    frame.render_widget(paragraph, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
