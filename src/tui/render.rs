use std::borrow::Cow;

use super::state::AppState;
use crate::notify::Severity;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn draw(f: &mut Frame, state: &AppState, spinner_frame: u8) {
    let banner_height = state.notifications.len().min(5) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_banners(f, state, chunks[0]);
    draw_header(f, state, chunks[1], spinner_frame);
    draw_menu(f, state, chunks[2]);
    draw_logs(f, state, chunks[3]);
    draw_footer(f, chunks[4]);
}

/// Banner stack at the top of the screen, newest first.
fn draw_banners(f: &mut Frame, state: &AppState, area: Rect) {
    if area.height == 0 {
        return;
    }
    let max_width = area.width.saturating_sub(4) as usize;

    let lines: Vec<Line> = state
        .notifications
        .iter()
        .take(area.height as usize)
        .map(|b| {
            let (mark, color) = match b.severity {
                Severity::Success => ('✔', Color::Green),
                Severity::Danger => ('✘', Color::Red),
            };
            let msg = truncate_with_ellipsis(&b.message, max_width);
            Line::from(vec![
                Span::styled(
                    format!(" {} ", mark),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(msg.into_owned(), Style::default().fg(color)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect, spinner_frame: u8) {
    let mut spans = vec![
        Span::styled(" Shopfront ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(state.shop_url.clone(), Style::default().fg(Color::DarkGray)),
    ];

    if let Some(badge) = state.badge {
        spans.push(Span::raw("  |  Cart: "));
        spans.push(Span::styled(
            badge.count.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    if state.in_flight > 0 {
        let ch = SPINNER_FRAMES[(spinner_frame as usize) % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("  {} {} posting", ch, state.in_flight),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        format!("  |  sent {}  up {}", state.submitted_total, state.uptime()),
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_menu(f: &mut Frame, state: &AppState, area: Rect) {
    let header = Row::new(vec!["Item", "Price", "Qty"]).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .menu
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == state.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(format!("${:.2}", row.price_cents as f64 / 100.0)),
                Cell::from(row.quantity.to_string()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(Block::default().title(" Menu ").borders(Borders::ALL));

    f.render_widget(table, area);
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let max_width = area.width.saturating_sub(2) as usize; // borders
    let visible_lines = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible_lines)
        .map(|l| {
            let color = match l.level.as_str() {
                "ERROR" => Color::Red,
                "WARN" => Color::Yellow,
                _ => Color::DarkGray,
            };
            let prefix = format!(" {} [{}] ", l.time, l.level);
            let prefix_len = prefix.len();
            let msg_max = max_width.saturating_sub(prefix_len);
            let msg = truncate_with_ellipsis(&l.message, msg_max);
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(msg.into_owned()),
            ])
        })
        .collect();

    let block = Block::default().title(" Activity ").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("  [q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit  "),
        Span::styled("[j/k]", Style::default().fg(Color::Yellow)),
        Span::raw(" select  "),
        Span::styled("[+/-]", Style::default().fg(Color::Yellow)),
        Span::raw(" quantity  "),
        Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
        Span::raw(" add to cart  "),
        Span::styled("[d]", Style::default().fg(Color::Yellow)),
        Span::raw("ismiss banner  "),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn truncate_with_ellipsis(s: &str, max: usize) -> Cow<'_, str> {
    if s.chars().count() <= max {
        return Cow::Borrowed(s);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    Cow::Owned(format!("{}…", truncated))
}
