use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, ChipRow, InputMode};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let with_chips = app.chips_available();

    // Layout: header(3) [+ search(3) + chips(5)] + list(min) + status(1)
    let constraints: Vec<Constraint> = if with_chips {
        vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(5),
            Constraint::Length(1),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let (header_area, list_area, status_area) = if with_chips {
        (chunks[0], chunks[3], chunks[4])
    } else {
        (chunks[0], chunks[1], chunks[2])
    };

    // ── Header ──
    let header_text = format!(
        " {}   [{} matches]",
        app.heading(),
        app.store.total_games()
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, header_area);

    if with_chips {
        render_search_bar(app, frame, chunks[1]);
        render_chips(app, frame, chunks[2]);
    }

    // ── Game list ──
    let items: Vec<ListItem> = app
        .store
        .games()
        .map(|game| {
            let fav = if app.is_favorite(game.id) { "★" } else { " " };
            let year = game
                .release_year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "----".to_string());
            let name_width = (area.width as usize).saturating_sub(24);
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>7} ", game.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{fav} "), Style::default().fg(Color::Yellow)),
                Span::raw(truncate_str(&game.name, name_width)),
                Span::styled(
                    format!("  {year}"),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {:>3}", game.score_label()),
                    Style::default().fg(score_color(game.metacritic)),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let page_line = Line::from(vec![
        Span::styled(
            " ‹ prev ",
            pager_style(app.has_prev_page()),
        ),
        Span::raw(format!("page {}/{}", app.page, app.page_count())),
        Span::styled(
            " next › ",
            pager_style(app.has_next_page()),
        ),
    ]);

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Games ")
                .title_bottom(page_line.alignment(Alignment::Right)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.list_selected));
    frame.render_stateful_widget(list_widget, list_area, &mut list_state);

    // ── Status bar ──
    let mut status_spans = vec![
        Span::styled(
            " ↑↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Select  "),
        Span::styled(
            "←→",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Page  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Detail  "),
    ];
    if with_chips {
        status_spans.push(Span::styled(
            "/",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        status_spans.push(Span::raw(" Search  "));
        status_spans.push(Span::styled(
            "1-3",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        status_spans.push(Span::raw(" Chips  "));
    }
    status_spans.extend([
        Span::styled(
            "f",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Favorite  "),
        Span::styled(
            "v",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Favorites  "),
        Span::styled(
            "?",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Help  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(Line::from(status_spans)), status_area);
}

fn render_search_bar(app: &App, frame: &mut Frame, area: Rect) {
    let style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let label = if app.input_mode == InputMode::Editing {
        " 🔍 Search (Enter to run, Esc to cancel): "
    } else {
        " 🔍 Search (/): "
    };
    let text = format!("{}{}", label, app.search_input);
    let bar = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(" Search "),
    );
    frame.render_widget(bar, area);

    if app.input_mode == InputMode::Editing {
        let cursor_x = area.x + label.width() as u16 + app.search_input.width() as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_chips(app: &App, frame: &mut Frame, area: Rect) {
    let rows = [ChipRow::Genres, ChipRow::Tags, ChipRow::Stores];
    let lines: Vec<Line> = rows
        .iter()
        .map(|row| chip_line(app, *row))
        .collect();

    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filters [1 Genres / 2 Tags / 3 Stores] "),
    );
    frame.render_widget(block, area);
}

fn chip_line(app: &App, row: ChipRow) -> Line<'static> {
    let focused = app.chip_focus == Some(row);
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::styled(format!("{:>7}: ", row.label()), label_style)];

    let names: Vec<String> = match row {
        ChipRow::Genres => app
            .store
            .genres()
            .iter()
            .map(|g| chip_label(&g.name, g.games_count))
            .collect(),
        ChipRow::Tags => app
            .store
            .tags()
            .iter()
            .map(|t| chip_label(&t.name, t.games_count))
            .collect(),
        ChipRow::Stores => app
            .store
            .stores()
            .iter()
            .map(|s| chip_label(&s.name, s.games_count))
            .collect(),
    };

    if names.is_empty() {
        spans.push(Span::styled(
            "(none loaded)",
            Style::default().fg(Color::DarkGray),
        ));
        return Line::from(spans);
    }

    // Keep the selected chip visible by windowing around it.
    let window = 8usize;
    let start = if focused {
        app.chip_selected.saturating_sub(window - 1)
    } else {
        0
    };
    if start > 0 {
        spans.push(Span::styled("… ", Style::default().fg(Color::DarkGray)));
    }
    for (offset, name) in names.iter().enumerate().skip(start).take(window) {
        let selected = focused && offset == app.chip_selected;
        let style = if selected {
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{name}]"), style));
        spans.push(Span::raw(" "));
    }
    if start + window < names.len() {
        spans.push(Span::styled("…", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

/// Chip label with a compact usage count, e.g. `Action (182k)`.
fn chip_label(name: &str, games_count: u64) -> String {
    if games_count >= 1000 {
        format!("{name} ({}k)", games_count / 1000)
    } else if games_count > 0 {
        format!("{name} ({games_count})")
    } else {
        name.to_string()
    }
}

fn pager_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn score_color(metacritic: Option<i32>) -> Color {
    match metacritic {
        Some(score) if score >= 75 => Color::Green,
        Some(score) if score >= 50 => Color::Yellow,
        Some(_) => Color::Red,
        None => Color::DarkGray,
    }
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        s.to_string()
    } else {
        let mut result = String::new();
        let mut used = 0;
        for c in s.chars() {
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w > max_width.saturating_sub(1) {
                break;
            }
            used += w;
            result.push(c);
        }
        result.push('…');
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Portal 2", 20), "Portal 2");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        let out = truncate_str("The Witcher 3: Wild Hunt", 10);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 10);
    }
}
