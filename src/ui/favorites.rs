use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

use super::list::truncate_str;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + list(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header = Paragraph::new(format!(" Favorites   [{} games]", app.favorites.len()))
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
    frame.render_widget(header, chunks[0]);

    // ── Favorites list ──
    let items: Vec<ListItem> = app
        .favorites
        .iter()
        .map(|id| match app.store.game_by_id(*id) {
            Some(game) => {
                let name_width = (area.width as usize).saturating_sub(20);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>7} ", game.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled("★ ", Style::default().fg(Color::Yellow)),
                    Span::raw(truncate_str(&game.name, name_width)),
                    Span::styled(
                        format!("  {:>3}", game.score_label()),
                        Style::default().fg(Color::Green),
                    ),
                ]))
            }
            None => ListItem::new(Line::from(vec![
                Span::styled(format!("{id:>7} "), Style::default().fg(Color::DarkGray)),
                Span::styled("★ ", Style::default().fg(Color::Yellow)),
                Span::styled("(not loaded)", Style::default().fg(Color::DarkGray)),
            ])),
        })
        .collect();

    let empty = items.is_empty();
    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Favorites "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    if empty {
        let placeholder = Paragraph::new(" Nothing here yet. Press f on a game to favorite it.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Favorites "),
            );
        frame.render_widget(placeholder, chunks[1]);
    } else {
        let mut list_state = ListState::default();
        list_state.select(Some(app.favorites_selected));
        frame.render_stateful_widget(list_widget, chunks[1], &mut list_state);
    }

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ↑↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Select  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Detail  "),
        Span::styled(
            "f",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Unfavorite  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Back"),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[2]);
}
