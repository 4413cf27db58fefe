use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use crate::app::{App, DetailTab};
use crate::models::Game;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(5) + tabs(3) + content(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let game = app.detail_game();

    // ── Metadata header ──
    let meta_lines = match game {
        Some(game) => {
            let fav = if app.is_favorite(game.id) { "★ " } else { "" };
            vec![
                Line::from(vec![
                    Span::styled(
                        format!(" {fav}{}", game.name),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("   #{}", game.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(" Metacritic: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(game.score_label(), Style::default().fg(Color::Green)),
                    Span::raw("   "),
                    Span::styled("Rating: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        game.rating
                            .map(|r| format!("{r:.2}"))
                            .unwrap_or_else(|| "--".to_string()),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw("   "),
                    Span::styled("Released: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        game.released
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "unknown".to_string()),
                        Style::default().fg(Color::White),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(" Cover: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        game.background_image.clone().unwrap_or_default(),
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            " No data loaded for this game.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let meta_block = Paragraph::new(meta_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Game Detail "),
    );
    frame.render_widget(meta_block, chunks[0]);

    // ── Tab strip ──
    let tab_titles: Vec<Line> = DetailTab::ALL
        .iter()
        .map(|t| {
            let style = if *t == app.detail_tab {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(t.label(), style))
        })
        .collect();

    let tab_index = DetailTab::ALL
        .iter()
        .position(|t| *t == app.detail_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(tab_titles)
        .select(tab_index)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" [Tab/1-3] "),
        )
        .highlight_style(Style::default().fg(Color::Cyan));
    frame.render_widget(tabs, chunks[1]);

    // ── Content area ──
    let content_lines = match (game, app.detail_tab) {
        (Some(game), DetailTab::About) => about_lines(game),
        (Some(game), DetailTab::Platforms) => platform_lines(game),
        (_, DetailTab::Screenshots) => screenshot_lines(app),
        (None, _) => vec![Line::from("")],
    };

    let content = Paragraph::new(content_lines)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", app.detail_tab.label()))
                .title_bottom(
                    Line::from(format!(" scroll: {} ", app.detail_scroll))
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(content, chunks[2]);

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ↑↓/PgUp/PgDn",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Scroll  "),
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Switch  "),
        Span::styled(
            "f",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Favorite  "),
        Span::styled(
            "o",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Open Screenshot  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Back"),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

fn about_lines(game: &Game) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let genres: Vec<&str> = game.genres.iter().map(|g| g.name.as_str()).collect();
    lines.push(labeled_list("Genres", &genres));
    lines.push(Line::from(""));

    let tags: Vec<&str> = game.tags.iter().map(|t| t.name.as_str()).collect();
    lines.push(labeled_list("Tags", &tags));
    lines.push(Line::from(""));

    let stores: Vec<String> = game
        .stores
        .iter()
        .map(|link| match link.store.domain.as_deref() {
            Some(domain) => format!("{} ({domain})", link.store.name),
            None => link.store.name.clone(),
        })
        .collect();
    let store_refs: Vec<&str> = stores.iter().map(String::as_str).collect();
    lines.push(labeled_list("Stores", &store_refs));

    lines
}

fn labeled_list(label: &str, names: &[&str]) -> Line<'static> {
    let value = if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    };
    Line::from(vec![
        Span::styled(
            format!(" {label}: "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn platform_lines(game: &Game) -> Vec<Line<'static>> {
    if game.platforms.is_empty() {
        return vec![Line::from(Span::styled(
            " No platform information.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    for assoc in &game.platforms {
        let released = assoc
            .released_at
            .as_deref()
            .map(|d| format!("  released {d}"))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(
                format!(" • {}", assoc.platform.name),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(released, Style::default().fg(Color::DarkGray)),
        ]));
        if let Some(req) = &assoc.requirements {
            if let Some(minimum) = &req.minimum {
                lines.push(Line::from(vec![
                    Span::styled("     min: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(minimum.clone()),
                ]));
            }
            if let Some(recommended) = &req.recommended {
                lines.push(Line::from(vec![
                    Span::styled("     rec: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(recommended.clone()),
                ]));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

fn screenshot_lines(app: &App) -> Vec<Line<'static>> {
    let shots = app.store.screenshots();
    if shots.is_empty() {
        return vec![Line::from(Span::styled(
            " No screenshots.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    shots
        .iter()
        .enumerate()
        .map(|(index, shot)| {
            let selected = index == app.screenshot_selected;
            let marker = if selected { "▸" } else { " " };
            let url_style = if selected {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED)
            };
            Line::from(vec![
                Span::styled(
                    format!(" {marker}{:>3}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(shot.image.clone(), url_style),
            ])
        })
        .collect()
}
