mod api;
mod app;
mod config;
mod models;
mod router;
mod store;
#[cfg(test)]
mod testutil;
mod ui;

use std::fs::OpenOptions;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing_subscriber::{EnvFilter, prelude::*};

use crate::app::{App, ChipRow, DetailTab, InputMode};
use crate::config::AppConfig;
use crate::router::Route;
use crate::store::CatalogStore;

/// TUI explorer for the RAWG video game catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// RAWG API key (falls back to RAWG_API_KEY or the config file)
    #[arg(short, long)]
    key: Option<String>,

    /// Override the catalog API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Start on the search view with this query
    #[arg(short, long)]
    search: Option<String>,

    /// Start on the view addressed by this path (e.g. "/game/3498");
    /// unknown paths fall back to home
    #[arg(long, value_name = "PATH", conflicts_with = "search")]
    open: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = AppConfig::resolve(cli.key, cli.base_url)?;
    let client = api::Client::new(&config.api_key, &config.base_url);
    let store = CatalogStore::new(client);

    let initial = match (cli.search, cli.open) {
        (Some(query), _) if !query.trim().is_empty() => Route::Search {
            query: query.trim().to_string(),
        },
        (_, Some(path)) => Route::parse(&path),
        _ => Route::Home,
    };
    let mut app = App::new(store, initial);

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app).await;
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file under the cache directory; stdout belongs to the TUI.
fn init_logging() {
    let Some(dirs) = config::project_dirs() else {
        return;
    };
    let log_dir = dirs.cache_dir().to_path_buf();
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let log_path = log_dir.join("game-explorer.log");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Mounts scheduled by navigation run here, before the next draw.
        app.process_mount().await;

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }

    match app.route().clone() {
        Route::GameDetail { id } => handle_detail_key(app, id, key),
        Route::Favorites => handle_favorites_key(app, key),
        _ => handle_list_key(app, key),
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') if app.chips_available() => {
            app.start_search();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            if app.chip_focus.is_some() {
                app.chip_prev();
            } else {
                app.prev_page();
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.chip_focus.is_some() {
                app.chip_next();
            } else {
                app.next_page();
            }
        }
        KeyCode::Enter => {
            if app.chip_focus.is_some() {
                app.activate_chip();
            } else {
                app.open_selected();
            }
        }
        KeyCode::Char('1') if app.chips_available() => app.focus_chips(ChipRow::Genres),
        KeyCode::Char('2') if app.chips_available() => app.focus_chips(ChipRow::Tags),
        KeyCode::Char('3') if app.chips_available() => app.focus_chips(ChipRow::Stores),
        KeyCode::Char('f') => {
            let id = app.selected_game().map(|game| game.id);
            if let Some(id) = id {
                app.toggle_favorite(id);
            }
        }
        KeyCode::Char('v') => {
            app.navigate(Route::Favorites);
        }
        KeyCode::Esc => {
            if app.chip_focus.is_some() {
                app.unfocus_chips();
            } else {
                app.back();
            }
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, id: u64, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.back();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.detail_tab == DetailTab::Screenshots {
                app.screenshot_next();
            } else {
                app.scroll_down();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.detail_tab == DetailTab::Screenshots {
                app.screenshot_prev();
            } else {
                app.scroll_up();
            }
        }
        KeyCode::PageDown => {
            app.scroll_page_down();
        }
        KeyCode::PageUp => {
            app.scroll_page_up();
        }
        KeyCode::Tab => {
            app.detail_tab = app.detail_tab.next();
            app.detail_scroll = 0;
            app.screenshot_selected = 0;
        }
        KeyCode::BackTab => {
            app.detail_tab = app.detail_tab.prev();
            app.detail_scroll = 0;
            app.screenshot_selected = 0;
        }
        KeyCode::Char('1') => {
            app.detail_tab = DetailTab::About;
            app.detail_scroll = 0;
        }
        KeyCode::Char('2') => {
            app.detail_tab = DetailTab::Platforms;
            app.detail_scroll = 0;
        }
        KeyCode::Char('3') => {
            app.detail_tab = DetailTab::Screenshots;
            app.detail_scroll = 0;
        }
        KeyCode::Char('f') => {
            app.toggle_favorite(id);
        }
        KeyCode::Char('o') => {
            if app.detail_tab == DetailTab::Screenshots {
                if let Some(shot) = app.selected_screenshot() {
                    let _ = std::process::Command::new("xdg-open")
                        .arg(&shot.image)
                        .spawn();
                }
            }
        }
        KeyCode::Char('v') => {
            app.navigate(Route::Favorites);
        }
        _ => {}
    }
}

fn handle_favorites_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.back();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.favorites_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.favorites_prev();
        }
        KeyCode::Enter => {
            app.open_selected_favorite();
        }
        KeyCode::Char('f') => {
            let id = app.favorites.get_index(app.favorites_selected).copied();
            if let Some(id) = id {
                app.toggle_favorite(id);
                if app.favorites_selected >= app.favorites.len() && app.favorites_selected > 0 {
                    app.favorites_selected -= 1;
                }
            }
        }
        _ => {}
    }
}
