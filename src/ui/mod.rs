mod detail;
mod favorites;
mod help;
mod list;

use ratatui::Frame;

use crate::app::App;
use crate::router::Route;

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match app.route() {
        Route::Home
        | Route::Search { .. }
        | Route::Genre { .. }
        | Route::Tag { .. }
        | Route::Store { .. } => list::render(app, frame),
        Route::GameDetail { .. } => detail::render(app, frame),
        Route::Favorites => favorites::render(app, frame),
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}
