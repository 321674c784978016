pub mod assistant;
pub mod browse;
pub mod colors;
pub mod detail;
pub mod footer;
pub mod popups;
pub mod settings;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::{App, CurrentScreen};

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match app.current_screen {
        CurrentScreen::Browse => browse::render_browse(f, app, chunks[0]),
        CurrentScreen::Detail => detail::render_detail(f, app, chunks[0]),
        CurrentScreen::Assistant => assistant::render_assistant(f, app, chunks[0]),
        CurrentScreen::Settings => settings::render_settings(f, app, chunks[0]),
    }

    footer::render_footer(f, app, chunks[1]);

    // Overlays last, on top of whatever screen is active.
    if app.show_genre_picker {
        popups::render_genre_picker(f, app, area);
    }
    if app.show_help {
        popups::render_help(f, area);
    }
}
