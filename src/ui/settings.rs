use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::snapshot::EXPORT_FILE_NAME;
use crate::ui::colors::{ACCENT, BORDER, PROGRESS, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};

pub fn render_settings(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // export
            Constraint::Length(5), // import path
            Constraint::Min(2),    // status
        ])
        .split(area);

    let export_lines = vec![
        Line::from(Span::styled(
            "Export Data",
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "e: write the content library, watchlist, ratings and progress to ./{}",
                EXPORT_FILE_NAME
            ),
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(Span::styled(
            "Use it as a backup, or edit the content externally and import it back.",
            Style::default().fg(TEXT_DIM),
        )),
    ];
    f.render_widget(
        Paragraph::new(export_lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER))
                .title(Span::styled(" Settings ", Style::default().fg(ACCENT))),
        ),
        chunks[0],
    );

    let editing = app.input_mode == InputMode::Editing;
    let border = if editing { ACCENT } else { BORDER };
    let import = Paragraph::new(app.import_input.value())
        .style(Style::default().fg(TEXT_PRIMARY))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(Span::styled(
                    " i: import a snapshot (path, Enter to load) — overwrites ALL current data ",
                    Style::default().fg(TEXT_SECONDARY),
                )),
        );
    f.render_widget(import, chunks[1]);
    if editing {
        let cursor = app.import_input.visual_cursor() as u16;
        f.set_cursor_position((chunks[1].x + cursor + 1, chunks[1].y + 1));
    }

    let status_line = if let Some(err) = &app.settings_error {
        Line::from(Span::styled(err.clone(), Style::default().fg(ACCENT)))
    } else if let Some(status) = &app.settings_status {
        Line::from(Span::styled(status.clone(), Style::default().fg(PROGRESS)))
    } else {
        Line::from(Span::raw(""))
    };
    f.render_widget(Paragraph::new(status_line).wrap(Wrap { trim: true }), chunks[2]);
}
