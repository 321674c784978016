use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, CurrentScreen, InputMode};

pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::White);

    let mut spans = vec![
        Span::styled(" q ", key_style),
        Span::styled("Quit  ", label_style),
    ];

    if app.input_mode == InputMode::Editing {
        spans.push(Span::styled(" Esc ", key_style));
        spans.push(Span::styled("Stop Editing", label_style));
    } else {
        match app.current_screen {
            CurrentScreen::Browse => {
                spans.push(Span::styled(" f ", key_style));
                spans.push(Span::styled("Search  ", label_style));
                spans.push(Span::styled(" g ", key_style));
                spans.push(Span::styled("Genre  ", label_style));
                spans.push(Span::styled(" n/p ", key_style));
                spans.push(Span::styled("Page  ", label_style));
                spans.push(Span::styled(" Enter ", key_style));
                spans.push(Span::styled("Details  ", label_style));
                spans.push(Span::styled(" h ", key_style));
                spans.push(Span::styled("Help", label_style));
            }
            CurrentScreen::Detail => {
                spans.push(Span::styled(" 1-5 ", key_style));
                spans.push(Span::styled("Rate  ", label_style));
                spans.push(Span::styled(" w ", key_style));
                spans.push(Span::styled("Watchlist  ", label_style));
                spans.push(Span::styled(" ←/→ ", key_style));
                spans.push(Span::styled("Seek  ", label_style));
                spans.push(Span::styled(" Esc ", key_style));
                spans.push(Span::styled("Back", label_style));
            }
            CurrentScreen::Assistant => {
                spans.push(Span::styled(" Enter ", key_style));
                spans.push(Span::styled("Send  ", label_style));
                spans.push(Span::styled(" Tab ", key_style));
                spans.push(Span::styled("Open Pick  ", label_style));
                spans.push(Span::styled(" Esc ", key_style));
                spans.push(Span::styled("Back", label_style));
            }
            CurrentScreen::Settings => {
                spans.push(Span::styled(" e ", key_style));
                spans.push(Span::styled("Export  ", label_style));
                spans.push(Span::styled(" i ", key_style));
                spans.push(Span::styled("Import  ", label_style));
                spans.push(Span::styled(" Esc ", key_style));
                spans.push(Span::styled("Back", label_style));
            }
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
