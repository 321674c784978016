use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::colors::{ACCENT, BORDER, HIGHLIGHT_BG, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};

/// Centered popup rect, sized as a percentage of the parent.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn render_genre_picker(f: &mut Frame, app: &mut App, area: Rect) {
    let popup = centered_rect(30, 60, area);
    f.render_widget(Clear, popup);

    let items: Vec<ListItem> = app
        .genres
        .iter()
        .map(|genre| {
            let style = if *genre == app.view.genre {
                Style::default().fg(ACCENT)
            } else {
                Style::default().fg(TEXT_PRIMARY)
            };
            ListItem::new(Line::from(Span::styled(genre.clone(), style)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT))
                .title(Span::styled(
                    " genre ",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
        )
        .highlight_style(
            Style::default()
                .bg(HIGHLIGHT_BG)
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(" ▎");
    f.render_stateful_widget(list, popup, &mut app.genre_list_state);
}

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 70, area);
    f.render_widget(Clear, popup);

    let rows = [
        ("1-5", "Category tabs (Home / Movies / TV Series / TV Programs / Watchlist)"),
        ("f or /", "Search titles"),
        ("g", "Pick a genre"),
        ("j/k, ↑/↓", "Move selection"),
        ("n/p, →/←", "Next / previous page"),
        ("Enter", "Open item details"),
        ("w", "Toggle watchlist"),
        ("a", "AI assistant"),
        ("s", "Settings (import/export)"),
        ("q", "Quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", key), Style::default().fg(ACCENT)),
                Span::styled(*what, Style::default().fg(TEXT_SECONDARY)),
            ])
        })
        .chain(std::iter::once(Line::from(Span::styled(
            " any key to close ",
            Style::default().fg(TEXT_DIM),
        ))))
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .title(Span::styled(" keys ", Style::default().fg(TEXT_PRIMARY))),
    );
    f.render_widget(help, popup);
}
