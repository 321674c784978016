use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, ChatRole};
use crate::ui::colors::{ACCENT, BORDER, GOLD, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};

pub fn render_assistant(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    if !app.assistant_available {
        lines.push(Line::from(Span::styled(
            "The assistant is disabled. Set GEMINI_API_KEY and restart to enable it.",
            Style::default().fg(TEXT_DIM),
        )));
    } else if app.chat_messages.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask for a recommendation, e.g. \"something tense set at sea\".",
            Style::default().fg(TEXT_DIM),
        )));
    }
    for msg in &app.chat_messages {
        let (who, style) = match msg.role {
            ChatRole::User => ("you", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            ChatRole::Model => ("aflambox", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", who), style),
            Span::styled(msg.text.clone(), Style::default().fg(TEXT_PRIMARY)),
        ]));
        if let Some(id) = msg.recommended {
            if let Some(item) = app.catalog.iter().find(|i| i.id == id) {
                lines.push(Line::from(Span::styled(
                    format!("  → {} ({}) — press Tab to open", item.title, item.year),
                    Style::default().fg(TEXT_SECONDARY),
                )));
            }
        }
        lines.push(Line::from(Span::raw("")));
    }
    if app.chat_busy {
        lines.push(Line::from(Span::styled(
            "thinking...",
            Style::default().fg(TEXT_DIM),
        )));
    }

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER))
                .title(Span::styled(
                    " AI Assistant ",
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(transcript, chunks[0]);

    let input = Paragraph::new(app.chat_input.value())
        .style(Style::default().fg(TEXT_PRIMARY))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(Span::styled(
                    " your request (Enter to send, Esc to close) ",
                    Style::default().fg(TEXT_SECONDARY),
                )),
        );
    f.render_widget(input, chunks[1]);
    let cursor = app.chat_input.visual_cursor() as u16;
    f.set_cursor_position((chunks[1].x + cursor + 1, chunks[1].y + 1));
}
