use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::state::MAX_STARS;
use crate::ui::colors::{ACCENT, BORDER, GOLD, PROGRESS, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};

pub fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.detail_item() else {
        f.render_widget(
            Paragraph::new("Nothing selected.").style(Style::default().fg(TEXT_SECONDARY)),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title line
            Constraint::Min(4),    // description + summary
            Constraint::Length(3), // your rating
            Constraint::Length(3), // progress gauge
        ])
        .split(area);

    let in_watchlist = app.prefs.is_in_watchlist(item.id);
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            item.title.clone(),
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} · {} · {} · {}",
                item.kind.display_name(),
                item.year,
                item.quality,
                item.genre
            ),
            Style::default().fg(TEXT_SECONDARY),
        ),
        Span::styled(format!("  ★ {:.1}", item.rating), Style::default().fg(GOLD)),
        if in_watchlist {
            Span::styled("  ♥ watchlist", Style::default().fg(ACCENT))
        } else {
            Span::styled("  w: add to watchlist", Style::default().fg(TEXT_DIM))
        },
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(header, chunks[0]);

    let mut body: Vec<Line> = vec![
        Line::from(Span::styled(
            item.description.clone(),
            Style::default().fg(TEXT_PRIMARY),
        )),
        Line::from(Span::raw("")),
    ];
    if app.summary_loading {
        body.push(Line::from(Span::styled(
            "Generating summary...",
            Style::default().fg(TEXT_DIM),
        )));
    } else if let Some(summary) = &app.summary {
        body.push(Line::from(Span::styled(
            "AI summary",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )));
        body.push(Line::from(Span::styled(
            summary.clone(),
            Style::default().fg(TEXT_SECONDARY),
        )));
    } else if app.assistant_available {
        body.push(Line::from(Span::styled(
            "s: generate a cinematic summary",
            Style::default().fg(TEXT_DIM),
        )));
    }
    f.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(BORDER)),
            ),
        chunks[1],
    );

    let stars = app.prefs.rating(item.id).unwrap_or(0);
    let star_line: Vec<Span> = (1..=MAX_STARS)
        .map(|i| {
            if i <= stars {
                Span::styled("★ ", Style::default().fg(GOLD))
            } else {
                Span::styled("☆ ", Style::default().fg(TEXT_DIM))
            }
        })
        .collect();
    let mut rating_spans = star_line;
    rating_spans.push(Span::styled(
        if stars == 0 {
            "  press 1-5 to rate".to_string()
        } else {
            format!("  press {} again to clear", stars)
        },
        Style::default().fg(TEXT_DIM),
    ));
    f.render_widget(
        Paragraph::new(Line::from(rating_spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER))
                .title(Span::styled(" your rating ", Style::default().fg(TEXT_SECONDARY))),
        ),
        chunks[2],
    );

    let pct = app.prefs.progress(item.id);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BORDER))
                .title(Span::styled(
                    " watched (←/→ to seek) ",
                    Style::default().fg(TEXT_SECONDARY),
                )),
        )
        .gauge_style(Style::default().fg(PROGRESS))
        .ratio(f64::from(pct) / 100.0)
        .label(format!("{:.0}%", pct));
    f.render_widget(gauge, chunks[3]);
}
