use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, CategoryFilter, InputMode};
use crate::pagination::PAGE_SIZE;
use crate::ui::colors::{
    ACCENT, BORDER, GOLD, HIGHLIGHT_BG, PROGRESS, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY,
};

pub fn render_browse(f: &mut Frame, app: &mut App, area: Rect) {
    let has_rail = !app.continue_watching.is_empty();
    let rail_height = if has_rail { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),           // hero
            Constraint::Length(3),           // tabs + search
            Constraint::Length(rail_height), // continue watching
            Constraint::Min(3),              // grid
            Constraint::Length(1),           // pagination
        ])
        .split(area);

    render_hero(f, app, chunks[0]);
    render_filter_bar(f, app, chunks[1]);
    if has_rail {
        render_continue_watching(f, app, chunks[2]);
    }
    render_grid(f, app, chunks[3]);
    render_pagination(f, app, chunks[4]);
}

fn render_hero(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            " AFLAMBOX ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));

    let Some(hero) = app.featured() else {
        f.render_widget(
            Paragraph::new("The catalog is empty. Import a snapshot from Settings (s).")
                .style(Style::default().fg(TEXT_SECONDARY))
                .block(block),
            area,
        );
        return;
    };

    let in_watchlist = app.prefs.is_in_watchlist(hero.id);
    let lines = vec![
        Line::from(vec![
            Span::styled(
                hero.title.clone(),
                Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} · {} · {}", hero.kind.display_name(), hero.year, hero.quality),
                Style::default().fg(TEXT_SECONDARY),
            ),
            Span::styled(format!("  ★ {:.1}", hero.rating), Style::default().fg(GOLD)),
            if in_watchlist {
                Span::styled("  [in watchlist]", Style::default().fg(PROGRESS))
            } else {
                Span::raw("")
            },
        ]),
        Line::from(Span::styled(
            hero.description.clone(),
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(Span::styled(
            hero.genre.clone(),
            Style::default().fg(TEXT_DIM),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(area);

    let mut spans: Vec<Span> = Vec::new();
    for (i, filter) in CategoryFilter::all().iter().enumerate() {
        let active = app.view.filter == *filter;
        let style = if active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_SECONDARY)
        };
        spans.push(Span::styled(format!(" {} ", i + 1), Style::default().fg(TEXT_DIM)));
        spans.push(Span::styled(filter.display_name(), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(" g ", Style::default().fg(TEXT_DIM)));
    spans.push(Span::styled(
        format!("Genre: {}", app.view.genre),
        Style::default().fg(TEXT_PRIMARY),
    ));

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER)),
    );
    f.render_widget(tabs, chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let search_style = if editing {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(BORDER)
    };
    let search = Paragraph::new(app.search_input.value())
        .style(Style::default().fg(TEXT_PRIMARY))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(Span::styled(" search (f) ", Style::default().fg(TEXT_SECONDARY))),
        );
    f.render_widget(search, chunks[1]);
    if editing {
        let cursor = app.search_input.visual_cursor() as u16;
        f.set_cursor_position((chunks[1].x + cursor + 1, chunks[1].y + 1));
    }
}

fn render_continue_watching(f: &mut Frame, app: &App, area: Rect) {
    let entries: Vec<Span> = app
        .continue_watching
        .iter()
        .take(6)
        .flat_map(|item| {
            vec![
                Span::styled(item.title.clone(), Style::default().fg(TEXT_PRIMARY)),
                Span::styled(
                    format!(" {:.0}%", app.prefs.progress(item.id)),
                    Style::default().fg(PROGRESS),
                ),
                Span::styled("  ·  ", Style::default().fg(TEXT_DIM)),
            ]
        })
        .collect();

    let rail = Paragraph::new(Line::from(entries)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title(Span::styled(
                " Continue Watching ",
                Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(rail, area);
}

fn render_grid(f: &mut Frame, app: &mut App, area: Rect) {
    let page = app.visible_page().to_vec();
    let items: Vec<ListItem> = page
        .iter()
        .map(|item| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<30}", truncate(&item.title, 30)),
                    Style::default().fg(TEXT_PRIMARY),
                ),
                Span::styled(
                    format!(" {:<10}", item.kind.display_name()),
                    Style::default().fg(TEXT_SECONDARY),
                ),
                Span::styled(format!(" {}", item.year), Style::default().fg(TEXT_DIM)),
                Span::styled(format!("  ★ {:.1}", item.rating), Style::default().fg(GOLD)),
            ];
            if let Some(stars) = app.prefs.rating(item.id) {
                spans.push(Span::styled(
                    format!("  you: {}", "★".repeat(stars as usize)),
                    Style::default().fg(ACCENT),
                ));
            }
            if app.prefs.is_in_watchlist(item.id) {
                spans.push(Span::styled("  ♥", Style::default().fg(ACCENT)));
            }
            let pct = app.prefs.progress(item.id);
            if pct > 0.0 && pct < 100.0 {
                spans.push(Span::styled(
                    format!("  {:.0}%", pct),
                    Style::default().fg(PROGRESS),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(" Trending ({} results) ", app.filtered.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER))
                .title(Span::styled(
                    title,
                    Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
                )),
        )
        .highlight_style(
            Style::default()
                .bg(HIGHLIGHT_BG)
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(" ▎");

    f.render_stateful_widget(list, area, &mut app.grid_list_state);
}

fn render_pagination(f: &mut Frame, app: &App, area: Rect) {
    let pages = app.total_pages();
    let line = if pages <= 1 {
        Line::from(Span::raw(""))
    } else {
        Line::from(vec![
            Span::styled(" ← p ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                format!("Page {} of {}", app.view.page, pages),
                Style::default().fg(TEXT_SECONDARY),
            ),
            Span::styled(" n → ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                format!("({} per page)", PAGE_SIZE),
                Style::default().fg(TEXT_DIM),
            ),
        ])
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
