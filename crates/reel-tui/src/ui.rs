use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use reel_core::{movie_year, NoticeKind};
use reel_search::SearchPhase;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Results + schedule
            Constraint::Length(3), // Footer / toast
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_search_input(f, app, chunks[1]);
    draw_body(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let user = app.session.current_user_label();
    let title = if user.is_empty() {
        "Movie Club Schedule".to_string()
    } else {
        format!("Movie Club Schedule - {}", user)
    };
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_search_input(f: &mut Frame, app: &App, area: Rect) {
    let title = match (app.focus, app.search.is_searching()) {
        (Focus::Search, true) => " Search [FOCUSED] | searching... ",
        (Focus::Search, false) => " Search [FOCUSED] ",
        (_, true) => " Search | searching... ",
        (_, false) => " Search ",
    };

    let text = if app.query.is_empty() {
        Line::from(Span::styled(
            "What are we watching next week?",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.query.as_str())
    };

    let input = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);
}

fn draw_body(f: &mut Frame, app: &mut App, area: Rect) {
    if app.query.is_empty() {
        app.results_area = None;
        draw_schedule(f, app, area);
        return;
    }

    // Results panel sized to its content, schedule below
    let result_lines = app.search.results().len().max(1) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length((result_lines + 2).min(12)), Constraint::Min(0)])
        .split(area);

    draw_results(f, app, chunks[0]);
    draw_schedule(f, app, chunks[1]);
}

fn draw_results(f: &mut Frame, app: &mut App, area: Rect) {
    app.results_area = Some(area);

    if app.search.results().is_empty() {
        let message = if let Some(error) = app.search.error() {
            Span::styled(error.to_string(), Style::default().fg(Color::Red))
        } else if app.search.show_empty_notice() {
            Span::styled(
                "No movies found. Try a different search.",
                Style::default().fg(Color::DarkGray),
            )
        } else if app.search.phase() == SearchPhase::Searching {
            Span::styled("Searching...", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw("")
        };
        let placeholder =
            Paragraph::new(Line::from(message)).block(Block::default().borders(Borders::ALL).title(" Results "));
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .search
        .results()
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let year = movie_year(&movie.release_date).unwrap_or("n/a");
            let line = format!("{}  ({})", movie.title, year);
            let style = if i == app.result_index {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Results ({}) ", app.search.results().len())),
    );
    f.render_widget(list, area);
}

fn draw_schedule(f: &mut Frame, app: &mut App, area: Rect) {
    app.schedule_area = Some(area);

    let title = match app.focus {
        Focus::Schedule => format!(" Upcoming Schedule ({}) [FOCUSED] ", app.schedule.len()),
        _ => format!(" Upcoming Schedule ({}) ", app.schedule.len()),
    };

    if app.schedule.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("No movies scheduled"),
            Line::from(Span::styled(
                "Search and add movies to your schedule",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .schedule
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let year = movie_year(&entry.release_date).unwrap_or("n/a");
            let line = format!("#{:<3} {}  ({})", entry.order, entry.title, year);

            let is_dragged = app.drag.dragged_id() == Some(entry.catalog_id);
            let is_hover = app.drag.hover_index() == Some(i);
            let is_selected = app.focus == Focus::Schedule && i == app.schedule_index;

            let mut style = Style::default();
            if is_selected {
                style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            if is_dragged {
                style = style.add_modifier(Modifier::DIM);
            }
            if is_hover {
                style = style.bg(Color::DarkGray);
            }
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some((notice, _)) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Warning => Color::Yellow,
            NoticeKind::Error => Color::Red,
        };
        Line::from(Span::styled(
            notice.message.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else {
        let hints = match app.focus {
            Focus::Search => "type to search | Up/Down select | Enter add | Tab schedule | Ctrl+C quit",
            Focus::Schedule => {
                "j/k move | Space grab/drop | r remove | Tab search | L logout | q quit"
            }
        };
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
