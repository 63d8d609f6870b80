mod app;
mod ui;

pub use app::{App, Focus};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use reel_catalog::CatalogLookup;
use reel_config::SearchConfig;
use reel_core::Session;
use std::io;

pub async fn run(
    session: Session,
    lookup: Arc<dyn CatalogLookup>,
    config: &SearchConfig,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(session, lookup, config);

    // Run the app
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.pump();
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so pipeline events keep flowing between keystrokes
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.focus {
        Focus::Search => match key.code {
            KeyCode::Char(c) => app.input_char(c),
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Down => app.next_result(),
            KeyCode::Up => app.previous_result(),
            KeyCode::Enter => app.select_result(app.result_index),
            KeyCode::Esc => app.clear_query(),
            KeyCode::Tab => app.focus = Focus::Schedule,
            _ => {}
        },
        Focus::Schedule => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('L') => app.logout(),
            KeyCode::Char('j') | KeyCode::Down => {
                if app.drag.is_dragging() {
                    app.move_hover_down();
                } else {
                    app.next_schedule_entry();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if app.drag.is_dragging() {
                    app.move_hover_up();
                } else {
                    app.previous_schedule_entry();
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_grab(),
            KeyCode::Char('r') | KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
            KeyCode::Esc => {
                if app.drag.is_dragging() {
                    app.abandon_drag();
                } else {
                    app.focus = Focus::Search;
                }
            }
            KeyCode::Tab => app.focus = Focus::Search,
            _ => {}
        },
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = hit_row(app.schedule_area, mouse.column, mouse.row) {
                if index < app.schedule.len() {
                    app.focus = Focus::Schedule;
                    app.schedule_index = index;
                    let id = app.schedule.entries()[index].catalog_id;
                    app.drag.drag_start(id);
                }
            } else if let Some(index) = hit_row(app.results_area, mouse.column, mouse.row) {
                if index < app.search.results().len() {
                    app.select_result(index);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if !app.drag.is_dragging() {
                return;
            }
            match hit_row(app.schedule_area, mouse.column, mouse.row) {
                Some(index) if index < app.schedule.len() => app.drag.drag_over(index),
                _ => app.drag.drag_leave(),
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if !app.drag.is_dragging() {
                return;
            }
            match hit_row(app.schedule_area, mouse.column, mouse.row) {
                Some(index) if index < app.schedule.len() => {
                    if app.drag.drop_on(&mut app.schedule, index).is_some() {
                        app.schedule_index = index;
                    }
                }
                // Released outside the list: the gesture ends without a move
                _ => app.drag.reset(),
            }
        }
        _ => {}
    }
}

/// Map a terminal position to a 0-based row inside a bordered list area
fn hit_row(area: Option<Rect>, column: u16, row: u16) -> Option<usize> {
    let area = area?;
    let inside_x = column > area.x && column < area.x.saturating_add(area.width).saturating_sub(1);
    let inside_y = row > area.y && row < area.y.saturating_add(area.height).saturating_sub(1);
    if inside_x && inside_y {
        Some((row - area.y - 1) as usize)
    } else {
        None
    }
}
