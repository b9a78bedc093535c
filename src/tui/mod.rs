pub mod dialogs;
pub mod events;
pub mod theme;
pub mod ui;

use crate::app::{App, DialogMode};
use crate::error::Result;
use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

const FRAME_RATE: Duration = Duration::from_millis(250);

pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = events::EventHandler::new(FRAME_RATE);

    let result = run_app(&mut terminal, app, &event_handler);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &events::EventHandler,
) -> Result<()> {
    loop {
        app.update();
        terminal.draw(|f| ui::draw(f, app))?;

        match event_handler.next()? {
            events::AppEvent::Key(key) => {
                if app.dialog_mode != DialogMode::None {
                    if events::is_escape(&key) || events::is_enter(&key) {
                        app.close_dialog();
                    }
                    continue;
                }

                if events::should_quit(&key) {
                    app.quit();
                } else if events::should_pause(&key) {
                    app.toggle_pause();
                } else if events::should_refresh(&key) {
                    app.refresh_now();
                } else if events::should_show_help(&key) {
                    app.show_help_dialog();
                } else if events::should_show_details(&key) {
                    app.show_details_dialog();
                }
            }
            events::AppEvent::Tick
            | events::AppEvent::Resize(_, _)
            | events::AppEvent::Ignored => {}
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
