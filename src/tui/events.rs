use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

pub enum AppEvent {
    Tick,
    Key(KeyEvent),
    Resize(u16, u16),
    Ignored,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> crate::error::Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => Ok(AppEvent::Key(key)),
                Event::Resize(w, h) => Ok(AppEvent::Resize(w, h)),
                _ => Ok(AppEvent::Ignored),
            }
        } else {
            Ok(AppEvent::Tick)
        }
    }
}

pub fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

pub fn should_pause(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' '))
}

pub fn should_refresh(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

pub fn should_show_help(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('?'))
}

pub fn should_show_details(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('i') | KeyCode::Char('I'))
}

pub fn is_escape(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
}

pub fn is_enter(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter)
}
