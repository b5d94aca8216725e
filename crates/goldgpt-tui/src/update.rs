//! UI reducer.
//!
//! Key handling and layout state live here; every session change is
//! delegated to [`goldgpt_core::session::update`].

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use goldgpt_core::session::{self, SessionEvent};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Focus, WELCOME_SUGGESTIONS};

/// Lines moved per PageUp/PageDown.
const PAGE_SCROLL: u16 = 10;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick { now } => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            app.now = now;
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(app, key)
        }
        UiEvent::Terminal(Event::Paste(text)) => {
            if app.focus == Focus::Input {
                app.input.insert_str(&text.replace(['\r', '\n'], " "));
            }
            vec![]
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::Session(event) => dispatch_session(app, event),
    }
}

/// Runs a session event through the session reducer and wraps its effects.
fn dispatch_session(app: &mut AppState, event: SessionEvent) -> Vec<UiEffect> {
    let before = app.session.messages.len();
    let effects = session::update(&mut app.session, event);

    if app.session.messages.len() != before {
        app.scroll = 0;
    }
    app.sidebar.clamp(app.session.history.len());

    effects.into_iter().map(UiEffect::from).collect()
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        KeyCode::Esc => return vec![UiEffect::Quit],
        KeyCode::Char('n') if ctrl => {
            app.focus = Focus::Input;
            return dispatch_session(app, SessionEvent::New);
        }
        KeyCode::Char('b') if ctrl => {
            app.sidebar.open = !app.sidebar.open;
            if !app.sidebar.open {
                app.focus = Focus::Input;
            }
            return vec![];
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Input if app.sidebar.open => Focus::Sidebar,
                _ => Focus::Input,
            };
            return vec![];
        }
        KeyCode::PageUp => {
            app.scroll = app.scroll.saturating_add(PAGE_SCROLL);
            return vec![];
        }
        KeyCode::PageDown => {
            app.scroll = app.scroll.saturating_sub(PAGE_SCROLL);
            return vec![];
        }
        _ => {}
    }

    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::Sidebar => handle_sidebar_key(app, key),
    }
}

fn handle_input_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![];
    }

    match key.code {
        KeyCode::Enter => {
            // Keep the draft while a send is in flight; the session would drop it.
            if app.session.is_loading() || app.input.text().trim().is_empty() {
                return vec![];
            }
            let text = app.input.take();
            dispatch_session(app, SessionEvent::Send { text })
        }
        KeyCode::Char(ch) if app.shows_welcome() && app.input.is_empty() => {
            match ch.to_digit(10).and_then(|d| suggestion(d as usize)) {
                Some(text) => app.input.set_text(text),
                None => app.input.insert_char(ch),
            }
            vec![]
        }
        KeyCode::Char(ch) => {
            app.input.insert_char(ch);
            vec![]
        }
        KeyCode::Backspace => {
            app.input.backspace();
            vec![]
        }
        KeyCode::Delete => {
            app.input.delete();
            vec![]
        }
        KeyCode::Left => {
            app.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            app.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            app.input.move_home();
            vec![]
        }
        KeyCode::End => {
            app.input.move_end();
            vec![]
        }
        _ => vec![],
    }
}

fn handle_sidebar_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.sidebar.selected = app.sidebar.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.sidebar.selected += 1;
            app.sidebar.clamp(app.session.history.len());
            vec![]
        }
        KeyCode::Enter => {
            let Some(entry) = app.selected_entry() else {
                return vec![];
            };
            let session_id = entry.id.clone();
            app.focus = Focus::Input;
            dispatch_session(app, SessionEvent::Load { session_id })
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let Some(entry) = app.selected_entry() else {
                return vec![];
            };
            let session_id = entry.id.clone();
            dispatch_session(app, SessionEvent::Delete { session_id })
        }
        _ => vec![],
    }
}

/// Maps 1–4 to a welcome suggestion.
fn suggestion(digit: usize) -> Option<&'static str> {
    digit
        .checked_sub(1)
        .and_then(|i| WELCOME_SUGGESTIONS.get(i))
        .copied()
}
