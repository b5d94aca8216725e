//! UI events: everything the reducer reacts to.

use chrono::{DateTime, Utc};
use crossterm::event::Event;
use goldgpt_core::session::SessionEvent;

#[derive(Debug)]
pub enum UiEvent {
    /// Animation and clock tick. Carries the wall clock so the reducer stays pure.
    Tick { now: DateTime<Utc> },
    /// Raw terminal input.
    Terminal(Event),
    /// Session action or backend result.
    Session(SessionEvent),
}
