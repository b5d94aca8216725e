//! Effects returned by the UI reducer for the runtime to execute.

use goldgpt_core::session::SessionEffect;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    Quit,
    /// Backend call; the runtime spawns it and feeds the result back.
    Session(SessionEffect),
}

impl From<SessionEffect> for UiEffect {
    fn from(effect: SessionEffect) -> Self {
        UiEffect::Session(effect)
    }
}
