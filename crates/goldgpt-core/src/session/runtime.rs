//! Headless session runtime.
//!
//! Owns a [`SessionState`] and executes the reducer's effects on the tokio
//! runtime. Results come back through a single inbox channel and are applied
//! one at a time, so state is only ever mutated by the reducer.
//!
//! Used directly by one-shot commands and tests; the terminal UI embeds the
//! same reducer inside its own event loop.

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::session::effects::SessionEffect;
use crate::session::events::SessionEvent;
use crate::session::state::SessionState;
use crate::session::{handlers, update};

pub type SessionEventSender = mpsc::UnboundedSender<SessionEvent>;
pub type SessionEventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

pub struct SessionRuntime {
    pub state: SessionState,
    api: ApiClient,
    inbox_tx: SessionEventSender,
    inbox_rx: SessionEventReceiver,
    /// Spawned effects whose result has not been applied yet.
    in_flight: usize,
}

impl SessionRuntime {
    pub fn new(api: ApiClient) -> Self {
        let base_url = api.base_url().as_str().trim_end_matches('/').to_string();
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: SessionState::new(base_url),
            api,
            inbox_tx,
            inbox_rx,
            in_flight: 0,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Applies `event` and spawns the resulting effects.
    pub fn dispatch(&mut self, event: SessionEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.spawn_effect(effect);
        }
    }

    /// Applies results until no spawned effect remains outstanding.
    ///
    /// Effects spawned while settling (the history refresh after a save, for
    /// example) are awaited too.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(event) = self.inbox_rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.dispatch(event);
        }
    }

    /// Applies whatever results have already arrived without waiting.
    pub fn drain(&mut self) {
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(event);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    fn spawn_effect(&mut self, effect: SessionEffect) {
        self.in_flight += 1;
        let tx = self.inbox_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let _ = tx.send(handlers::execute(api, effect).await);
        });
    }
}
