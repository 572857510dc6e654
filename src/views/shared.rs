use crate::ai::ProviderClient;
use crate::session::{Completion, PendingRequest, Session, SessionError};
use crate::storage::{KeyValueStore, default_store};
use dioxus::prelude::*;
use std::sync::Arc;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Handles shared by every view through the context API.
#[derive(Clone)]
pub struct AppContext {
    pub client: Option<Arc<ProviderClient>>,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppContext {
    pub fn from_env() -> Self {
        let client = match ProviderClient::from_env() {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                tracing::warn!(error = %err, "design provider unavailable");
                None
            }
        };
        Self {
            client,
            store: default_store(),
        }
    }
}

/// Starts a session action and, if it was accepted, runs its remote call in the background.
pub fn start_request(
    mut session: Signal<Session>,
    begin: impl FnOnce(&mut Session) -> Result<PendingRequest, SessionError>,
) {
    let pending = match session.with_mut(begin) {
        Ok(pending) => pending,
        Err(err) => {
            tracing::debug!(%err, "action ignored");
            return;
        }
    };

    let client = consume_context::<AppContext>().client;
    spawn(async move {
        let in_flight = InFlight { session: Some(session) };
        let completion = match client {
            Some(client) => pending.run(client.as_ref()).await,
            None => pending.unavailable(),
        };
        in_flight.finish(completion);
    });
}

/// Abandons the request if the task is dropped before `finish`.
struct InFlight {
    session: Option<Signal<Session>>,
}

impl InFlight {
    fn finish(mut self, completion: Completion) {
        if let Some(mut session) = self.session.take() {
            session.with_mut(|s| s.complete(completion));
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Ok(mut state) = session.try_write() {
            state.abandon();
        }
    }
}

pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}
