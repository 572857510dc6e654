use crate::ai::DesignClient;
use crate::mood_board::{ImportFormatError, ImportOutcome, MoodBoard};
use crate::session::{Completion, PendingRequest, Session, SessionError};
use crate::storage::KeyValueStore;
use crate::types::{ImageFile, Style};
use std::sync::Arc;

/// Binds user actions to the design client, the session and the mood board.
///
/// Remote-backed actions are single-flight: while one is outstanding every
/// other session action is rejected with [`SessionError::Busy`]. Mood board
/// actions are never gated.
pub struct Orchestrator<C> {
    client: C,
    session: Session,
    board: MoodBoard,
}

impl<C: DesignClient> Orchestrator<C> {
    pub fn new(client: C, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            client,
            session: Session::new(),
            board: MoodBoard::load(store),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn board(&self) -> &MoodBoard {
        &self.board
    }

    pub fn upload(&mut self, image: ImageFile) -> Result<(), SessionError> {
        self.session.upload(image)
    }

    pub fn toggle_customization(&mut self, category: &str, option: &str) -> Result<(), SessionError> {
        self.session.toggle_customization(category, option)
    }

    pub async fn select_style(&mut self, style: Style) -> Result<(), SessionError> {
        let pending = self.session.begin_style_selection(style)?;
        self.dispatch(pending).await;
        Ok(())
    }

    pub async fn apply_customizations(&mut self) -> Result<(), SessionError> {
        let pending = self.session.begin_customization()?;
        self.dispatch(pending).await;
        Ok(())
    }

    pub async fn send_chat_message(&mut self, text: &str) -> Result<(), SessionError> {
        let pending = self.session.begin_chat(text)?;
        self.dispatch(pending).await;
        Ok(())
    }

    async fn dispatch(&mut self, pending: PendingRequest) {
        let in_flight = InFlight::new(&mut self.session);
        let completion = pending.run(&self.client).await;
        in_flight.finish(completion);
    }

    /// Returns the id of the saved item.
    pub fn save_to_mood_board(&mut self) -> Result<String, SessionError> {
        let snapshot = self.session.design_snapshot()?;
        let id = self.board.save_design(
            snapshot.image_base64,
            snapshot.style_name,
            snapshot.customizations,
        );
        tracing::info!(%id, "design saved to mood board");
        Ok(id)
    }

    pub fn remove_from_mood_board(&mut self, id: &str) -> bool {
        self.board.remove(id)
    }

    pub fn import_mood_board(&mut self, raw: &str) -> Result<ImportOutcome, ImportFormatError> {
        self.board.import_json(raw)
    }

    pub fn export_mood_board(&self) -> Result<String, serde_json::Error> {
        self.board.export_json()
    }
}

/// Abandons the session's request if dropped before `finish`.
struct InFlight<'a> {
    session: Option<&'a mut Session>,
}

impl<'a> InFlight<'a> {
    fn new(session: &'a mut Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    fn finish(mut self, completion: Completion) {
        if let Some(session) = self.session.take() {
            session.complete(completion);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.abandon();
        }
    }
}
