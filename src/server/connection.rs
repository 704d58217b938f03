//! Maps protocol requests onto session operations.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::engine::{Advance, Retreat, SessionController, SessionRegistry};
use crate::protocol::{ClientMessage, ErrorKind, ServerMessage, validate_username};

/// Per-connection request handler. Holds which session the socket is
/// attached to; all session state lives in the registry.
pub struct Connection {
    registry: Arc<SessionRegistry>,
    session: Option<Uuid>,
}

impl Connection {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            registry,
            session: None,
        }
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session
    }

    /// Decode and handle one text frame.
    pub fn handle_text(&mut self, text: &str) -> ServerMessage {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => self.handle(msg),
            Err(e) => {
                warn!(error = %e, "malformed request");
                ServerMessage::error(ErrorKind::BadRequest, format!("malformed request: {}", e))
            }
        }
    }

    pub fn handle(&mut self, msg: ClientMessage) -> ServerMessage {
        match msg {
            ClientMessage::Start { username } => self.start(username),
            ClientMessage::Resume { session_id } => self.resume(session_id),
            ClientMessage::Leave => self.leave(),
            other => match self.controller() {
                Ok((id, controller)) => {
                    let _span = info_span!("session", id = %id).entered();
                    dispatch(&controller, other)
                }
                Err(reply) => reply,
            },
        }
    }

    fn start(&mut self, username: Option<String>) -> ServerMessage {
        let owner = match username {
            Some(name) => {
                if let Err(reason) = validate_username(&name) {
                    return ServerMessage::error(ErrorKind::InvalidUsername, reason);
                }
                Some(name.trim().to_string())
            }
            None => None,
        };

        if let Some(previous) = self.session.take() {
            self.registry.close(previous);
        }

        let (session_id, _) = self.registry.open(owner);
        self.session = Some(session_id);

        ServerMessage::SessionStarted {
            session_id,
            deck_length: self.registry.deck().len(),
        }
    }

    fn resume(&mut self, session_id: Uuid) -> ServerMessage {
        match self.registry.resume(session_id) {
            Ok(controller) => {
                info!(session = %session_id, "session resumed");
                self.session = Some(session_id);
                controller.get_current().into()
            }
            Err(e) => e.into(),
        }
    }

    fn leave(&mut self) -> ServerMessage {
        match self.session.take() {
            Some(id) => {
                self.registry.close(id);
                ServerMessage::SessionClosed
            }
            None => no_session(),
        }
    }

    fn controller(&self) -> Result<(Uuid, Arc<SessionController>), ServerMessage> {
        let id = self.session.ok_or_else(no_session)?;
        let controller = self.registry.resume(id)?;
        Ok((id, controller))
    }
}

fn no_session() -> ServerMessage {
    ServerMessage::error(ErrorKind::NoSession, "start or resume a session first")
}

fn dispatch(controller: &SessionController, msg: ClientMessage) -> ServerMessage {
    match msg {
        ClientMessage::GetCurrent => controller.get_current().into(),
        ClientMessage::SubmitAnswer { selection } => match controller.submit_answer(selection) {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                debug!(error = %e, "submission rejected");
                e.into()
            }
        },
        ClientMessage::Advance => match controller.advance_card() {
            Advance::Card(card) => card.into(),
            Advance::Completed(completion) => {
                info!(
                    score = completion.report.score,
                    answered = completion.report.answered,
                    accuracy = completion.report.accuracy,
                    "quiz completed"
                );
                completion.into()
            }
        },
        ClientMessage::Retreat => match controller.retreat_card() {
            Retreat::Card(card) => card.into(),
            Retreat::Boundary(snapshot) => ServerMessage::Boundary { snapshot },
        },
        ClientMessage::Reset => controller.reset_session().into(),
        ClientMessage::Start { .. } | ClientMessage::Resume { .. } | ClientMessage::Leave => {
            ServerMessage::error(ErrorKind::BadRequest, "not a session operation")
        }
    }
}
