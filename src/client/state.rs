//! Client state management.

use crossterm::event::KeyCode;

use crate::config::ClientConfig;
use crate::engine::ScoreReport;
use crate::models::{Correctness, QuestionView, Reveal, Snapshot};
use crate::protocol::{ClientMessage, ErrorKind, ServerMessage};

/// Tone of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

/// Current state of the client.
#[derive(Debug, Clone, Default)]
pub enum ClientState {
    /// Connecting to server or waiting for the first card.
    #[default]
    Connecting,

    /// Looking at a question.
    Playing {
        question: QuestionView,
        snapshot: Snapshot,
        selected: usize,
    },

    /// Advanced past the last question.
    Completed {
        report: ScoreReport,
        deck_length: usize,
    },

    /// Disconnected from server.
    Disconnected { message: String },
}

/// Client application state.
pub struct ClientApp {
    /// Current state.
    pub state: ClientState,
    /// Line shown under the card.
    pub status: Option<Status>,
    pub config: ClientConfig,
    /// Choice sent with the last `SubmitAnswer`, until its verdict arrives.
    pub pending_selection: Option<usize>,
    /// Whether the client should quit.
    pub should_quit: bool,
}

impl ClientApp {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            state: ClientState::Connecting,
            status: None,
            config,
            pending_selection: None,
            should_quit: false,
        }
    }

    pub fn server_addr(&self) -> String {
        self.config.server_addr()
    }

    /// First request sent once the socket is open.
    pub fn hello(&self) -> ClientMessage {
        ClientMessage::Start {
            username: self.config.username.clone(),
        }
    }

    /// Apply a server message. Returns a follow-up request, if any.
    pub fn apply(&mut self, msg: ServerMessage) -> Option<ClientMessage> {
        match msg {
            ServerMessage::SessionStarted { .. } => {
                return Some(ClientMessage::GetCurrent);
            }
            ServerMessage::Card { question, snapshot } => {
                self.show_card(question, snapshot);
            }
            ServerMessage::AnswerResult {
                correctness,
                correct_choice,
                explanation,
                snapshot,
            } => {
                self.show_verdict(correctness, correct_choice, explanation, snapshot);
            }
            ServerMessage::Completed {
                report,
                deck_length,
            } => {
                self.status = None;
                self.state = ClientState::Completed {
                    report,
                    deck_length,
                };
            }
            ServerMessage::Boundary { snapshot } => {
                if let ClientState::Playing { snapshot: current, .. } = &mut self.state {
                    *current = snapshot;
                }
                self.set_status(StatusLevel::Warning, "Already at the first question");
            }
            ServerMessage::SessionClosed => {
                self.should_quit = true;
            }
            ServerMessage::Error { kind, message } => {
                if matches!(kind, ErrorKind::SessionNotFound | ErrorKind::NoSession) {
                    self.disconnect(format!("Session lost: {}", message));
                } else {
                    self.pending_selection = None;
                    self.set_status(StatusLevel::Error, message);
                }
            }
        }
        None
    }

    /// Handle a key press. Returns the request to send, if any.
    pub fn on_key(&mut self, key: KeyCode) -> Option<ClientMessage> {
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            self.should_quit = true;
            return match self.state {
                ClientState::Playing { .. } | ClientState::Completed { .. } => {
                    Some(ClientMessage::Leave)
                }
                _ => None,
            };
        }

        match &self.state {
            ClientState::Playing { question, .. } => match key {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.select_previous_choice();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.select_next_choice();
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if question.reveal.is_some() {
                        self.set_status(StatusLevel::Info, "Already answered; press n for the next one");
                        None
                    } else {
                        let selection = self.selected_choice();
                        self.pending_selection = Some(selection);
                        Some(ClientMessage::SubmitAnswer { selection })
                    }
                }
                KeyCode::Right | KeyCode::Char('n') => Some(ClientMessage::Advance),
                KeyCode::Left | KeyCode::Char('p') => Some(ClientMessage::Retreat),
                KeyCode::Char('r') | KeyCode::Char('R') => Some(ClientMessage::Reset),
                _ => None,
            },
            ClientState::Completed { .. } => match key {
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                    Some(ClientMessage::Reset)
                }
                KeyCode::Left | KeyCode::Char('p') => Some(ClientMessage::GetCurrent),
                _ => None,
            },
            ClientState::Disconnected { .. } => {
                if key == KeyCode::Enter {
                    self.should_quit = true;
                }
                None
            }
            ClientState::Connecting => None,
        }
    }

    /// Move to disconnected state.
    pub fn disconnect(&mut self, message: String) {
        self.state = ClientState::Disconnected { message };
    }

    pub fn selected_choice(&self) -> usize {
        if let ClientState::Playing { selected, .. } = &self.state {
            *selected
        } else {
            0
        }
    }

    pub fn select_next_choice(&mut self) {
        if let ClientState::Playing {
            question, selected, ..
        } = &mut self.state
        {
            let n = question.choices.len().max(1);
            *selected = (*selected + 1) % n;
        }
    }

    pub fn select_previous_choice(&mut self) {
        if let ClientState::Playing {
            question, selected, ..
        } = &mut self.state
        {
            let n = question.choices.len().max(1);
            *selected = (*selected + n - 1) % n;
        }
    }

    fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(Status {
            level,
            text: text.into(),
        });
    }

    fn show_card(&mut self, question: QuestionView, snapshot: Snapshot) {
        // Keep the cursor on the chosen answer when revisiting.
        let selected = question.reveal.as_ref().map_or(0, |r| r.selected);
        self.pending_selection = None;
        self.status = None;
        self.state = ClientState::Playing {
            question,
            snapshot,
            selected,
        };
    }

    fn show_verdict(
        &mut self,
        correctness: Correctness,
        correct_choice: usize,
        explanation: Option<String>,
        snapshot: Snapshot,
    ) {
        let submitted = self.pending_selection.take();
        let ClientState::Playing {
            question,
            snapshot: current,
            selected,
        } = &mut self.state
        else {
            return;
        };

        let selection = submitted.unwrap_or(*selected);
        *selected = selection;
        question.reveal = Some(Reveal {
            selected: selection,
            correct: correctness.is_correct(),
            correct_choice,
            explanation,
        });
        *current = snapshot;

        if correctness.is_correct() {
            self.set_status(StatusLevel::Success, "Correct!");
        } else {
            self.set_status(StatusLevel::Error, "Not quite.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Difficulty};

    fn app() -> ClientApp {
        ClientApp::new(ClientConfig {
            host: "127.0.0.1".to_string(),
            port: 8712,
            username: Some("alice".to_string()),
        })
    }

    fn card(choices: usize) -> ServerMessage {
        ServerMessage::Card {
            question: QuestionView {
                id: "q".to_string(),
                prompt: "Pick one".to_string(),
                category: Category::Functions,
                difficulty: Difficulty::Easy,
                choices: (0..choices).map(|i| i.to_string()).collect(),
                reveal: None,
            },
            snapshot: Snapshot {
                position: 1,
                score: 0,
                answered: 0,
                accuracy: 0,
                deck_length: 3,
            },
        }
    }

    #[test]
    fn test_session_start_requests_card() {
        let mut app = app();
        assert_eq!(
            app.hello(),
            ClientMessage::Start {
                username: Some("alice".to_string())
            }
        );
        let follow_up = app.apply(ServerMessage::SessionStarted {
            session_id: uuid::Uuid::new_v4(),
            deck_length: 3,
        });
        assert_eq!(follow_up, Some(ClientMessage::GetCurrent));
    }

    #[test]
    fn test_choice_selection_wraps() {
        let mut app = app();
        app.apply(card(3));
        app.on_key(KeyCode::Up);
        assert_eq!(app.selected_choice(), 2);
        app.on_key(KeyCode::Down);
        app.on_key(KeyCode::Down);
        assert_eq!(app.selected_choice(), 1);
        assert_eq!(
            app.on_key(KeyCode::Enter),
            Some(ClientMessage::SubmitAnswer { selection: 1 })
        );
    }

    #[test]
    fn test_verdict_reveals_and_blocks_resubmit() {
        let mut app = app();
        app.apply(card(2));
        app.apply(ServerMessage::AnswerResult {
            correctness: Correctness::Incorrect,
            correct_choice: 1,
            explanation: None,
            snapshot: Snapshot {
                position: 1,
                score: 0,
                answered: 1,
                accuracy: 0,
                deck_length: 3,
            },
        });

        let ClientState::Playing { question, snapshot, .. } = &app.state else {
            panic!("expected playing state");
        };
        assert_eq!(question.reveal.as_ref().map(|r| r.correct_choice), Some(1));
        assert_eq!(snapshot.answered, 1);
        assert_eq!(app.on_key(KeyCode::Enter), None);
        assert_eq!(app.on_key(KeyCode::Char('n')), Some(ClientMessage::Advance));
    }

    #[test]
    fn test_verdict_uses_submitted_choice() {
        let mut app = app();
        app.apply(card(3));
        app.on_key(KeyCode::Down);
        assert_eq!(
            app.on_key(KeyCode::Enter),
            Some(ClientMessage::SubmitAnswer { selection: 1 })
        );

        // Cursor moves while the reply is in flight.
        app.on_key(KeyCode::Down);
        app.apply(ServerMessage::AnswerResult {
            correctness: Correctness::Correct,
            correct_choice: 1,
            explanation: None,
            snapshot: Snapshot {
                position: 1,
                score: 1,
                answered: 1,
                accuracy: 100,
                deck_length: 3,
            },
        });

        let ClientState::Playing {
            question, selected, ..
        } = &app.state
        else {
            panic!("expected playing state");
        };
        assert_eq!(question.reveal.as_ref().map(|r| r.selected), Some(1));
        assert_eq!(*selected, 1);
        assert_eq!(app.pending_selection, None);
    }

    #[test]
    fn test_boundary_keeps_card_and_warns() {
        let mut app = app();
        app.apply(card(2));
        let ServerMessage::Card { snapshot, .. } = card(2) else {
            unreachable!();
        };
        app.apply(ServerMessage::Boundary { snapshot });
        assert!(matches!(app.state, ClientState::Playing { .. }));
        assert_eq!(
            app.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Warning)
        );
    }

    #[test]
    fn test_completion_and_quit() {
        let mut app = app();
        app.apply(ServerMessage::Completed {
            report: ScoreReport {
                score: 1,
                answered: 2,
                accuracy: 50,
                points: 10,
                current_streak: 0,
                best_streak: 1,
            },
            deck_length: 3,
        });
        assert!(matches!(app.state, ClientState::Completed { .. }));
        assert_eq!(app.on_key(KeyCode::Char('r')), Some(ClientMessage::Reset));
        assert_eq!(app.on_key(KeyCode::Char('q')), Some(ClientMessage::Leave));
        assert!(app.should_quit);
    }

    #[test]
    fn test_lost_session_disconnects() {
        let mut app = app();
        app.apply(card(2));
        app.apply(ServerMessage::error(ErrorKind::SessionNotFound, "gone"));
        assert!(matches!(app.state, ClientState::Disconnected { .. }));
    }
}
