//! Session orchestrator — drives one request cycle.
//!
//! A turn appends the user message, asks the chat service for a reply,
//! asks the generation service for a fresh project, and replaces the
//! snapshot with the interpreted result. Every remote failure resolves to
//! deterministic fallback content; nothing here is fatal and nothing is
//! retried. The user retries by sending another message.

use weaver_types::{
    event::SessionEvent,
    message::Message,
    project::ProjectSnapshot,
    session::Session,
};

use crate::event_bus::EventBus;
use crate::interpreter::try_parse_project;
use crate::ports::{ChatPort, CodegenPort};
use crate::state::{MessageLog, SnapshotCell};

/// Reply appended when the chat service fails. The conversation continues;
/// no raw error detail reaches the user-visible log.
pub const FALLBACK_REPLY: &str = "I apologize, but I'm having trouble processing \
your request right now. Please try again in a moment.";

/// Live state of one session. Exclusively owns the message log and the
/// snapshot cell; ports and the interpreter only ever borrow.
pub struct SessionOrchestrator {
    pub log: MessageLog,
    pub snapshot: SnapshotCell,
    pub event_bus: EventBus,
    pub state: SessionState,
    id: String,
    title: String,
    created_at: String,
    turn_counter: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// A turn is in flight; new sends are ignored until it completes
    AwaitingReply,
}

/// How a call to [`SessionOrchestrator::run_turn`] resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The full cycle ran; log and snapshot were updated
    Completed,
    /// Input was empty after trimming; no state was touched
    Empty,
    /// A turn was already in flight; the send was ignored
    Busy,
}

impl SessionOrchestrator {
    pub fn new(event_bus: EventBus) -> Self {
        Self::hydrate(Session::new(), event_bus)
    }

    /// Build the live state from a persisted session
    pub fn hydrate(session: Session, event_bus: EventBus) -> Self {
        Self {
            log: MessageLog::from_messages(session.messages),
            snapshot: SnapshotCell::new(session.files),
            event_bus,
            state: SessionState::Idle,
            id: session.id,
            title: session.title,
            created_at: session.created_at,
            turn_counter: 0,
        }
    }

    /// Snapshot the live state back into the persisted form
    pub fn to_session(&self) -> Session {
        let mut session = Session {
            id: self.id.clone(),
            title: self.title.clone(),
            messages: self.log.all(),
            files: self.snapshot.current(),
            created_at: self.created_at.clone(),
            updated_at: self.created_at.clone(),
        };
        session.touch();
        session
    }

    /// Run one request cycle: user message → chat reply → regenerated
    /// project snapshot.
    ///
    /// `seeded` suppresses the user-message append for the first turn of a
    /// session created with the prompt already in its log.
    ///
    /// Async and single-threaded: spawn via
    /// `wasm_bindgen_futures::spawn_local`. The two remote calls are
    /// sequential suspension points; the chat exchange is appended before
    /// generation runs so both calls see a consistent log.
    pub async fn run_turn(
        &mut self,
        input: &str,
        seeded: bool,
        chat: &dyn ChatPort,
        codegen: &dyn CodegenPort,
    ) -> TurnOutcome {
        let input = input.trim();
        if input.is_empty() {
            return TurnOutcome::Empty;
        }
        if self.state == SessionState::AwaitingReply {
            log::warn!("Turn ignored: a reply is already pending");
            return TurnOutcome::Busy;
        }

        self.turn_counter += 1;
        let turn_id = self.turn_counter;
        self.state = SessionState::AwaitingReply;
        self.event_bus.emit(SessionEvent::TurnStart { turn_id });

        if !seeded {
            self.log.append(Message::user(input));
        }

        // Chat reply. A failure becomes the fixed apology; the turn goes on.
        let history = self.log.all();
        let reply = match chat.send_message(&history, input).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Chat service failed: {}", e);
                self.event_bus.emit(SessionEvent::Error {
                    message: e.to_string(),
                });
                FALLBACK_REPLY.to_string()
            }
        };
        self.log.append(Message::assistant(reply.clone()));
        self.event_bus.emit(SessionEvent::AssistantReply { text: reply });

        // Project generation. Unusable output falls back to the placeholder,
        // not the stale snapshot: the old files may contradict the
        // conversation turn that was just appended.
        let history = self.log.all();
        let current = self.snapshot.current();
        let parsed = match codegen.generate_project(&history, input, &current).await {
            Ok(raw) => try_parse_project(&raw),
            Err(e) => {
                log::warn!("Generation service failed: {}", e);
                self.event_bus.emit(SessionEvent::Error {
                    message: e.to_string(),
                });
                None
            }
        };
        let fallback = parsed.is_none();
        let snapshot = parsed.unwrap_or_else(ProjectSnapshot::placeholder);
        let file_count = snapshot.len();
        self.snapshot.replace(snapshot);
        self.event_bus.emit(SessionEvent::SnapshotReplaced {
            file_count,
            fallback,
        });

        self.state = SessionState::Idle;
        self.event_bus.emit(SessionEvent::TurnEnd { turn_id });
        TurnOutcome::Completed
    }

    /// Explicit session reset: clears the log and restores the placeholder
    pub fn reset(&mut self) {
        self.log.clear();
        self.snapshot.replace(ProjectSnapshot::placeholder());
        self.state = SessionState::Idle;
        self.turn_counter = 0;
    }

    pub fn is_busy(&self) -> bool {
        self.state == SessionState::AwaitingReply
    }

    pub fn session_id(&self) -> &str {
        &self.id
    }
}
