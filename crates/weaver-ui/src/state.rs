//! UI-level state that drives rendering.
//! This is a read-only projection of the session state, updated each
//! frame by draining the EventBus.

use weaver_core::orchestrator::SessionState;
use weaver_types::event::SessionEvent;
use weaver_types::message::Role;
use weaver_types::project::ProjectSnapshot;

/// State visible to UI panels
pub struct UiState {
    /// Displayed conversation (user + assistant)
    pub messages: Vec<ChatEntry>,
    /// Current session status
    pub session_status: SessionState,
    /// Files of the snapshot currently shown in the workspace panel
    pub files: ProjectSnapshot,
    /// Path selected in the workspace panel
    pub selected_file: Option<String>,
    /// True when the last replacement substituted the placeholder project
    pub snapshot_is_fallback: bool,
    /// Set when a SnapshotReplaced event arrived; the app layer pulls the
    /// new snapshot in via [`UiState::apply_snapshot`]
    pub snapshot_dirty: bool,
    /// Input field content
    pub input_text: String,
    /// Whether the settings panel is open
    pub show_settings: bool,
    /// Status line text
    pub status_text: String,
}

/// A chat entry for display
#[derive(Clone)]
pub struct ChatEntry {
    pub role: Role,
    pub content: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            session_status: SessionState::Idle,
            files: ProjectSnapshot::new(),
            selected_file: None,
            snapshot_is_fallback: false,
            snapshot_dirty: false,
            input_text: String::new(),
            show_settings: false,
            status_text: "Ready".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state.
    ///
    /// Errors only touch the status line: chat failures already surface as
    /// the apology reply, and generation failures as the placeholder
    /// project, so the conversation view stays clean.
    pub fn process_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::TurnStart { .. } => {
                    self.session_status = SessionState::AwaitingReply;
                    self.status_text = "Working...".to_string();
                }
                SessionEvent::AssistantReply { text } => {
                    self.messages.push(ChatEntry {
                        role: Role::Assistant,
                        content: text,
                    });
                }
                SessionEvent::SnapshotReplaced { file_count, fallback } => {
                    self.snapshot_dirty = true;
                    self.snapshot_is_fallback = fallback;
                    self.status_text = if fallback {
                        "Generation unusable; showing placeholder".to_string()
                    } else {
                        format!("Generated {} files", file_count)
                    };
                }
                SessionEvent::TurnEnd { .. } => {
                    self.session_status = SessionState::Idle;
                    self.status_text = "Ready".to_string();
                }
                SessionEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                }
            }
        }
    }

    /// Install a freshly replaced snapshot into the workspace view,
    /// keeping the selection when the file survived the replacement.
    pub fn apply_snapshot(&mut self, snapshot: ProjectSnapshot) {
        let keep = self
            .selected_file
            .as_deref()
            .is_some_and(|path| snapshot.contains(path));
        if !keep {
            self.selected_file = if snapshot.contains("App.js") {
                Some("App.js".to_string())
            } else {
                snapshot.paths().next().map(String::from)
            };
        }
        self.files = snapshot;
        self.snapshot_dirty = false;
    }

    /// Add a user message to the display
    pub fn push_user_message(&mut self, text: &str) {
        self.messages.push(ChatEntry {
            role: Role::User,
            content: text.to_string(),
        });
    }

    pub fn is_busy(&self) -> bool {
        self.session_status == SessionState::AwaitingReply
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
