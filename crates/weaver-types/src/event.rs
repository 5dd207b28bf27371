use serde::{Deserialize, Serialize};

/// Events emitted by the session orchestrator.
/// The UI drains these each frame for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A turn began processing a user message
    TurnStart { turn_id: u64 },

    /// The chat service produced (or fell back to) the assistant reply
    AssistantReply { text: String },

    /// The project snapshot was replaced wholesale.
    /// `fallback` is true when generation was unusable and the placeholder
    /// project was substituted.
    SnapshotReplaced { file_count: usize, fallback: bool },

    /// The turn finished; the session accepts input again
    TurnEnd { turn_id: u64 },

    /// A recoverable failure occurred mid-turn
    Error { message: String },
}
