//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `weaver-core` (pure Rust).
//! Implementations live in `weaver-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use weaver_types::{message::Message, project::ProjectSnapshot, Result};

// ─── Chat Port ───────────────────────────────────────────────

/// The remote chat service: takes the conversation so far plus the new
/// user text, returns the assistant's free-text reply.
#[async_trait(?Send)]
pub trait ChatPort {
    async fn send_message(&self, history: &[Message], question: &str) -> Result<String>;
}

// ─── Codegen Port ────────────────────────────────────────────

/// The remote project-generation service: takes the conversation, the new
/// instruction, and the current snapshot as context, and returns raw text
/// that is expected (but not guaranteed) to be a JSON project payload.
///
/// The raw text goes through the response interpreter, never directly
/// into session state.
#[async_trait(?Send)]
pub trait CodegenPort {
    async fn generate_project(
        &self,
        history: &[Message],
        instruction: &str,
        current: &ProjectSnapshot,
    ) -> Result<String>;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Preview Port ────────────────────────────────────────────

/// The embedded sandbox that renders a snapshot. Mounting is wholesale:
/// the sandbox discards its previous file set on every call.
#[async_trait(?Send)]
pub trait PreviewPort {
    async fn mount(&self, snapshot: &ProjectSnapshot) -> Result<()>;

    /// Check if the sandbox runtime is ready to accept a mount
    fn is_ready(&self) -> bool;
}
