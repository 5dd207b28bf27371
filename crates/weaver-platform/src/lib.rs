//! Browser adapters for the weaver-core ports.
//!
//! Everything in this crate touches the page: HTTP via `fetch()`,
//! `localStorage`, and the sandbox iframe. The core never sees any of it.

pub mod llm;
pub mod storage;
pub mod preview;
