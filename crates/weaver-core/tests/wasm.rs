//! WASM-target tests for weaver-core.
//!
//! Runs interpreter, state container, event bus, and orchestrator tests
//! under wasm32-unknown-unknown via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use weaver_core::event_bus::EventBus;
use weaver_core::interpreter::{parse_project, try_parse_project};
use weaver_core::orchestrator::{SessionOrchestrator, SessionState, TurnOutcome, FALLBACK_REPLY};
use weaver_core::ports::*;
use weaver_core::state::{MessageLog, SnapshotCell};
use weaver_types::event::SessionEvent;
use weaver_types::message::*;
use weaver_types::project::ProjectSnapshot;
use weaver_types::session::Session;

use std::cell::RefCell;
use async_trait::async_trait;

const TWO_FILE_PAYLOAD: &str =
    r#"{"App.js":{"code":"function App(){return null}"},"index.js":{"code":"import App from './App.js';"}}"#;

// ─── Interpreter Tests ───────────────────────────────────

#[wasm_bindgen_test]
fn parse_strict_payload() {
    let snapshot = parse_project(TWO_FILE_PAYLOAD);
    assert_eq!(snapshot.len(), 2);
}

#[wasm_bindgen_test]
fn parse_tolerates_prose_wrapper() {
    let snapshot = parse_project("Here is your project:\n{\"App.js\":{\"code\":\"x\"}}\nEnjoy!");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get("App.js").unwrap().code, "x");
}

#[wasm_bindgen_test]
fn parse_malformed_falls_back() {
    assert_eq!(parse_project("not json at all"), ProjectSnapshot::placeholder());
}

#[wasm_bindgen_test]
fn parse_empty_object_falls_back() {
    assert!(try_parse_project("{}").is_none());
    assert_eq!(parse_project("{}"), ProjectSnapshot::placeholder());
}

#[wasm_bindgen_test]
fn parse_handles_braces_inside_strings() {
    let raw = "ok\n{\"App.js\":{\"code\":\"function App() { return '}'; }\"}}";
    assert_eq!(parse_project(raw).len(), 1);
}

// ─── State Container Tests ───────────────────────────────

#[wasm_bindgen_test]
fn message_log_appends_in_order() {
    let log = MessageLog::new();
    log.append(Message::user("one"));
    log.append(Message::assistant("two"));
    let all = log.all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].role, Role::User);
    assert_eq!(all[1].role, Role::Assistant);
}

#[wasm_bindgen_test]
fn snapshot_cell_replaces_wholesale() {
    let cell = SnapshotCell::default();
    let mut next = ProjectSnapshot::new();
    next.insert("App.js", "x");
    cell.replace(next.clone());
    assert_eq!(cell.current(), next);
}

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(SessionEvent::TurnStart { turn_id: 1 });
    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 1);
    assert!(!bus.has_pending());
}

// ─── Mock Ports ──────────────────────────────────────────

struct MockChat {
    reply: String,
    calls: RefCell<usize>,
}

#[async_trait(?Send)]
impl ChatPort for MockChat {
    async fn send_message(
        &self,
        _history: &[Message],
        _question: &str,
    ) -> weaver_types::Result<String> {
        *self.calls.borrow_mut() += 1;
        Ok(self.reply.clone())
    }
}

struct FailingChat;

#[async_trait(?Send)]
impl ChatPort for FailingChat {
    async fn send_message(
        &self,
        _history: &[Message],
        _question: &str,
    ) -> weaver_types::Result<String> {
        Err(weaver_types::WeaverError::Network("connection reset".to_string()))
    }
}

struct MockCodegen {
    payload: String,
    calls: RefCell<usize>,
}

#[async_trait(?Send)]
impl CodegenPort for MockCodegen {
    async fn generate_project(
        &self,
        _history: &[Message],
        _instruction: &str,
        _current: &ProjectSnapshot,
    ) -> weaver_types::Result<String> {
        *self.calls.borrow_mut() += 1;
        Ok(self.payload.clone())
    }
}

struct FailingCodegen;

#[async_trait(?Send)]
impl CodegenPort for FailingCodegen {
    async fn generate_project(
        &self,
        _history: &[Message],
        _instruction: &str,
        _current: &ProjectSnapshot,
    ) -> weaver_types::Result<String> {
        Err(weaver_types::WeaverError::Codegen("upstream timeout".to_string()))
    }
}

fn mock_chat(reply: &str) -> MockChat {
    MockChat {
        reply: reply.to_string(),
        calls: RefCell::new(0),
    }
}

fn mock_codegen(payload: &str) -> MockCodegen {
    MockCodegen {
        payload: payload.to_string(),
        calls: RefCell::new(0),
    }
}

// ─── Orchestrator Tests ──────────────────────────────────

#[wasm_bindgen_test]
async fn empty_input_is_a_noop() {
    let mut orch = SessionOrchestrator::new(EventBus::new());
    let chat = mock_chat("reply");
    let codegen = mock_codegen(TWO_FILE_PAYLOAD);

    let outcome = orch.run_turn("   ", false, &chat, &codegen).await;
    assert_eq!(outcome, TurnOutcome::Empty);
    assert_eq!(*chat.calls.borrow(), 0);
    assert_eq!(*codegen.calls.borrow(), 0);
    assert!(orch.log.is_empty());
}

#[wasm_bindgen_test]
async fn busy_session_ignores_new_sends() {
    let mut orch = SessionOrchestrator::new(EventBus::new());
    orch.state = SessionState::AwaitingReply;

    let chat = mock_chat("reply");
    let codegen = mock_codegen(TWO_FILE_PAYLOAD);
    let outcome = orch.run_turn("build", false, &chat, &codegen).await;

    assert_eq!(outcome, TurnOutcome::Busy);
    assert_eq!(*chat.calls.borrow(), 0);
    assert_eq!(*codegen.calls.borrow(), 0);
}

#[wasm_bindgen_test]
async fn end_to_end_successful_turn() {
    let mut orch = SessionOrchestrator::new(EventBus::new());
    let chat = mock_chat("Building a counter app");
    let codegen = mock_codegen(TWO_FILE_PAYLOAD);

    let outcome = orch.run_turn("build a counter", false, &chat, &codegen).await;
    assert_eq!(outcome, TurnOutcome::Completed);

    let messages = orch.log.all();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "build a counter");
    assert_eq!(messages[1].content, "Building a counter app");
    assert_eq!(orch.snapshot.current().len(), 2);
    assert!(!orch.is_busy());
}

#[wasm_bindgen_test]
async fn chat_failure_appends_apology_and_continues() {
    let mut orch = SessionOrchestrator::new(EventBus::new());
    let chat = FailingChat;
    let codegen = mock_codegen(TWO_FILE_PAYLOAD);

    let outcome = orch.run_turn("build a counter", false, &chat, &codegen).await;
    assert_eq!(outcome, TurnOutcome::Completed);
    assert_eq!(orch.log.all()[1].content, FALLBACK_REPLY);
    assert_eq!(orch.snapshot.current().len(), 2);
}

#[wasm_bindgen_test]
async fn codegen_failure_falls_back_to_placeholder() {
    let mut orch = SessionOrchestrator::new(EventBus::new());
    let chat = mock_chat("Building a counter app");
    let codegen = FailingCodegen;

    let outcome = orch.run_turn("build a counter", false, &chat, &codegen).await;
    assert_eq!(outcome, TurnOutcome::Completed);
    assert_eq!(orch.log.len(), 2);
    assert_eq!(orch.snapshot.current(), ProjectSnapshot::placeholder());
}

#[wasm_bindgen_test]
async fn seeded_turn_does_not_echo_user_message() {
    let session = Session::with_initial_prompt("build a todo app");
    let mut orch = SessionOrchestrator::hydrate(session, EventBus::new());
    let chat = mock_chat("Building a todo app");
    let codegen = mock_codegen(TWO_FILE_PAYLOAD);

    orch.run_turn("build a todo app", true, &chat, &codegen).await;
    assert_eq!(orch.log.len(), 2);
}
