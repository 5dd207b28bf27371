#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::project::*;
    use crate::session::*;
    use crate::config::*;
    use crate::event::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("build a counter");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "build a counter");
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("Building a counter app");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Building a counter app");
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = Message::user("test input");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, msg);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_role_deserialization() {
        let role: Role = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, Role::Assistant);
    }

    // ─── ProjectSnapshot Tests ───────────────────────────────

    #[test]
    fn test_snapshot_insert_and_get() {
        let mut snapshot = ProjectSnapshot::new();
        snapshot.insert("App.js", "export default function App() {}");
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains("App.js"));
        assert_eq!(
            snapshot.get("App.js").unwrap().code,
            "export default function App() {}"
        );
    }

    #[test]
    fn test_snapshot_empty() {
        let snapshot = ProjectSnapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert!(snapshot.get("App.js").is_none());
    }

    #[test]
    fn test_snapshot_serializes_as_wire_shape() {
        let mut snapshot = ProjectSnapshot::new();
        snapshot.insert("App.js", "x");
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"App.js":{"code":"x"}}"#);
    }

    #[test]
    fn test_snapshot_deserializes_from_wire_shape() {
        let snapshot: ProjectSnapshot =
            serde_json::from_str(r#"{"App.js":{"code":"x"},"index.js":{"code":"y"}}"#).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("index.js").unwrap().code, "y");
    }

    #[test]
    fn test_snapshot_paths_are_sorted() {
        let mut snapshot = ProjectSnapshot::new();
        snapshot.insert("index.js", "b");
        snapshot.insert("App.js", "a");
        snapshot.insert("components/Home.jsx", "c");
        let paths: Vec<&str> = snapshot.paths().collect();
        assert_eq!(paths, vec!["App.js", "components/Home.jsx", "index.js"]);
    }

    #[test]
    fn test_snapshot_replaces_duplicate_key() {
        let mut snapshot = ProjectSnapshot::new();
        snapshot.insert("App.js", "old");
        snapshot.insert("App.js", "new");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("App.js").unwrap().code, "new");
    }

    #[test]
    fn test_placeholder_contains_host_and_entry_point() {
        let snapshot = ProjectSnapshot::placeholder();
        assert!(snapshot.contains("public/index.html"));
        assert!(snapshot.contains("index.js"));
        assert!(snapshot.contains("App.js"));
        assert!(snapshot
            .get("public/index.html")
            .unwrap()
            .code
            .contains("<div id=\"root\">"));
        assert!(snapshot.paths_are_valid());
    }

    #[test]
    fn test_snapshot_from_iterator_and_iter() {
        let snapshot: ProjectSnapshot = vec![
            ("App.js".to_string(), SourceFile::new("a")),
            ("index.js".to_string(), SourceFile::new("b")),
        ]
        .into_iter()
        .collect();
        assert_eq!(snapshot.len(), 2);

        let entries: Vec<(&str, &str)> = snapshot
            .iter()
            .map(|(path, file)| (path, file.code.as_str()))
            .collect();
        assert_eq!(entries, vec![("App.js", "a"), ("index.js", "b")]);
    }

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("App.js"));
        assert!(is_valid_path("components/Home.jsx"));
        assert!(is_valid_path("public/index.html"));
        assert!(!is_valid_path(""));
        assert!(!is_valid_path("/App.js"));
        assert!(!is_valid_path("src\\App.js"));
        assert!(!is_valid_path("components//Home.jsx"));
        assert!(!is_valid_path("../escape.js"));
        assert!(!is_valid_path("components/"));
    }

    #[test]
    fn test_paths_are_valid_rejects_bad_key() {
        let snapshot: ProjectSnapshot =
            serde_json::from_str(r#"{"/abs.js":{"code":"x"}}"#).unwrap();
        assert!(!snapshot.paths_are_valid());
    }

    // ─── Session Tests ───────────────────────────────────────

    #[test]
    fn test_session_new() {
        let session = Session::new();
        assert!(!session.id.is_empty());
        assert_eq!(session.title, "New Project");
        assert!(session.messages.is_empty());
        assert_eq!(session.files, ProjectSnapshot::placeholder());
        assert!(!session.created_at.is_empty());
        assert_eq!(session.created_at, session.updated_at);
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(Session::new().id, Session::new().id);
    }

    #[test]
    fn test_session_with_initial_prompt() {
        let session = Session::with_initial_prompt("build a todo app");
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[0].content, "build a todo app");
    }

    #[test]
    fn test_session_serialization_roundtrip() {
        let session = Session::with_initial_prompt("hi");
        let json = serde_json::to_string(&session).unwrap();
        let deserialized: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, session.id);
        assert_eq!(deserialized.messages.len(), 1);
        assert_eq!(deserialized.files, session.files);
    }

    #[test]
    fn test_session_summary() {
        let mut session = Session::with_initial_prompt("hi");
        session.messages.push(Message::assistant("hello"));
        let summary = SessionSummary::from(&session);
        assert_eq!(summary.id, session.id);
        assert_eq!(summary.message_count, 2);
        assert_eq!(summary.file_count, session.files.len());
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.llm.provider, LlmProvider::Google);
        assert_eq!(config.llm.model, "gemini-2.5-flash-preview-04-17");
        assert!(config.llm.api_key.is_empty());
        assert!(config.llm.api_base.is_none());
        assert_eq!(config.llm.max_tokens, 65536);
        assert_eq!(config.llm.temperature, 1.0);
        assert_eq!(config.llm.top_p, 0.95);
        assert_eq!(config.llm.top_k, 64);
        assert!(!config.chat_prompt.is_empty());
        assert!(config.codegen_prompt.contains("JSON"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.llm.provider, LlmProvider::Google);
        assert_eq!(deserialized.llm.model, config.llm.model);
    }

    #[test]
    fn test_llm_provider_base_urls() {
        assert_eq!(
            LlmProvider::Google.default_base_url(),
            "https://generativelanguage.googleapis.com"
        );
        assert!(LlmProvider::Custom.default_base_url().is_empty());
    }

    #[test]
    fn test_llm_provider_all_and_labels() {
        let all = LlmProvider::all();
        assert_eq!(all.len(), 2);
        assert_eq!(LlmProvider::Google.label(), "Google");
        assert_eq!(LlmProvider::Custom.label(), "Custom");
    }

    #[test]
    fn test_storage_backend_default() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackendType::Auto);
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_session_event_serialization() {
        let event = SessionEvent::TurnStart { turn_id: 1 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("TurnStart"));
    }

    #[test]
    fn test_snapshot_replaced_event_roundtrip() {
        let event = SessionEvent::SnapshotReplaced {
            file_count: 3,
            fallback: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: SessionEvent = serde_json::from_str(&json).unwrap();
        if let SessionEvent::SnapshotReplaced { file_count, fallback } = deserialized {
            assert_eq!(file_count, 3);
            assert!(fallback);
        } else {
            panic!("Wrong variant");
        }
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(
            WeaverError::Chat("rate limit".to_string()).to_string(),
            "Chat service error: rate limit"
        );
        assert_eq!(
            WeaverError::Codegen("bad payload".to_string()).to_string(),
            "Generation service error: bad payload"
        );
        assert_eq!(
            WeaverError::Storage("quota".to_string()).to_string(),
            "Storage error: quota"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: WeaverError = serde_err.into();
        assert!(matches!(err, WeaverError::Serialization(_)));
    }

    #[test]
    fn test_error_clone() {
        let err = WeaverError::Network("timeout".to_string());
        assert_eq!(err.to_string(), err.clone().to_string());
    }
}
