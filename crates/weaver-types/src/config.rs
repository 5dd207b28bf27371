use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    pub chat_prompt: String,
    pub codegen_prompt: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            storage: StorageConfig::default(),
            chat_prompt: CHAT_PROMPT.to_string(),
            codegen_prompt: CODEGEN_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Google,
            model: "gemini-2.5-flash-preview-04-17".to_string(),
            api_key: String::new(),
            api_base: None,
            max_tokens: 65536,
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    Google,
    Custom,
}

impl LlmProvider {
    pub fn default_base_url(&self) -> &str {
        match self {
            LlmProvider::Google => "https://generativelanguage.googleapis.com",
            LlmProvider::Custom => "",
        }
    }

    pub fn all() -> &'static [LlmProvider] {
        &[LlmProvider::Google, LlmProvider::Custom]
    }

    pub fn label(&self) -> &str {
        match self {
            LlmProvider::Google => "Google",
            LlmProvider::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Auto-detect best available backend
    Auto,
    Memory,
    LocalStorage,
}

const CHAT_PROMPT: &str = r#"You are an AI assistant with deep experience in React development.
GUIDELINES:
- Tell the user what you are building
- Keep the response under 15 lines
- Skip code examples and commentary
"#;

const CODEGEN_PROMPT: &str = r#"You are a code generation assistant.
When asked to generate or update a React project, respond ONLY with a valid JSON object. Do not include commentary, markdown, or any extra text. The response MUST start with '{' and end with '}'.
Each key of the object is a filename with its full relative path and extension (e.g. "App.js", "components/Home.jsx", "public/index.html"). Each value is an object with a "code" property containing the file's source as a string.
Always include ALL files needed for a working project:
- public/index.html
- index.js (entry point, at the root, must import App from './App.js')
- App.js (main component, at the root)
All React code files must live at the root; only the public/ and components/ folders are allowed at the top level. If you create a component, import and use it in App.js. All imports must use correct relative paths from the file's own folder.
Escape all special characters in the code strings so the whole response is valid JSON. Never create duplicate files with the same name in different folders.
"#;
