//! Google Gemini adapter.
//!
//! Speaks the `models/{model}:generateContent` REST API and implements
//! both remote ports: the same client handles the free-text chat call
//! (`text/plain`) and the project-generation call (`application/json`).
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use weaver_core::ports::{ChatPort, CodegenPort};
use weaver_types::{
    config::AppConfig,
    message::{Message, Role},
    project::ProjectSnapshot,
    Result, WeaverError,
};

pub struct GeminiClient {
    chat_prompt: String,
    codegen_prompt: String,
    model: String,
    api_key: String,
    base_url: String,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_tokens: u32,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        let llm = &config.llm;
        let base_url = llm
            .api_base
            .clone()
            .unwrap_or_else(|| llm.provider.default_base_url().to_string());
        Self {
            chat_prompt: config.chat_prompt.clone(),
            codegen_prompt: config.codegen_prompt.clone(),
            model: llm.model.clone(),
            api_key: llm.api_key.clone(),
            base_url,
            temperature: llm.temperature,
            top_p: llm.top_p,
            top_k: llm.top_k,
            max_tokens: llm.max_tokens,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request_body(
        &self,
        system_prompt: &str,
        history: &[Message],
        question: &str,
        response_mime_type: &str,
    ) -> Value {
        // The orchestrator hands over the full log, which for the chat call
        // ends with the user message being asked. That trailing entry IS the
        // question; keep it out of the history so it reaches the wire once.
        let history = match history.last() {
            Some(last) if last.role == Role::User && last.content == question => {
                &history[..history.len() - 1]
            }
            _ => history,
        };

        let mut contents: Vec<Value> = history.iter().map(message_to_content).collect();
        contents.push(json!({ "role": "user", "parts": [{ "text": question }] }));

        json!({
            "system_instruction": { "parts": [{ "text": system_prompt }] },
            "contents": contents,
            "generationConfig": {
                "temperature": self.temperature,
                "topP": self.top_p,
                "topK": self.top_k,
                "maxOutputTokens": self.max_tokens,
                "responseMimeType": response_mime_type,
            },
        })
    }

    async fn generate(&self, body: &Value, err: fn(String) -> WeaverError) -> Result<String> {
        let response = Request::post(&self.endpoint())
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| WeaverError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| WeaverError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(err(format!("HTTP {}: {}", status, text)));
        }

        let data: ApiResponse = response.json().await.map_err(|e| err(e.to_string()))?;

        let candidate = data
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| err("No candidates in response".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(err("Empty candidate text".to_string()));
        }
        Ok(text)
    }
}

#[async_trait(?Send)]
impl ChatPort for GeminiClient {
    async fn send_message(&self, history: &[Message], question: &str) -> Result<String> {
        let body = self.build_request_body(&self.chat_prompt, history, question, "text/plain");
        self.generate(&body, WeaverError::Chat).await
    }
}

#[async_trait(?Send)]
impl CodegenPort for GeminiClient {
    async fn generate_project(
        &self,
        history: &[Message],
        instruction: &str,
        current: &ProjectSnapshot,
    ) -> Result<String> {
        // The current file set rides along as instruction context so the
        // model regenerates a coherent whole rather than a diff.
        let question = if current.is_empty() {
            instruction.to_string()
        } else {
            let files = serde_json::to_string(current)?;
            format!("{}\nCurrent code state: {}", instruction, files)
        };

        let body =
            self.build_request_body(&self.codegen_prompt, history, &question, "application/json");
        self.generate(&body, WeaverError::Codegen).await
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
}

#[derive(Deserialize)]
struct ApiCandidate {
    content: ApiContent,
}

#[derive(Deserialize)]
struct ApiContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Deserialize)]
struct ApiPart {
    #[serde(default)]
    text: Option<String>,
}

// ─── Serialization helpers ───────────────────────────────────

fn message_to_content(msg: &Message) -> Value {
    // The wire protocol calls the assistant side "model"
    let role = match msg.role {
        Role::User => "user",
        Role::Assistant => "model",
    };
    json!({ "role": role, "parts": [{ "text": msg.content }] })
}
