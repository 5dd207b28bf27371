//! `window.localStorage` backend.
//!
//! Persistent across page reloads. Values must be UTF-8; every payload
//! Weaver persists is a JSON document, so the restriction never bites.

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use weaver_core::ports::StoragePort;
use weaver_types::{Result, WeaverError};

pub struct LocalStorage {
    store: web_sys::Storage,
}

impl LocalStorage {
    /// Open `window.localStorage`. Fails when the browser denies access
    /// (private mode, storage-sandboxed frame).
    pub fn open() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| WeaverError::Storage("no window".to_string()))?;
        let store = window
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| WeaverError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { store })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.store.get_item(key).map_err(js_err)?;
        Ok(value.map(String::into_bytes))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| WeaverError::Storage(format!("non-UTF-8 value for {}: {}", key, e)))?;
        self.store.set_item(key, text).map_err(js_err)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.remove_item(key).map_err(js_err)
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let len = self.store.length().map_err(js_err)?;
        for i in 0..len {
            if let Some(key) = self.store.key(i).map_err(js_err)? {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}

fn js_err(e: JsValue) -> WeaverError {
    WeaverError::JsInterop(format!("{:?}", e))
}
