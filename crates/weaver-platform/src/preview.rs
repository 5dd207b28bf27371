//! Sandbox preview bridge.
//!
//! The generated project renders inside a sandbox iframe hosting the
//! in-browser bundler. The bridge posts the full file set on every mount
//! and the sandbox replaces its previous project wholesale; bundler
//! internals stay on the other side of the boundary.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;

use weaver_core::ports::PreviewPort;
use weaver_types::{project::ProjectSnapshot, Result, WeaverError};

const MOUNT_MESSAGE_TYPE: &str = "weaver:mount";
const FRAME_POLL_MS: u32 = 50;
const FRAME_POLL_ATTEMPTS: u32 = 40;

pub struct SandboxPreview {
    frame_id: String,
}

impl SandboxPreview {
    pub fn new(frame_id: impl Into<String>) -> Self {
        Self {
            frame_id: frame_id.into(),
        }
    }

    fn frame(&self) -> Option<web_sys::HtmlIFrameElement> {
        gloo_utils::document()
            .get_element_by_id(&self.frame_id)?
            .dyn_into::<web_sys::HtmlIFrameElement>()
            .ok()
    }

    /// Wait for the iframe to appear in the DOM; the app shell inserts it
    /// asynchronously on first render.
    async fn wait_for_frame(&self) -> Result<web_sys::HtmlIFrameElement> {
        for _ in 0..FRAME_POLL_ATTEMPTS {
            if let Some(frame) = self.frame() {
                return Ok(frame);
            }
            TimeoutFuture::new(FRAME_POLL_MS).await;
        }
        Err(WeaverError::Preview(format!(
            "sandbox frame '{}' not found",
            self.frame_id
        )))
    }
}

#[async_trait(?Send)]
impl PreviewPort for SandboxPreview {
    async fn mount(&self, snapshot: &ProjectSnapshot) -> Result<()> {
        let frame = self.wait_for_frame().await?;
        let target = frame
            .content_window()
            .ok_or_else(|| WeaverError::Preview("sandbox frame has no window".to_string()))?;

        let payload = serde_json::json!({
            "type": MOUNT_MESSAGE_TYPE,
            "files": snapshot,
        });
        let message = js_sys::JSON::parse(&payload.to_string())
            .map_err(|e| WeaverError::JsInterop(format!("{:?}", e)))?;

        target
            .post_message(&message, "*")
            .map_err(|e| WeaverError::Preview(format!("{:?}", e)))?;

        log::info!("Mounted {} files into the sandbox", snapshot.len());
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.frame().is_some()
    }
}
