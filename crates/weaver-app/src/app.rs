//! Main egui application — composes the panels and drives the session.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use weaver_core::event_bus::EventBus;
use weaver_core::orchestrator::{SessionOrchestrator, TurnOutcome};
use weaver_core::ports::{PreviewPort, StoragePort};
use weaver_platform::llm::GeminiClient;
use weaver_platform::preview::SandboxPreview;
use weaver_platform::storage::{auto_detect_storage, LocalStorage, MemoryStorage};
use weaver_types::config::{AppConfig, StorageBackendType};
use weaver_types::project::ProjectSnapshot;
use weaver_types::session::Session;
use weaver_ui::panels::settings::{SaveFeedback, SettingsAction};
use weaver_ui::panels::{chat, settings, workspace};
use weaver_ui::state::UiState;
use weaver_ui::theme;

const CONFIG_STORAGE_KEY: &str = "weaver:config";
const PREVIEW_FRAME_ID: &str = "weaver_preview";

/// The main application state
pub struct WeaverApp {
    ui_state: UiState,
    config: AppConfig,
    event_bus: EventBus,
    orchestrator: Rc<RefCell<SessionOrchestrator>>,
    llm: Rc<GeminiClient>,
    preview: Rc<dyn PreviewPort>,
    storage: Rc<dyn StoragePort>,
    /// Filled by the snapshot subscription; drained by the frame loop
    pending_mount: Rc<RefCell<Option<ProjectSnapshot>>>,
    /// Filled by the async config restore; applied by the frame loop
    restored_config: Rc<RefCell<Option<AppConfig>>>,
    save_feedback: Option<SaveFeedback>,
    /// Prompt the landing page seeded into the session, consumed on the
    /// first frame with echoing suppressed
    initial_prompt: Option<String>,
    first_frame: bool,
}

impl WeaverApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::default();
        let event_bus = EventBus::new();

        let initial_prompt = initial_prompt_from_url();
        let session = match &initial_prompt {
            Some(prompt) => Session::with_initial_prompt(prompt.clone()),
            None => Session::new(),
        };
        let orchestrator =
            SessionOrchestrator::hydrate(session, event_bus.clone());

        // The snapshot cell notifies synchronously on every replacement;
        // the slot carries the new file set to the frame loop, which
        // re-mounts the sandbox.
        let pending_mount: Rc<RefCell<Option<ProjectSnapshot>>> =
            Rc::new(RefCell::new(None));
        {
            let slot = pending_mount.clone();
            orchestrator.snapshot.subscribe(move |snapshot| {
                *slot.borrow_mut() = Some(snapshot.clone());
            });
        }

        let llm = Rc::new(GeminiClient::new(&config));
        let preview: Rc<dyn PreviewPort> = Rc::new(SandboxPreview::new(PREVIEW_FRAME_ID));
        let storage = open_storage(&config);

        let restored_config: Rc<RefCell<Option<AppConfig>>> = Rc::new(RefCell::new(None));
        Self::restore_config(storage.clone(), restored_config.clone());

        Self {
            ui_state: UiState::new(),
            config,
            event_bus,
            orchestrator: Rc::new(RefCell::new(orchestrator)),
            llm,
            preview,
            storage,
            pending_mount,
            restored_config,
            save_feedback: None,
            initial_prompt,
            first_frame: true,
        }
    }

    /// Restore config from storage (async; applied on a later frame)
    fn restore_config(storage: Rc<dyn StoragePort>, slot: Rc<RefCell<Option<AppConfig>>>) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(Some(data)) = storage.get(CONFIG_STORAGE_KEY).await {
                if let Ok(config) = serde_json::from_slice::<AppConfig>(&data) {
                    *slot.borrow_mut() = Some(config);
                    log::info!("Config restored from storage");
                }
            }
        });
    }

    /// Save config to storage (async, fire-and-forget)
    fn save_config(&mut self) {
        match serde_json::to_vec(&self.config) {
            Ok(json) => {
                let storage = self.storage.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match storage.set(CONFIG_STORAGE_KEY, &json).await {
                        Ok(()) => log::info!("Config saved to storage"),
                        Err(e) => log::warn!("Failed to save config: {}", e),
                    }
                });
                self.save_feedback = Some(SaveFeedback {
                    message: "Saved".to_string(),
                    success: true,
                });
            }
            Err(e) => {
                self.save_feedback = Some(SaveFeedback {
                    message: format!("Save failed: {}", e),
                    success: false,
                });
            }
        }
    }

    fn rebuild_llm(&mut self) {
        self.llm = Rc::new(GeminiClient::new(&self.config));
    }

    /// Dispatch a user turn to the orchestrator (async)
    fn dispatch_turn(&self, text: String, seeded: bool, ctx: &egui::Context) {
        let orchestrator = self.orchestrator.clone();
        let llm = self.llm.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            // try_borrow_mut doubles as the busy guard: a running turn
            // holds the borrow across its await points, so a send arriving
            // meanwhile is dropped instead of starting a second cycle.
            let outcome = match orchestrator.try_borrow_mut() {
                Ok(mut orch) => {
                    orch.run_turn(&text, seeded, llm.as_ref(), llm.as_ref())
                        .await
                }
                Err(_) => {
                    log::warn!("Turn ignored: session is busy");
                    return;
                }
            };
            if outcome == TurnOutcome::Busy {
                log::warn!("Turn ignored: a reply is already pending");
            }
            ctx.request_repaint();
        });
    }

    /// Re-mount the sandbox with a freshly replaced snapshot (async)
    fn dispatch_mount(&self, snapshot: ProjectSnapshot, ctx: &egui::Context) {
        let preview = self.preview.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = preview.mount(&snapshot).await {
                log::warn!("Preview mount failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    /// Pull a pending snapshot into the workspace view and the sandbox
    fn sync_snapshot(&mut self, ctx: &egui::Context) {
        if let Some(snapshot) = self.pending_mount.borrow_mut().take() {
            self.ui_state.apply_snapshot(snapshot.clone());
            self.dispatch_mount(snapshot, ctx);
        }
    }

    fn start_new_session(&mut self, ctx: &egui::Context) {
        let reset_ok = match self.orchestrator.try_borrow_mut() {
            Ok(mut orch) => {
                orch.reset();
                true
            }
            Err(_) => {
                log::warn!("Cannot reset while a turn is in flight");
                false
            }
        };
        if reset_ok {
            self.ui_state.messages.clear();
            self.ui_state.status_text = "Ready".to_string();
            self.sync_snapshot(ctx);
        }
    }
}

impl eframe::App for WeaverApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);

            // Show the placeholder project until the first generation lands
            let initial = self.orchestrator.borrow().snapshot.current();
            self.ui_state.apply_snapshot(initial.clone());
            self.dispatch_mount(initial, ctx);

            // A session created from the landing page already carries the
            // prompt in its log; run the first turn with echoing suppressed.
            if let Some(prompt) = self.initial_prompt.take() {
                self.ui_state.push_user_message(&prompt);
                self.dispatch_turn(prompt, true, ctx);
            }

            self.first_frame = false;
        }

        // Apply a config restored from storage
        let restored = self.restored_config.borrow_mut().take();
        if let Some(config) = restored {
            self.config = config;
            self.rebuild_llm();
        }

        // Drain events from the orchestrator
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.snapshot_dirty {
            self.sync_snapshot(ctx);
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        let mut new_session_requested = false;

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Weaver")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "Provider: {} | Model: {}",
                        self.config.llm.provider.label(),
                        self.config.llm.model
                    ))
                    .color(theme::TEXT_SECONDARY)
                    .small(),
                );
                if !self.preview.is_ready() {
                    ui.label(
                        RichText::new("preview offline")
                            .color(theme::WARNING)
                            .small(),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                    if ui.small_button("New Session").clicked() {
                        new_session_requested = true;
                    }
                });
            });
        });

        if new_session_requested {
            self.start_new_session(ctx);
        }

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    match settings::settings_panel(
                        ui,
                        &mut self.config,
                        self.save_feedback.as_ref(),
                    ) {
                        SettingsAction::Changed => {
                            self.rebuild_llm();
                            self.save_feedback = None;
                        }
                        SettingsAction::SaveClicked => {
                            self.rebuild_llm();
                            self.save_config();
                        }
                        SettingsAction::None => {}
                    }
                });
        }

        // ── Chat sidebar ─────────────────────────────────────
        SidePanel::left("chat_panel")
            .min_width(320.0)
            .default_width(380.0)
            .show(ctx, |ui| {
                if let Some(user_msg) = chat::chat_panel(ui, &mut self.ui_state) {
                    self.dispatch_turn(user_msg, false, ctx);
                }
            });

        // ── Workspace (generated project) ────────────────────
        CentralPanel::default().show(ctx, |ui| {
            workspace::workspace_panel(ui, &mut self.ui_state);
        });
    }
}

/// Pick the storage backend the config asks for
fn open_storage(config: &AppConfig) -> Rc<dyn StoragePort> {
    match config.storage.backend {
        StorageBackendType::Memory => Rc::new(MemoryStorage::new()),
        StorageBackendType::LocalStorage => match LocalStorage::open() {
            Ok(local) => Rc::new(local),
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
                Rc::new(MemoryStorage::new())
            }
        },
        StorageBackendType::Auto => auto_detect_storage(),
    }
}

/// The landing page hands the first prompt over as a query parameter
fn initial_prompt_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params
        .get("prompt")
        .filter(|prompt| !prompt.trim().is_empty())
}
