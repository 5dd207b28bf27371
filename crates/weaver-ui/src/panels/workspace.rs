//! Workspace panel — file list and read-only code view of the current
//! generated project.

use egui::{self, RichText, ScrollArea};
use crate::state::UiState;
use crate::theme::*;

const FILE_LIST_WIDTH: f32 = 180.0;

/// Render the workspace panel showing the current snapshot.
pub fn workspace_panel(ui: &mut egui::Ui, state: &mut UiState) {
    egui::Frame::default()
        .fill(CODE_BG)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Workspace")
                        .color(TEXT_PRIMARY)
                        .strong()
                        .monospace(),
                );
                ui.label(
                    RichText::new(format!("({} files)", state.files.len()))
                        .color(TEXT_SECONDARY)
                        .small()
                        .monospace(),
                );
                if state.snapshot_is_fallback {
                    ui.label(
                        RichText::new("placeholder")
                            .color(WARNING)
                            .small()
                            .italics(),
                    );
                }
            });

            ui.separator();

            ui.horizontal_top(|ui| {
                // File list
                ui.vertical(|ui| {
                    ui.set_width(FILE_LIST_WIDTH);
                    ScrollArea::vertical()
                        .id_salt("workspace_files")
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            let paths: Vec<String> =
                                state.files.paths().map(String::from).collect();
                            if paths.is_empty() {
                                ui.label(
                                    RichText::new("No files yet")
                                        .color(TEXT_SECONDARY)
                                        .italics()
                                        .small(),
                                );
                            }
                            for path in paths {
                                let selected =
                                    state.selected_file.as_deref() == Some(path.as_str());
                                if ui
                                    .selectable_label(
                                        selected,
                                        RichText::new(&path).monospace().small(),
                                    )
                                    .clicked()
                                {
                                    state.selected_file = Some(path);
                                }
                            }
                        });
                });

                ui.separator();

                // Code view
                ui.vertical(|ui| {
                    ScrollArea::both()
                        .id_salt("workspace_code")
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            let code = state
                                .selected_file
                                .as_deref()
                                .and_then(|path| state.files.get(path))
                                .map(|file| file.code.as_str())
                                .unwrap_or("Select a file to view its code.");
                            ui.label(RichText::new(code).color(CODE_FG).monospace());
                        });
                });
            });
        });
}
