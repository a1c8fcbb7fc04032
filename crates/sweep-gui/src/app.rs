/// Main `eframe::App` for the review window.
///
/// Lays out the toolbar, the file table and the status bar, applies
/// keyboard shortcuts, and owns the Trash confirmation dialog.
use crate::platform;
use crate::state::{ReviewState, SelectMode};
use crate::widgets;
use crate::widgets::file_table::TableAction;
use egui::{Key, Modifiers};
use sweep_core::FileEntry;

/// The review application.
pub struct ReviewApp {
    state: ReviewState,
}

impl ReviewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: ReviewState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::W)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::F)) {
            self.state.focus_filter = true;
        }

        // Plain keys belong to the filter box while it has focus.
        if ctx.wants_keyboard_input() || self.state.confirm_trash {
            return;
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::A)) {
            self.state.select_all_visible();
        }
        let delete = ctx.input_mut(|i| {
            i.consume_key(Modifiers::NONE, Key::Delete)
                || i.consume_key(Modifiers::COMMAND, Key::Backspace)
        });
        if delete {
            self.state.request_trash();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Escape)) {
            self.state.clear_selection();
        }
    }

    fn handle_table_action(&mut self, ctx: &egui::Context, action: TableAction) {
        let path_of = |state: &ReviewState, index: usize| state.rows().get(index).map(|e| e.path.clone());
        match action {
            TableAction::Sort(column) => self.state.sort_by(column),
            TableAction::Click(index, mode) => self.state.click(index, mode),
            TableAction::Open(index) => {
                if let Some(path) = path_of(&self.state, index) {
                    if let Err(e) = platform::open_path(&path) {
                        tracing::warn!("Could not open {}: {e}", path.display());
                    }
                }
            }
            TableAction::Reveal(index) => {
                if let Some(path) = path_of(&self.state, index) {
                    if let Err(e) = platform::reveal_path(&path) {
                        tracing::warn!("Could not reveal {}: {e}", path.display());
                    }
                }
            }
            TableAction::CopyPath(index) => {
                if let Some(path) = path_of(&self.state, index) {
                    ctx.copy_text(path.display().to_string());
                }
            }
            TableAction::Trash(index) => {
                if let Some(path) = path_of(&self.state, index) {
                    if !self.state.is_selected(&path) {
                        self.state.click(index, SelectMode::Replace);
                    }
                    self.state.request_trash();
                }
            }
        }
    }

    fn confirm_dialog(&mut self, ctx: &egui::Context) {
        if !self.state.confirm_trash {
            return;
        }
        let prompt = self.state.confirm_prompt();
        let mut open = true;
        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Confirm Move to Trash")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([360.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(prompt);
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Move to Trash").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
                ui.add_space(4.0);
            });

        if confirmed {
            self.state.trash_selected();
        } else if cancelled || !open {
            self.state.confirm_trash = false;
        }
    }
}

impl eframe::App for ReviewApp {
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| widgets::file_table::file_table(ui, &self.state))
            .inner;
        if let Some(action) = action {
            self.handle_table_action(ctx, action);
        }

        self.confirm_dialog(ctx);
    }
}

/// Open the review window over `entries` and block until it is closed.
pub fn run_review(entries: Vec<FileEntry>) -> anyhow::Result<()> {
    tracing::info!("Opening review window with {} files", entries.len());
    let state = ReviewState::new(entries);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sweep - File Review")
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sweep",
        options,
        Box::new(|cc| Ok(Box::new(ReviewApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
