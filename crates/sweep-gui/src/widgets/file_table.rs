/// The sortable, multi-select file table.
///
/// Rendering only: the table reports what the user did as a
/// [`TableAction`] and the app applies it to [`ReviewState`].
use crate::state::{ReviewState, SelectMode, SortColumn};
use crate::theme::category_color;
use egui::{Align, Layout, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};
use sweep_core::model::size::format_size;

/// What happened in the table this frame. Row indices point into
/// [`ReviewState::rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Sort(SortColumn),
    Click(usize, SelectMode),
    Open(usize),
    Reveal(usize),
    CopyPath(usize),
    Trash(usize),
}

const DATE_FORMAT: &str = "%b %d, %Y, %I:%M %p";

/// Draw the table. Returns at most one action per frame.
pub fn file_table(ui: &mut Ui, state: &ReviewState) -> Option<TableAction> {
    let visible = state.visible();
    let modifiers = ui.input(|i| i.modifiers);
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
    let mut action = None;

    if visible.is_empty() {
        ui.centered_and_justified(|ui| {
            let text = if state.rows().is_empty() {
                "No files to review"
            } else {
                "No files match the filter"
            };
            ui.label(RichText::new(text).italics().color(ui.visuals().weak_text_color()));
        });
        return None;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .sense(Sense::click())
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::initial(260.0).at_least(120.0).clip(true))
        .column(Column::initial(90.0).at_least(70.0))
        .column(Column::initial(100.0).at_least(80.0))
        .column(Column::initial(180.0).at_least(120.0))
        .column(Column::remainder().at_least(160.0).clip(true))
        .header(22.0, |mut header| {
            for column in SortColumn::ALL {
                header.col(|ui| {
                    let arrow = match (state.sort_column() == column, state.sort_ascending()) {
                        (true, true) => " \u{25b2}",
                        (true, false) => " \u{25bc}",
                        (false, _) => "",
                    };
                    let label = RichText::new(format!("{}{arrow}", column.label())).strong();
                    if ui.add(egui::Button::new(label).frame(false)).clicked() {
                        action = Some(TableAction::Sort(column));
                    }
                });
            }
        })
        .body(|body| {
            body.rows(row_height, visible.len(), |mut row| {
                let index = visible[row.index()];
                let entry = &state.rows()[index];
                row.set_selected(state.is_selected(&entry.path));

                row.col(|ui| {
                    ui.label(entry.name());
                });
                row.col(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format_size(entry.size));
                    });
                });
                row.col(|ui| {
                    ui.label(
                        RichText::new(entry.category.label())
                            .color(category_color(entry.category, ui.visuals().dark_mode)),
                    );
                });
                row.col(|ui| {
                    ui.label(entry.modified.format(DATE_FORMAT).to_string());
                });
                row.col(|ui| {
                    ui.label(RichText::new(entry.path.display().to_string()).weak());
                });

                let response = row.response();
                if response.double_clicked() {
                    action = Some(TableAction::Open(index));
                } else if response.clicked() {
                    let mode = SelectMode::from_modifiers(modifiers.command, modifiers.shift);
                    action = Some(TableAction::Click(index, mode));
                } else if response.secondary_clicked() && !state.is_selected(&entry.path) {
                    action = Some(TableAction::Click(index, SelectMode::Replace));
                }

                response.context_menu(|ui| {
                    if ui.button("Open").clicked() {
                        action = Some(TableAction::Open(index));
                        ui.close_menu();
                    }
                    if ui.button(reveal_label()).clicked() {
                        action = Some(TableAction::Reveal(index));
                        ui.close_menu();
                    }
                    if ui.button("Copy Path").clicked() {
                        action = Some(TableAction::CopyPath(index));
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Move to Trash").clicked() {
                        action = Some(TableAction::Trash(index));
                        ui.close_menu();
                    }
                });
            });
        });

    action
}

fn reveal_label() -> &'static str {
    if cfg!(target_os = "macos") {
        "Show in Finder"
    } else if cfg!(target_os = "windows") {
        "Show in Explorer"
    } else {
        "Open Containing Folder"
    }
}
