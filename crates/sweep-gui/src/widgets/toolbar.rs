/// Top bar: name filter, selection and Trash controls, theme toggle.
use crate::state::ReviewState;
use egui::Ui;

/// Id of the filter box, so keyboard shortcuts can focus it.
pub const FILTER_ID: &str = "review_filter";

pub fn toolbar(ui: &mut Ui, state: &mut ReviewState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("Sweep")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        ui.label("Search:");
        let filter = ui.add(
            egui::TextEdit::singleline(&mut state.filter)
                .id(egui::Id::new(FILTER_ID))
                .hint_text("Filter files by name...")
                .desired_width(260.0),
        );
        if state.focus_filter {
            filter.request_focus();
            state.focus_filter = false;
        }
        if filter.changed() {
            state.on_filter_changed();
        }

        ui.separator();

        if ui.button("Select All").clicked() {
            state.select_all_visible();
        }
        let has_selection = state.selected_count() > 0;
        if ui
            .add_enabled(has_selection, egui::Button::new("Clear Selection"))
            .clicked()
        {
            state.clear_selection();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_label = if state.dark_mode { "\u{2600}" } else { "\u{1f319}" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }

            ui.separator();

            if ui
                .add_enabled(
                    has_selection,
                    egui::Button::new("\u{1f5d1} Move to Trash").min_size(egui::vec2(120.0, 26.0)),
                )
                .on_hover_text("Move the selected files to the Trash (Delete)")
                .clicked()
            {
                state.request_trash();
            }
        });
    });
}
