/// Bottom status bar: counts, sizes, and the last action's feedback.
use crate::state::ReviewState;
use crate::theme::{SUCCESS, WARNING};
use egui::{RichText, Ui};
use sweep_core::model::size::{format_count, format_size};

pub fn status_bar(ui: &mut Ui, state: &ReviewState) {
    let color_normal = ui.visuals().text_color();
    let color_accent = ui.visuals().hyperlink_color;

    ui.horizontal(|ui| {
        ui.label(RichText::new(state.count_text()).size(12.0).color(color_normal));
        ui.separator();
        ui.label(
            RichText::new(format_size(state.visible_size()))
                .size(12.0)
                .color(color_accent),
        );

        let selected = state.selected_count();
        if selected > 0 {
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "{} selected ({})",
                    format_count(selected as u64),
                    format_size(state.selected_size())
                ))
                .size(12.0)
                .color(color_normal),
            );
        }

        if let Some(message) = &state.message {
            ui.separator();
            let color = if message.is_error { WARNING } else { SUCCESS };
            ui.label(RichText::new(&message.text).size(12.0).color(color));
        }
    });
}
