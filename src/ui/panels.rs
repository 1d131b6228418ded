use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::SimulationType;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – experiment set and η checkboxes
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Polarization").color(Color32::from_rgb(0x22, 0x8a, 0x8d)));
    });
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Experiments set (mode) ----
    ui.strong("Experiments set:");
    egui::ComboBox::from_id_salt("experiment_set")
        .selected_text(state.mode.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for mode in SimulationType::ALL {
                if ui
                    .selectable_label(state.mode == mode, mode.to_string())
                    .clicked()
                {
                    state.set_mode(mode);
                }
            }
        });
    ui.separator();

    // ---- η selection ----
    ui.strong("Choose η values");

    let limit = state.selection.options().limit;
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .small_button("Default")
            .on_hover_text(format!("First {limit} options"))
            .clicked()
        {
            state.select_default();
        }
        if ui.small_button("None").on_hover_text("None").clicked() {
            state.select_none();
        }
    });

    let has_baseline = state
        .dataset
        .as_ref()
        .is_some_and(|ds| ds.has_baseline(state.mode));
    let eligible = state.selection.eligible().to_vec();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if has_baseline {
                // The baseline is always shown; its checkbox is disabled.
                let mut checked = true;
                ui.add_enabled(false, egui::Checkbox::new(&mut checked, "Vanilla"));
            }

            for eta in eligible {
                let mut text = RichText::new(eta.to_string());
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(eta));
                }

                let mut checked = state.selection.is_selected(eta);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_eta(eta);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} experiments loaded, {} visible",
                ds.len(),
                state.visible_rows().len()
            ));
            if state.dropped_rows > 0 {
                ui.label(
                    RichText::new(format!("{} rows dropped", state.dropped_rows))
                        .color(Color32::YELLOW),
                );
            }
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open combined experiments CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}
