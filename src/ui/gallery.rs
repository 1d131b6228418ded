use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// Connector glyph colour, matching the original viewer's accent.
const ARROW_COLOR: Color32 = Color32::from_rgb(0x1f, 0x98, 0x8b);

// ---------------------------------------------------------------------------
// Experiment gallery (central panel)
// ---------------------------------------------------------------------------

/// Render the figure gallery for the current mode's visible rows.
pub fn experiment_gallery(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV to view experiments  (File → Open…)");
        });
        return;
    }

    let visible = state.visible_rows();
    if visible.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No η values selected.");
        });
        return;
    }

    let last = visible.len() - 1;

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for (i, row) in visible.iter().enumerate() {
                    let caption = row.eta.caption();
                    let figure = row.figure_path(&state.figures_base);
                    let uri = format!("file://{}", figure.display());

                    ui.vertical(|ui: &mut Ui| {
                        ui.add(
                            egui::Image::new(uri)
                                .max_height(320.0)
                                .maintain_aspect_ratio(true),
                        )
                        .on_hover_text(&caption);

                        let mut text = RichText::new(&caption);
                        if let Some(cm) = &state.color_map {
                            text = text.color(cm.color_for(row.eta));
                        }
                        ui.label(text);
                    });

                    // Trailing connector between consecutive items, none
                    // after the last.
                    if i != last {
                        ui.label(
                            RichText::new("→")
                                .size(32.0)
                                .strong()
                                .color(ARROW_COLOR),
                        );
                    }
                }
            });
        });
}
