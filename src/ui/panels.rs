use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::schema;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – data source and range controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Solar Radiation");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Region selector ----
            ui.strong("Region");
            let selected_text = state
                .selected_region
                .map(|i| schema::REGIONS[i].label)
                .unwrap_or("choose…");
            egui::ComboBox::from_id_salt("region")
                .selected_text(selected_text)
                .show_ui(ui, |ui: &mut Ui| {
                    for (idx, region) in schema::REGIONS.iter().enumerate() {
                        if ui
                            .selectable_label(state.selected_region == Some(idx), region.label)
                            .clicked()
                        {
                            state.load_region(idx);
                        }
                    }
                });
            ui.label(RichText::new("or File → Open CSV…").weak());
            ui.separator();

            let Some(ds_rows) = state.cleaned.as_ref().map(|ds| ds.len()) else {
                ui.label("No dataset loaded.");
                return;
            };

            // ---- Time range ----
            if state.bounds.is_some() {
                ui.strong("Date range");
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("from");
                    if ui
                        .add(DatePickerButton::new(&mut state.range_from).id_salt("range_from"))
                        .changed()
                    {
                        state.apply_time_range();
                    }
                });
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("to");
                    if ui
                        .add(DatePickerButton::new(&mut state.range_to).id_salt("range_to"))
                        .changed()
                    {
                        state.apply_time_range();
                    }
                });
                ui.separator();
            }

            // ---- Display options ----
            ui.checkbox(&mut state.show_missing, "Show missing values");
            ui.separator();

            // ---- Session summary ----
            let view_rows = state.view.as_ref().map(|v| v.len()).unwrap_or(0);
            ui.label(format!("{ds_rows} rows cleaned"));
            ui.label(format!("{view_rows} rows in range"));
            if let Some(report) = &state.clean_report {
                if !report.dropped_columns.is_empty() {
                    ui.label(format!(
                        "{} empty columns dropped",
                        report.dropped_columns.len()
                    ));
                }
                if report.filled_cells > 0 {
                    ui.label(format!("{} cells mean-filled", report.filled_cells));
                }
            }
            if state.outliers_removed > 0 {
                ui.label(format!("{} outlier rows removed", state.outliers_removed));
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
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(label) = &state.source_label {
            let rows = state.view.as_ref().map(|v| v.len()).unwrap_or(0);
            ui.label(format!("{label}: {rows} rows in view"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open measurement CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        state.load_path(&path, label);
    }
}
