use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::data::source::FileSource;
use crate::state::{AppState, FILTER_DIMENSIONS};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let table = match &state.table {
        Some(table) => table.clone(),
        None => {
            ui.label("No data loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in FILTER_DIMENSIONS {
                let all_values = table.distinct(dim);

                let selected = state.selection.entry(dim).or_default();
                let header_text = format!(
                    "Select {dim}:  ({}/{})",
                    selected.len(),
                    all_values.len()
                );

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.column_name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        // Re-borrow after potential mutation from All/None
                        let selected = state.selection.entry(dim).or_default();

                        for value in all_values {
                            let mut text = RichText::new(value);
                            match dim {
                                Dimension::Region => {
                                    text = text.color(state.region_colors.color_for(value));
                                }
                                Dimension::Category => {
                                    text = text.color(state.category_colors.color_for(value));
                                }
                                _ => {}
                            }

                            let mut checked = selected.contains(value);
                            if ui.checkbox(&mut checked, text).changed() {
                                if checked {
                                    selected.insert(value.clone());
                                } else {
                                    selected.remove(value);
                                }
                                changed = true;
                            }
                        }
                    });
                ui.add_space(6.0);
            }
        });

    if changed {
        log::debug!("Selection changed: {:?}", state.selection);
        state.refilter();
    }
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

        if let Some(table) = &state.table {
            let visible = state.view.as_ref().map(|v| v.table.len()).unwrap_or(0);
            ui.label(format!("{} records loaded, {visible} selected", table.len()));
            ui.separator();
            ui.label(RichText::new(state.cache.describe()).weak());
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
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.set_source(Box::new(FileSource::new(path)));
    }
}
