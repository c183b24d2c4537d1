use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::JournalFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Year range ----
    ui.strong("Select year range");
    let (min_year, max_year) = state.year_bounds;
    let (mut from, mut to) = state.filters.year_range;
    ui.add(egui::Slider::new(&mut from, min_year..=max_year).text("from"));
    ui.add(egui::Slider::new(&mut to, min_year..=max_year).text("to"));
    state.set_year_range(from, to);
    ui.separator();

    // ---- Journal selector ----
    ui.strong("Filter by journal");
    let current = state.filters.journal.clone();
    let mut chosen: Option<JournalFilter> = None;
    egui::ComboBox::from_id_salt("journal_filter")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == JournalFilter::All, "All")
                .clicked()
            {
                chosen = Some(JournalFilter::All);
            }
            for journal in &state.journal_options {
                let is_selected = matches!(&current, JournalFilter::Only(j) if j == journal);
                let text = RichText::new(journal).color(state.journal_colors.color_for(journal));
                if ui.selectable_label(is_selected, text).clicked() {
                    chosen = Some(JournalFilter::Only(journal.clone()));
                }
            }
        });
    if let Some(journal) = chosen {
        state.set_journal(journal);
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
            if ui
                .add_enabled(state.source_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(state.visible.is_some(), egui::Button::new("Export filtered…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} papers loaded, {} visible",
                ds.len(),
                state.visible_len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open paper metadata")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name("metadata_filtered.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_visible(&path) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
