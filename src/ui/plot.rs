use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::FrequencyTable;
use crate::data::export::{export_columns, export_row};
use crate::data::model::CleanedTable;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render every chart and the sample table for the current selection.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(visible) = &state.visible else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a metadata file to explore it  (File → Open…)");
        });
        return;
    };

    let (from, to) = state.filters.year_range;
    ui.heading(format!(
        "Showing {} papers ({from}–{to}, journal: {})",
        visible.len(),
        state.filters.journal.label()
    ));
    ui.add_space(8.0);

    let summary = &state.summary;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols| {
                cols[0].strong("Publications Over Time");
                publications_over_time(&mut cols[0], &summary.by_year);

                cols[1].strong(format!("Top {} Journals", state.config.top_journals));
                ranking_chart(
                    &mut cols[1],
                    "top_journals",
                    &summary.top_journals,
                    &state.journal_colors,
                );
            });

            ui.separator();
            ui.strong("Word Frequency in Titles");
            match &summary.top_words {
                Some(words) => {
                    ranking_chart(ui, "top_words", words, &ranking_colors(words));
                }
                None => {
                    ui.label("No title data available for analysis.");
                }
            }

            if let Some(sources) = &summary.top_sources {
                ui.separator();
                ui.strong(format!("Top {} Sources", state.config.top_sources));
                ranking_chart(ui, "top_sources", sources, &ranking_colors(sources));
            }

            ui.separator();
            ui.strong("Sample Data");
            sample_table(ui, visible, state.config.sample_rows);
        });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Line chart of paper counts per year.
fn publications_over_time(ui: &mut Ui, by_year: &[(i32, usize)]) {
    if by_year.is_empty() {
        no_data(ui);
        return;
    }
    let series: Vec<[f64; 2]> = by_year
        .iter()
        .map(|&(year, count)| [year as f64, count as f64])
        .collect();

    Plot::new("publications_over_time")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series))
                    .color(Color32::LIGHT_BLUE)
                    .radius(4.0),
            );
        });
}

/// Horizontal bar chart, most frequent entry on top.
fn ranking_chart(ui: &mut Ui, id: &str, ranking: &FrequencyTable, colors: &ColorMap) {
    if ranking.is_empty() {
        no_data(ui);
        return;
    }
    let n = ranking.len();
    let bars: Vec<Bar> = ranking
        .entries()
        .iter()
        .enumerate()
        .map(|(rank, (label, count))| {
            Bar::new((n - rank) as f64, *count as f64)
                .name(label)
                .fill(colors.color_for(label))
        })
        .collect();

    // Axis labels: bar position → category label.
    let labels: Vec<String> = ranking.entries().iter().map(|(l, _)| l.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label("Count")
        .y_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 1e-6 || pos < 1.0 || pos > n as f64 {
                return String::new();
            }
            labels[n - pos as usize].clone()
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.7));
        });
}

/// One colour per entry, in rank order.
fn ranking_colors(ranking: &FrequencyTable) -> ColorMap {
    let labels: Vec<&str> = ranking.entries().iter().map(|(l, _)| l.as_str()).collect();
    ColorMap::new(&labels)
}

fn no_data(ui: &mut Ui) {
    ui.label(RichText::new("No data for the current selection.").italics());
}

// ---------------------------------------------------------------------------
// Sample table
// ---------------------------------------------------------------------------

fn sample_table(ui: &mut Ui, visible: &CleanedTable, rows: usize) {
    if visible.is_empty() {
        no_data(ui);
        return;
    }
    let headers = export_columns(visible);
    let shown = visible.len().min(rows);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .column(Column::initial(320.0).clip(true))
        .column(Column::initial(200.0).clip(true))
        .column(Column::initial(160.0).clip(true))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in &headers {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for row in 0..shown {
                let values = export_row(visible, row);
                body.row(18.0, |mut table_row| {
                    for value in &values {
                        table_row.col(|ui| {
                            ui.label(value);
                        });
                    }
                });
            }
        });
}
