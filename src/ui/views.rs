use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::charts::ChartKind;
use crate::data::model::Dataset;
use crate::data::stats;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Central panel – tabbed views
// ---------------------------------------------------------------------------

/// Rows per page of the Raw Data table.
pub const RAW_PAGE_SIZE: usize = 100;

/// Render the tab strip and the active view.
pub fn central(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for (tab, label) in [
            (Tab::Overview, "Overview"),
            (Tab::Charts, "Charts"),
            (Tab::RawData, "Raw Data"),
        ] {
            if ui.selectable_label(state.tab == tab, label).clicked() {
                state.tab = tab;
            }
        }
    });
    ui.separator();

    if state.view.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Pick a region, or File → Open CSV…");
        });
        return;
    }

    match state.tab {
        Tab::Overview => overview(ui, state),
        Tab::Charts => charts(ui, state),
        Tab::RawData => raw_data(ui, state),
    }
}

// ---------------------------------------------------------------------------
// Overview tab
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!(
                "{} rows × {} columns in the selected range",
                view.len(),
                view.columns.len()
            ));
            if let Some((first, last)) = state.bounds {
                ui.label(format!(
                    "Data range: {} to {}",
                    first.format("%Y-%m-%d %H:%M"),
                    last.format("%Y-%m-%d %H:%M")
                ));
            }
            ui.add_space(8.0);

            ui.strong("Column summary");
            describe_table(ui, view);

            if state.show_missing {
                ui.add_space(8.0);
                ui.strong("Missing values in the raw file");
                missing_table(ui, &state.raw_missing);
            }

            if let Some(report) = &state.clean_report {
                if !report.dropped_columns.is_empty() {
                    ui.add_space(8.0);
                    ui.label(format!(
                        "Dropped empty columns: {}",
                        report.dropped_columns.join(", ")
                    ));
                }
            }
        });
}

fn describe_table(ui: &mut Ui, view: &Dataset) {
    let summaries: Vec<(String, stats::ColumnSummary)> = view
        .columns
        .iter()
        .filter_map(|c| stats::describe(c).ok().map(|s| (c.name.clone(), s)))
        .collect();
    if summaries.is_empty() {
        ui.label("No numeric columns to summarize.");
        return;
    }

    let headers = [
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
    ];
    ui.push_id("describe_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto().at_least(90.0))
            .columns(TableColumn::remainder(), headers.len() - 1)
            .header(20.0, |mut header| {
                for title in headers {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                body.rows(18.0, summaries.len(), |mut row| {
                    let (name, s) = &summaries[row.index()];
                    row.col(|ui| {
                        ui.label(name);
                    });
                    row.col(|ui| {
                        ui.label(s.count.to_string());
                    });
                    for v in [s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max] {
                        row.col(|ui| {
                            ui.label(format!("{v:.2}"));
                        });
                    }
                });
            });
    });
}

fn missing_table(ui: &mut Ui, missing: &[(String, usize)]) {
    ui.push_id("missing_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto().at_least(90.0))
            .column(TableColumn::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("column");
                });
                header.col(|ui| {
                    ui.strong("missing");
                });
            })
            .body(|mut body| {
                body.rows(18.0, missing.len(), |mut row| {
                    let (name, count) = &missing[row.index()];
                    row.col(|ui| {
                        ui.label(name);
                    });
                    row.col(|ui| {
                        ui.label(count.to_string());
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Charts tab
// ---------------------------------------------------------------------------

fn charts(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for kind in ChartKind::ALL {
            if ui
                .selectable_label(state.active_chart == Some(kind), kind.label())
                .clicked()
            {
                state.select_chart(kind);
            }
        }
    });
    ui.separator();

    match &state.prepared {
        Some(prepared) => prepared.show(ui),
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Pick a chart above.");
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Raw Data tab
// ---------------------------------------------------------------------------

fn raw_data(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = &state.view else {
        return;
    };
    let n_rows = view.len();
    let pages = n_rows.div_ceil(RAW_PAGE_SIZE).max(1);
    let page = state.raw_page.min(pages - 1);
    let start = page * RAW_PAGE_SIZE;
    let end = (start + RAW_PAGE_SIZE).min(n_rows);

    let mut new_page = page;
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Prev").clicked() && new_page > 0 {
            new_page -= 1;
        }
        if ui.button("Next").clicked() && new_page + 1 < pages {
            new_page += 1;
        }
        if n_rows == 0 {
            ui.label("no rows in range");
        } else {
            ui.label(format!("rows {} to {end} of {n_rows}", start + 1));
        }
    });
    ui.separator();

    let names = view.column_names();
    ui.push_id("raw_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(TableColumn::auto().at_least(70.0), names.len())
            .header(20.0, |mut header| {
                for name in &names {
                    header.col(|ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|mut body| {
                body.rows(18.0, end - start, |mut row| {
                    let r = start + row.index();
                    for column in &view.columns {
                        row.col(|ui| {
                            ui.label(column.data.value(r).to_string());
                        });
                    }
                });
            });
    });

    state.raw_page = new_page;
}
