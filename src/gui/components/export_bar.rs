// src/gui/components/export_bar.rs

use eframe::egui;

use crate::{
    config::options::{ExportFormat, ExportScope},
    csv,
    data::COMPARISON_HEADERS,
    file,
    gui::app::App,
    runner::SUMMARY_HEADERS,
};

fn owned(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| s!(*h)).collect()
}

/// Headers + rows for the selected export scope, if there is an estimate.
fn export_view(app: &App) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let est = app.estimate.as_ref()?;
    Some(match app.state.options.export.scope {
        ExportScope::Summary => (owned(SUMMARY_HEADERS), vec![est.summary_row()]),
        ExportScope::Comparison => (owned(COMPARISON_HEADERS), est.comparison_rows()),
    })
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    // --- Format + headers toggle + scope ---
    let fmt_changed = {
        let export = &mut app.state.options.export;
        let prev_fmt = export.format;

        ui.horizontal(|ui| {
            ui.label("Format:");
            ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
            ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");

            ui.separator();

            let before_headers = export.include_headers;
            ui.checkbox(&mut export.include_headers, "Include headers");
            if export.include_headers != before_headers {
                logf!("UI: Include_headers -> {}", export.include_headers);
            }

            ui.separator();

            ui.label("Export:");
            ui.selectable_value(&mut export.scope, ExportScope::Summary, "Summary");
            ui.selectable_value(&mut export.scope, ExportScope::Comparison, "Comparison");
        });

        export.format != prev_fmt
    };

    if fmt_changed {
        logf!("UI: Export format -> {:?}", app.state.options.export.format);
        if !app.out_path_dirty {
            app.out_path_text = app
                .state
                .options
                .export
                .out_path()
                .to_string_lossy()
                .into_owned();
        }
    }

    // --- Output field ---
    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) -> {}", app.out_path_text);
        }
    });

    // --- Actions (Copy / Export / FETCH) ---
    ui.horizontal(|ui| {
        // Copy
        if ui.button("Copy").clicked() {
            match export_view(app) {
                Some((headers, rows)) => {
                    let export = &app.state.options.export;
                    let txt = csv::to_export_string(
                        Some(headers.as_slice()),
                        &rows,
                        export.include_headers,
                        export.format.delim(),
                    );
                    logf!("Copy: rows={} scope={:?}", rows.len(), export.scope);
                    ui.ctx().copy_text(txt);
                    app.status("Copied to clipboard");
                }
                None => {
                    logd!("Copy: Clicked, but there's nothing to copy");
                    app.status("Nothing to copy");
                }
            }
        }

        // Export
        if ui.button("Export").clicked() {
            if app.out_path_dirty {
                app.state.options.export.set_path(&app.out_path_text);
                app.out_path_dirty = false;
                logf!(
                    "Export: Out path set -> {}",
                    app.state.options.export.out_path().display()
                );
            }

            match export_view(app) {
                Some((headers, rows)) => {
                    match file::write_export(&app.state.options.export, Some(headers.as_slice()), &rows) {
                        Ok(path) => {
                            logf!("Export: OK -> {}", path.display());
                            app.status(format!("Exported {}", path.display()));
                        }
                        Err(e) => {
                            loge!("Export: Error: {}", e);
                            app.status(format!("Export error: {e}"));
                        }
                    }
                }
                None => {
                    logd!("Export: Clicked, but there's nothing to export");
                    app.status("Nothing to export");
                }
            }
        }

        // FETCH
        let red = egui::Color32::from_rgb(220, 30, 30);
        let black = egui::Color32::BLACK;
        if ui
            .add(
                egui::Button::new(egui::RichText::new("FETCH").color(black).strong())
                    .fill(red),
            )
            .clicked()
        {
            app.fetch();
        }

        let status = app.status.lock().unwrap().clone();
        ui.label(format!("Status: {status}"));
    });
}
