// src/gui/components/price_table.rs
//
// Draws the side-by-side comparison table. Purely a view over the
// current estimate's joined rows.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::data::COMPARISON_HEADERS;
use crate::gui::app::App;

const WIDTHS: [f32; 6] = [180.0, 110.0, 110.0, 60.0, 100.0, 170.0];
const NUMERIC: [bool; 6] = [false, true, true, true, true, false];

pub fn draw(ui: &mut egui::Ui, app: &App) {
    let Some(est) = &app.estimate else {
        return;
    };

    // Reserve space for the bars instead of floating them over content.
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        s.foreground_color = true;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    let avail_h = ui.available_height();
    egui::ScrollArea::new([true, false])
        .id_salt("comparison_hscroll")
        .min_scrolled_height(avail_h)
        .max_height(avail_h)
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .min_scrolled_height(0.0);
            for w in WIDTHS {
                table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
            }

            table
                .header(24.0, |mut header| {
                    for (ci, name) in COMPARISON_HEADERS.iter().enumerate() {
                        header.col(|ui| {
                            ui.scope(|ui| {
                                ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                                let label =
                                    egui::Label::new(RichText::new(*name).strong()).selectable(false);
                                if NUMERIC[ci] {
                                    ui.centered_and_justified(|ui| { ui.add(label); });
                                } else {
                                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                                        ui.add(label);
                                    });
                                }
                            });
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, est.joined.len(), |mut row| {
                        let cells = est.joined[row.index()].cells();
                        for (ci, cell) in cells.iter().enumerate() {
                            row.col(|ui| {
                                ui.scope(|ui| {
                                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                                    if NUMERIC[ci] {
                                        ui.centered_and_justified(|ui| { ui.label(cell.as_str()); });
                                    } else {
                                        ui.with_layout(
                                            Layout::left_to_right(Align::Center),
                                            |ui| { ui.label(cell.as_str()); },
                                        );
                                    }
                                });
                            });
                        }
                    });
                });
        });
}
