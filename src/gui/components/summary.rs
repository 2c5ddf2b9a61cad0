// src/gui/components/summary.rs
//
// Headline figures derived from the current estimate.

use eframe::egui::{self, RichText};

use crate::cost::{format_duration, thousands_int, usd};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &App) {
    ui.heading("Estimated cost per experiment");

    let Some(est) = &app.estimate else {
        ui.label("No price data. Press FETCH to load the current prices.");
        return;
    };

    ui.label(format!(
        "To reach {} iterations, a single simulator needs {}.",
        thousands_int(est.target_iterations),
        format_duration(est.single_node_secs)
    ));
    ui.label(format!(
        "With {} running simulators ({} low-priority, {} dedicated), time to target is {}.",
        est.total_nodes,
        est.split.low_pri,
        est.split.dedicated,
        format_duration(est.fleet_secs)
    ));

    ui.separator();

    let dedicated = est
        .best
        .dedicated_price
        .map(|p| usd(p))
        .unwrap_or_else(|| s!("n/a"));
    ui.label(
        RichText::new(format!(
            "Best SKU in {}: {} at {}/h low-priority, {}/h dedicated",
            est.region, est.best.name, usd(est.best.low_pri_price), dedicated
        ))
        .strong(),
    );
    if let Some(c) = &est.best.cheaper {
        ui.label(format!("Cost would be {} lower in {}.", c.diff, c.region));
    }

    ui.label(
        RichText::new(format!(
            "Cost per hour: {}    Total cost projection: {}    Per iteration: ${:.6}",
            usd(est.cost_per_hour),
            usd(est.total_cost),
            est.cost_per_iteration
        ))
        .strong(),
    );

    if let Some(note) = &est.updated {
        ui.weak(note.as_str());
    }
}
