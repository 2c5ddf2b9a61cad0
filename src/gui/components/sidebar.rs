// src/gui/components/sidebar.rs
//
// Left panel: every input the estimate depends on. Region/OS changes may
// need a new fetch; everything else just recomputes from memory.

use eframe::egui;

use crate::config::consts::*;
use crate::config::options::{GpuSeries, HostOs};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Parameters");
    ui.separator();

    let mut source_changed = false;
    let mut params_changed = false;

    {
        let est = &mut app.state.options.estimate;

        egui::ComboBox::from_label("Region")
            .selected_text(est.region.clone())
            .show_ui(ui, |ui| {
                for r in REGIONS {
                    if ui.selectable_value(&mut est.region, s!(*r), *r).changed() {
                        source_changed = true;
                    }
                }
            });

        let os_before = est.host_os;
        egui::ComboBox::from_label("Host OS")
            .selected_text(est.host_os.name())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut est.host_os, HostOs::Linux, "linux");
                ui.selectable_value(&mut est.host_os, HostOs::Windows, "windows");
            });
        source_changed |= est.host_os != os_before;

        ui.separator();

        params_changed |= ui
            .add(
                egui::Slider::new(&mut est.min_cores, MIN_CORES..=MAX_CORES)
                    .text("Cores per simulator"),
            )
            .changed();

        params_changed |= ui
            .add(
                egui::Slider::new(&mut est.min_memory_gib, MIN_MEMORY_GIB..=MAX_MEMORY_GIB)
                    .step_by(0.5)
                    .text("Memory per container (GiB)"),
            )
            .changed();

        let gpu_before = est.gpu;
        egui::ComboBox::from_label("GPU series")
            .selected_text(est.gpu.label())
            .show_ui(ui, |ui| {
                for g in [GpuSeries::None, GpuSeries::Nc, GpuSeries::Nv, GpuSeries::Either] {
                    ui.selectable_value(&mut est.gpu, g, g.label());
                }
            });
        params_changed |= est.gpu != gpu_before;

        ui.separator();

        params_changed |= ui
            .add(
                egui::Slider::new(&mut est.sim_speed, 0.001..=MAX_SIM_SPEED)
                    .logarithmic(true)
                    .text("Sim speed (it/s)"),
            )
            .changed();

        params_changed |= ui
            .add(
                egui::DragValue::new(&mut est.target_iterations)
                    .range(MIN_ITERATIONS..=MAX_ITERATIONS)
                    .speed(1000)
                    .prefix("iterations: "),
            )
            .changed();

        params_changed |= ui
            .add(
                egui::Slider::new(&mut est.total_nodes, MIN_NODES..=MAX_NODES)
                    .text("Training nodes"),
            )
            .changed();

        params_changed |= ui
            .add(
                egui::Slider::new(&mut est.low_pri_ratio, 0.0..=1.0)
                    .text("Low-priority ratio"),
            )
            .changed();
    }

    if source_changed {
        logd!("UI: region/OS changed");
        app.on_source_changed();
    } else if params_changed {
        app.recompute();
    }
}
