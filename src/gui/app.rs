// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
};

use eframe::egui;

use crate::{
    cache::{FetchKey, PriceCache},
    config::{options::Tier, state::AppState},
    data::PriceTable,
    runner::{self, Estimate},
};

use super::{components, progress::GuiProgress};

pub fn run(mut options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let state = AppState::default();
    options.viewport = options.viewport.clone().with_inner_size(egui::vec2(
        state.gui.window_w as f32,
        state.gui.window_h as f32,
    ));

    eframe::run_native(
        "Azure Experiment Cost Estimator",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(state)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // session memo of normalized tables, keyed (region, tier, OS)
    pub cache: PriceCache,

    // the fetched pair for the current region/OS, low-priority first
    pub tables: Option<(PriceTable, PriceTable)>,

    // derived from tables + options; None until a successful fetch
    pub estimate: Option<Estimate>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // status line (progress sink writes here)
    pub status: Arc<Mutex<String>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let out_path_text = state.options.export.out_path().to_string_lossy().into_owned();

        logf!(
            "Init: region={} os={}",
            state.options.estimate.region,
            state.options.estimate.host_os.name()
        );

        Self {
            state,
            cache: PriceCache::new(),
            tables: None,
            estimate: None,
            out_path_text,
            out_path_dirty: false,
            status: Arc::new(Mutex::new(s!("Idle. Press FETCH to load prices."))),
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap() = msg.into();
    }

    /// Blocking fetch of both tiers for the current region/OS, through the
    /// session cache. One user interaction, at most one network round per
    /// tier, strictly sequential.
    pub fn fetch(&mut self) {
        let opts = self.state.options.estimate.clone();
        logf!("Fetch: Begin region={} os={}", opts.region, opts.host_os.name());

        let mut prog = GuiProgress::new(self.status.clone());

        match runner::load_tables(&mut self.cache, &opts, &mut prog) {
            Ok(pair) => {
                logf!(
                    "Fetch: OK region={} rows low={} dedicated={}",
                    opts.region,
                    pair.0.rows.len(),
                    pair.1.rows.len()
                );
                self.tables = Some(pair);
                self.recompute();
            }
            Err(e) => {
                loge!("Fetch: Error region={}: {}", opts.region, e);
                // No estimate over stale data after a failed fetch.
                self.tables = None;
                self.estimate = None;
                self.status(format!("Error: {e}"));
            }
        }
    }

    /// Re-derive the estimate from the in-memory tables. Cheap; runs on
    /// every parameter change.
    pub fn recompute(&mut self) {
        let Some((low, dedicated)) = &self.tables else {
            self.estimate = None;
            return;
        };
        match runner::estimate(&self.state.options.estimate, low, dedicated) {
            Ok(est) => {
                self.estimate = Some(est);
                self.status("Ready");
            }
            Err(e) => {
                loge!("Estimate: {}", e);
                self.estimate = None;
                self.status(format!("Error: {e}"));
            }
        }
    }

    /// Region or OS changed: reuse session-cached tables when both tiers
    /// are present, otherwise wait for an explicit FETCH.
    pub fn on_source_changed(&mut self) {
        let opts = &self.state.options.estimate;
        let low_key = FetchKey {
            region: opts.region.clone(),
            tier: Tier::LowPriority,
            os: opts.host_os,
        };
        let ded_key = FetchKey {
            region: opts.region.clone(),
            tier: Tier::Dedicated,
            os: opts.host_os,
        };

        match (self.cache.get(&low_key), self.cache.get(&ded_key)) {
            (Some(low), Some(ded)) => {
                logd!("Source change: cache hit for {}", low_key.region);
                self.tables = Some((low.clone(), ded.clone()));
                self.recompute();
            }
            _ => {
                self.tables = None;
                self.estimate = None;
                let region = self.state.options.estimate.region.clone();
                self.status(format!("Press FETCH to load {} prices", region));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("parameters")
            .resizable(false)
            .show(ctx, |ui| {
                components::sidebar::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::summary::draw(ui, self);

            ui.separator();

            components::export_bar::draw(ui, self);

            ui.separator();

            components::price_table::draw(ui, self);
        });
    }
}
