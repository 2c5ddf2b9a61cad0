// src/runner.rs
//
// Orchestration shared by GUI and CLI: fetch both tiers (sequentially,
// through the memo cache), then derive an Estimate from the typed tables.
// A fetch failure means no estimate: callers show the error, never a
// stale or zero figure.

use crate::cache::{FetchKey, PriceCache};
use crate::config::options::{EstimateOptions, GpuSeries, Tier};
use crate::cost::{self, NodeSplit};
use crate::data::{self, Constraints, JoinedRow, PriceTable};
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::progress::Progress;
use crate::scrape;

/// Derived numbers for the current parameters. Recomputed on every
/// parameter change; never persisted.
#[derive(Clone, Debug)]
pub struct Estimate {
    pub region: String,
    /// Side-by-side comparison rows, cheapest low-priority SKU first.
    pub joined: Vec<JoinedRow>,
    pub best: JoinedRow,
    pub split: NodeSplit,
    pub total_nodes: u32,
    pub target_iterations: u64,
    /// One simulator, wall-clock seconds to the iteration target.
    pub single_node_secs: f64,
    /// The whole fleet, wall-clock seconds to the iteration target.
    pub fleet_secs: f64,
    pub cost_per_hour: f64,
    pub total_cost: f64,
    pub cost_per_iteration: f64,
    /// The site's price-refresh note, if the page carried one.
    pub updated: Option<String>,
}

pub const SUMMARY_HEADERS: &[&str] = &[
    "Region",
    "Best Region",
    "Price Diff %",
    "SKU",
    "Price (Low Pri)",
    "Price (Dedicated)",
    "Desired VMs",
    "Desired Iterations",
    "Total Cost ($)",
];

impl Estimate {
    /// One-line cost summary in SUMMARY_HEADERS order.
    pub fn summary_row(&self) -> Vec<String> {
        let (best_region, diff) = match &self.best.cheaper {
            Some(c) => (c.region.clone(), c.diff.clone()),
            None => (s!("-"), s!("-")),
        };
        vec![
            self.region.clone(),
            best_region,
            diff,
            self.best.name.clone(),
            format!("{}", self.best.low_pri_price),
            self.best
                .dedicated_price
                .map(|p| format!("{p}"))
                .unwrap_or_default(),
            format!("{}", self.total_nodes),
            format!("{}", self.target_iterations),
            format!("{:.2}", self.total_cost),
        ]
    }

    pub fn comparison_rows(&self) -> Vec<Vec<String>> {
        self.joined.iter().map(|j| j.cells()).collect()
    }
}

/// Fetch the low-priority and dedicated tables for the options' region/OS.
/// Sequential, never parallel; each table comes from the cache when the
/// key has been fetched before in this session.
pub fn load_tables(
    cache: &mut PriceCache,
    opts: &EstimateOptions,
    progress: &mut dyn Progress,
) -> Result<(PriceTable, PriceTable)> {
    progress.begin(2);
    let low = load_one(cache, opts, Tier::LowPriority, progress)?;
    let dedicated = load_one(cache, opts, Tier::Dedicated, progress)?;
    progress.finish();
    Ok((low, dedicated))
}

fn load_one(
    cache: &mut PriceCache,
    opts: &EstimateOptions,
    tier: Tier,
    progress: &mut dyn Progress,
) -> Result<PriceTable> {
    progress.log(&format!(
        "Fetching {} prices for {}",
        tier.label().to_ascii_lowercase(),
        opts.region
    ));

    let key = FetchKey {
        region: opts.region.clone(),
        tier,
        os: opts.host_os,
    };
    let region = opts.region.clone();
    let os = opts.host_os;

    let table = cache
        .get_or_fetch(key, || {
            let page = scrape::fetch_price_page(&region, tier)?;
            normalize(&page, &region, tier, os)
        })?
        .clone();

    progress.item_done(tier.label());
    Ok(table)
}

/// Filter, join and price the fetched pair under the current options.
pub fn estimate(
    opts: &EstimateOptions,
    low: &PriceTable,
    dedicated: &PriceTable,
) -> Result<Estimate> {
    let constraints = Constraints {
        min_cores: opts.min_cores,
        min_memory_gib: opts.min_memory_gib,
        require_positive_price: true,
        gpu: opts.gpu,
    };

    let low_f = low.filtered(&constraints);
    let ded_f = dedicated.filtered(&constraints);

    if low_f.rows.is_empty() && opts.gpu != GpuSeries::None {
        return Err(Error::EmptyResult(format!(
            "no {} VMs available in {}; try westus2, southcentralus, or eastus",
            opts.gpu.label(),
            opts.region
        )));
    }

    let joined = data::join(&low_f, &ded_f);
    let best = data::cheapest_joined(&joined, &opts.region)?.clone();

    let split = cost::split_nodes(opts.total_nodes, opts.low_pri_ratio)?;

    // A missing dedicated price only matters if dedicated nodes are asked for.
    let dedicated_price = match best.dedicated_price {
        Some(p) => p,
        None if split.dedicated == 0 => 0.0,
        None => {
            return Err(Error::Validation(format!(
                "{} has no dedicated price in {}, but {} dedicated nodes were requested",
                best.name, opts.region, split.dedicated
            )))
        }
    };

    let single_node_secs = cost::time_to_target_secs(opts.target_iterations, opts.sim_speed, 1)?;
    let fleet_secs =
        cost::time_to_target_secs(opts.target_iterations, opts.sim_speed, opts.total_nodes)?;

    let hourly = cost::cost_per_hour(
        best.low_pri_price,
        dedicated_price,
        split.low_pri,
        split.dedicated,
    )?;
    let total_cost = cost::experiment_cost(hourly, fleet_secs)?;
    let cost_per_iteration = cost::cost_per_iteration(total_cost, opts.target_iterations)?;

    logf!(
        "Estimate: region={} sku={} hourly={:.4} total={:.2}",
        opts.region,
        best.name,
        hourly,
        total_cost
    );

    Ok(Estimate {
        region: opts.region.clone(),
        joined,
        best,
        split,
        total_nodes: opts.total_nodes,
        target_iterations: opts.target_iterations,
        single_node_secs,
        fleet_secs,
        cost_per_hour: hourly,
        total_cost,
        cost_per_iteration,
        updated: low.updated.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::HostOs;
    use crate::data::PriceRow;

    fn row(name: &str, price: f64, cores: u32, mem: f64) -> PriceRow {
        PriceRow {
            name: s!(name),
            cores,
            memory_gib: mem,
            price,
            region: s!("eastus"),
            cheaper: None,
        }
    }

    fn table(tier: Tier, rows: Vec<PriceRow>) -> PriceTable {
        PriceTable {
            region: s!("eastus"),
            tier,
            os: HostOs::Linux,
            updated: Some(s!("Prices last updated today")),
            rows,
        }
    }

    fn opts() -> EstimateOptions {
        EstimateOptions {
            min_cores: 2,
            min_memory_gib: 1.0,
            sim_speed: 100.0,
            target_iterations: 360_000,
            total_nodes: 50,
            low_pri_ratio: 0.2,
            ..EstimateOptions::default()
        }
    }

    #[test]
    fn estimate_from_joined_pair() {
        let low = table(
            Tier::LowPriority,
            vec![row("A", 0.50, 2, 4.0), row("B", 0.30, 4, 8.0)],
        );
        let ded = table(Tier::Dedicated, vec![row("B", 1.20, 4, 8.0)]);

        let est = estimate(&opts(), &low, &ded).unwrap();

        // Sorted: B is cheapest, keeps its dedicated price; A has none.
        assert_eq!(est.best.name, "B");
        assert_eq!(est.best.dedicated_price, Some(1.20));
        assert_eq!(est.joined.len(), 2);
        assert_eq!(est.joined[1].name, "A");
        assert_eq!(est.joined[1].dedicated_price, None);

        // 50 nodes at ratio 0.2 → 10 low-pri, 40 dedicated.
        assert_eq!(est.split, NodeSplit { low_pri: 10, dedicated: 40 });
        assert!((est.cost_per_hour - (0.30 * 10.0 + 1.20 * 40.0)).abs() < 1e-9);

        // 360k iterations at 100 it/s: 3600 s alone, 72 s across 50 nodes.
        assert_eq!(est.single_node_secs, 3600.0);
        assert_eq!(est.fleet_secs, 72.0);

        let expected_total = est.cost_per_hour * 72.0 / 3600.0;
        assert!((est.total_cost - expected_total).abs() < 1e-9);
        assert_eq!(est.updated.as_deref(), Some("Prices last updated today"));
    }

    #[test]
    fn no_sku_meets_constraints() {
        let low = table(Tier::LowPriority, vec![row("A", 0.50, 2, 4.0)]);
        let ded = table(Tier::Dedicated, Vec::new());
        let mut o = opts();
        o.min_cores = 64;
        assert!(matches!(
            estimate(&o, &low, &ded),
            Err(Error::EmptyResult(_))
        ));
    }

    #[test]
    fn gpu_filter_empty_suggests_regions() {
        let low = table(Tier::LowPriority, vec![row("Standard_D2", 0.10, 2, 8.0)]);
        let ded = table(Tier::Dedicated, Vec::new());
        let mut o = opts();
        o.gpu = GpuSeries::Nc;
        let err = estimate(&o, &low, &ded).unwrap_err();
        assert!(matches!(&err, Error::EmptyResult(msg) if msg.contains("NC-series")));
    }

    #[test]
    fn missing_dedicated_price_with_dedicated_nodes_is_validation() {
        let low = table(Tier::LowPriority, vec![row("B", 0.30, 4, 8.0)]);
        let ded = table(Tier::Dedicated, Vec::new());
        let err = estimate(&opts(), &low, &ded).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn all_low_pri_fleet_tolerates_missing_dedicated_price() {
        let low = table(Tier::LowPriority, vec![row("B", 0.30, 4, 8.0)]);
        let ded = table(Tier::Dedicated, Vec::new());
        let mut o = opts();
        o.low_pri_ratio = 1.0;
        let est = estimate(&o, &low, &ded).unwrap();
        assert_eq!(est.split.dedicated, 0);
        assert!((est.cost_per_hour - 0.30 * 50.0).abs() < 1e-9);
    }

    #[test]
    fn summary_row_shape() {
        let low = table(Tier::LowPriority, vec![row("B", 0.30, 4, 8.0)]);
        let ded = table(Tier::Dedicated, vec![row("B", 1.20, 4, 8.0)]);
        let est = estimate(&opts(), &low, &ded).unwrap();
        let row = est.summary_row();
        assert_eq!(row.len(), SUMMARY_HEADERS.len());
        assert_eq!(row[3], "B");
        assert_eq!(row[4], "0.3");
        assert_eq!(row[5], "1.2");
    }
}
