// src/data.rs
//
// Typed price data and the filter/join operations over it.
//
// A PriceTable is immutable once produced: filtering returns a new table,
// joining returns JoinedRows. The cheapest row is index 0 after the price
// sort; asking for it on an empty table is an EmptyResult error, never an
// index panic.

use crate::config::options::{GpuSeries, HostOs, Tier};
use crate::error::{Error, Result};

/// "This SKU is cheaper elsewhere" annotation, e.g. "westus2 / 13.9%".
#[derive(Clone, Debug, PartialEq)]
pub struct CheaperRegion {
    pub region: String,
    /// Percentage difference as the site displays it, e.g. "13.9%".
    pub diff: String,
}

impl CheaperRegion {
    pub fn parse(cell: &str) -> Option<Self> {
        let (region, diff) = cell.split_once(" / ")?;
        let region = region.trim();
        let diff = diff.trim();
        if region.is_empty() || diff.is_empty() {
            return None;
        }
        Some(Self { region: s!(region), diff: s!(diff) })
    }

    pub fn display(&self) -> String {
        format!("{} / {}", self.region, self.diff)
    }
}

/// One VM SKU observation.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceRow {
    pub name: String,
    pub cores: u32,
    pub memory_gib: f64,
    /// Price per hour for the table's OS. Zero means "unavailable".
    pub price: f64,
    pub region: String,
    pub cheaper: Option<CheaperRegion>,
}

/// All SKUs for one (region, tier, OS). No duplicate SKU names.
#[derive(Clone, Debug)]
pub struct PriceTable {
    pub region: String,
    pub tier: Tier,
    pub os: HostOs,
    /// The site's "prices updated ..." note, when the page carried one.
    pub updated: Option<String>,
    pub rows: Vec<PriceRow>,
}

/// Row predicates for the cost pipeline.
#[derive(Clone, Debug)]
pub struct Constraints {
    pub min_cores: u32,
    pub min_memory_gib: f64,
    pub require_positive_price: bool,
    pub gpu: GpuSeries,
}

impl Constraints {
    pub fn admits(&self, row: &PriceRow) -> bool {
        row.cores >= self.min_cores
            && row.memory_gib >= self.min_memory_gib
            && (!self.require_positive_price || row.price > 0.0)
            && self.gpu.matches(&row.name)
    }
}

impl PriceTable {
    /// Rows satisfying all constraints, sorted ascending by price.
    /// The sort is stable: equal prices keep their original order.
    pub fn filtered(&self, c: &Constraints) -> PriceTable {
        let mut rows: Vec<PriceRow> =
            self.rows.iter().filter(|r| c.admits(r)).cloned().collect();
        rows.sort_by(|a, b| a.price.total_cmp(&b.price));
        PriceTable {
            region: self.region.clone(),
            tier: self.tier,
            os: self.os,
            updated: self.updated.clone(),
            rows,
        }
    }

    /// Cheapest row of a filtered (price-sorted) table.
    pub fn cheapest(&self) -> Result<&PriceRow> {
        self.rows.first().ok_or_else(|| no_match(&self.region))
    }
}

fn no_match(region: &str) -> Error {
    Error::EmptyResult(format!("no SKU meets the constraints in {region}"))
}

/// A low-priority row with the matching dedicated-tier price alongside.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinedRow {
    pub name: String,
    pub low_pri_price: f64,
    /// None when the dedicated table has no SKU of this name.
    pub dedicated_price: Option<f64>,
    pub cores: u32,
    pub memory_gib: f64,
    pub cheaper: Option<CheaperRegion>,
}

pub const COMPARISON_HEADERS: &[&str] = &[
    "VM Name",
    "Price (Low Pri)",
    "Price (Dedicated)",
    "vCPUs",
    "Memory (GiB)",
    "Best price region / Diff",
];

impl JoinedRow {
    /// Cells in COMPARISON_HEADERS order, for table display and export.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format!("{}", self.low_pri_price),
            self.dedicated_price.map(|p| format!("{p}")).unwrap_or_default(),
            format!("{}", self.cores),
            format!("{}", self.memory_gib),
            self.cheaper.as_ref().map(|c| c.display()).unwrap_or_default(),
        ]
    }
}

/// Left join on SKU name: every low-priority row appears exactly once, in
/// the left table's order; the dedicated table contributes only its price.
pub fn join(low_pri: &PriceTable, dedicated: &PriceTable) -> Vec<JoinedRow> {
    low_pri
        .rows
        .iter()
        .map(|row| JoinedRow {
            name: row.name.clone(),
            low_pri_price: row.price,
            dedicated_price: dedicated
                .rows
                .iter()
                .find(|d| d.name == row.name)
                .map(|d| d.price),
            cores: row.cores,
            memory_gib: row.memory_gib,
            cheaper: row.cheaper.clone(),
        })
        .collect()
}

/// First joined row, i.e. the cheapest low-priority SKU after filtering.
pub fn cheapest_joined<'a>(rows: &'a [JoinedRow], region: &str) -> Result<&'a JoinedRow> {
    rows.first().ok_or_else(|| no_match(region))
}
