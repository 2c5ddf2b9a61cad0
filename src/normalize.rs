// src/normalize.rs
//
// Raw page table → typed PriceTable for one (region, tier, OS).
//
// Columns are located by name, case-insensitively, so the HTML and the
// script-embedded layouts normalize the same way. Exactly one price column
// survives: the one matching the requested OS. Zero-price rows are kept;
// zero means "unavailable SKU" here, and dropping unpriced rows is the
// filter's job, not ours.

use std::collections::HashSet;

use crate::config::options::{HostOs, Tier};
use crate::data::{CheaperRegion, PriceRow, PriceTable};
use crate::error::{Error, Result};
use crate::scrape::{PricePage, RawTable};

pub fn normalize(page: &PricePage, region: &str, tier: Tier, os: HostOs) -> Result<PriceTable> {
    let cols = Columns::locate(&page.table, os)?;

    let mut rows = Vec::with_capacity(page.table.rows.len());
    let mut seen: HashSet<String> = HashSet::new();

    for raw in &page.table.rows {
        let name = raw.get(cols.name).map(|s| s.trim()).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        // No duplicate SKU names within a table; first occurrence wins.
        if !seen.insert(name.to_string()) {
            continue;
        }

        let cores = parse_count(raw.get(cols.cores), "core count", name)?;
        let memory_gib = parse_number(raw.get(cols.memory), "memory", name)?;
        let price = parse_price(raw.get(cols.price))?;
        let cheaper = cols
            .cheaper
            .and_then(|ix| raw.get(ix))
            .and_then(|cell| CheaperRegion::parse(cell));

        rows.push(PriceRow {
            name: s!(name),
            cores,
            memory_gib,
            price,
            region: s!(region),
            cheaper,
        });
    }

    Ok(PriceTable {
        region: s!(region),
        tier,
        os,
        updated: page.updated.clone(),
        rows,
    })
}

/* ---------------- column location ---------------- */

struct Columns {
    name: usize,
    cores: usize,
    memory: usize,
    price: usize,
    cheaper: Option<usize>,
}

/// Fold a column name for matching: lowercase, alphanumerics only.
/// "VM Name", "vmName" and "vm_name" all become "vmname".
fn fold(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl Columns {
    fn locate(table: &RawTable, os: HostOs) -> Result<Self> {
        let folded: Vec<String> = table.headers.iter().map(|h| fold(h)).collect();

        let find = |pred: &dyn Fn(&str) -> bool| folded.iter().position(|h| pred(h.as_str()));

        let name = find(&|h| h == "vmname" || h == "name")
            .or_else(|| find(&|h| h.contains("name") && !h.contains("region")))
            .ok_or_else(|| missing("VM name"))?;
        let cores = find(&|h| h.contains("vcpu") || h.contains("core"))
            .ok_or_else(|| missing("core count"))?;
        let memory = find(&|h| h.contains("memory")).ok_or_else(|| missing("memory"))?;

        // The price column for the requested OS; the other OS column is
        // simply never read.
        let wanted = os.name();
        let price = find(&|h| h.contains(wanted) && (h.contains("cost") || h.contains("price")))
            .or_else(|| find(&|h| h.contains(wanted)))
            .ok_or_else(|| missing(wanted))?;

        let cheaper = find(&|h| h.contains("bestpriceregion"))
            .or_else(|| find(&|h| h.contains("region") && h.contains("diff")));

        Ok(Self { name, cores, memory, price, cheaper })
    }
}

fn missing(what: &str) -> Error {
    Error::Retrieval(format!("page table has no {what} column"))
}

/* ---------------- field parsing ---------------- */

fn parse_count(cell: Option<&String>, what: &str, sku: &str) -> Result<u32> {
    let n = parse_number(cell, what, sku)?;
    Ok(n.round() as u32)
}

fn parse_number(cell: Option<&String>, what: &str, sku: &str) -> Result<f64> {
    let text = cell.map(|s| s.trim()).unwrap_or_default();
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Parse(format!("non-numeric {what} {text:?} for {sku}")))
}

/// Price cells: "$0.0496", "0.0496", or blank/placeholder for SKUs the
/// tier doesn't offer. Absent means unavailable, which is price 0.
fn parse_price(cell: Option<&String>) -> Result<f64> {
    let text = cell.map(|s| s.trim()).unwrap_or_default();
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect::<String>()
        .trim()
        .to_string();

    if cleaned.is_empty() || cleaned == "-" {
        return Ok(0.0);
    }
    let lower = cleaned.to_ascii_lowercase();
    if lower == "n/a" || lower == "unavailable" {
        return Ok(0.0);
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Parse(format!("non-numeric price {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::RawTable;

    fn page(headers: &[&str], rows: &[&[&str]]) -> PricePage {
        PricePage {
            table: RawTable {
                headers: headers.iter().map(|h| s!(*h)).collect(),
                rows: rows
                    .iter()
                    .map(|r| r.iter().map(|c| s!(*c)).collect())
                    .collect(),
            },
            updated: None,
        }
    }

    const HEADERS: &[&str] = &[
        "VM Name",
        "vCPUs",
        "Memory (GiB)",
        "Linux Cost",
        "Windows Cost",
        "Best price region / Diff",
    ];

    #[test]
    fn picks_the_requested_os_price() {
        let page = page(
            HEADERS,
            &[&["Standard_B2s", "2", "4", "$0.0496", "$0.0608", "westus2 / 13.9%"]],
        );
        let linux = normalize(&page, "eastus", Tier::LowPriority, HostOs::Linux).unwrap();
        assert_eq!(linux.rows[0].price, 0.0496);

        let windows = normalize(&page, "eastus", Tier::LowPriority, HostOs::Windows).unwrap();
        assert_eq!(windows.rows[0].price, 0.0608);
    }

    #[test]
    fn camel_case_headers_normalize_too() {
        let page = page(
            &["name", "numberOfCores", "memoryGb", "linuxPrice", "windowsPrice"],
            &[&["Standard_D2s_v3", "2", "8.0", "0.1104", "0.2"]],
        );
        let t = normalize(&page, "westus", Tier::Dedicated, HostOs::Linux).unwrap();
        assert_eq!(t.rows[0].cores, 2);
        assert_eq!(t.rows[0].memory_gib, 8.0);
        assert_eq!(t.rows[0].price, 0.1104);
        assert!(t.rows[0].cheaper.is_none());
    }

    #[test]
    fn zero_price_rows_are_retained() {
        let page = page(
            HEADERS,
            &[&["Standard_M128", "128", "2000", "", "$13.50", "x / 1%"]],
        );
        let t = normalize(&page, "eastus", Tier::LowPriority, HostOs::Linux).unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].price, 0.0);
    }

    #[test]
    fn non_numeric_cores_is_parse_error() {
        let page = page(HEADERS, &[&["A", "two", "4", "0.1", "0.2", ""]]);
        let err = normalize(&page, "eastus", Tier::LowPriority, HostOs::Linux).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn duplicate_sku_names_keep_first() {
        let page = page(
            HEADERS,
            &[
                &["A", "2", "4", "0.10", "0.2", ""],
                &["A", "2", "4", "0.99", "0.2", ""],
            ],
        );
        let t = normalize(&page, "eastus", Tier::LowPriority, HostOs::Linux).unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].price, 0.10);
    }

    #[test]
    fn missing_price_column_is_retrieval_error() {
        let page = page(&["VM Name", "vCPUs", "Memory"], &[&["A", "2", "4"]]);
        let err = normalize(&page, "eastus", Tier::LowPriority, HostOs::Linux).unwrap_err();
        assert!(matches!(err, Error::Retrieval(_)));
    }

    #[test]
    fn cheaper_region_annotation_parses() {
        let page = page(
            HEADERS,
            &[&["A", "2", "4", "0.10", "0.2", "westus2 / 13.9%"]],
        );
        let t = normalize(&page, "eastus", Tier::LowPriority, HostOs::Linux).unwrap();
        let cheaper = t.rows[0].cheaper.as_ref().unwrap();
        assert_eq!(cheaper.region, "westus2");
        assert_eq!(cheaper.diff, "13.9%");
    }
}
