// src/cli.rs
use std::{env, error::Error};

use crate::cache::PriceCache;
use crate::config::consts::REGIONS;
use crate::config::options::{AppOptions, ExportFormat, ExportScope, GpuSeries, HostOs};
use crate::cost::{format_duration, thousands_int, usd};
use crate::data::COMPARISON_HEADERS;
use crate::file;
use crate::progress::Progress;
use crate::runner::{self, Estimate, SUMMARY_HEADERS};

pub struct Params {
    pub options: AppOptions,
    pub do_export: bool,
    pub list_regions: bool,
}

/// Status lines go to stderr so stdout stays clean for the summary.
struct CliProgress;
impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_cli()?;

    if params.list_regions {
        for r in REGIONS {
            println!("{r}");
        }
        return Ok(());
    }

    let opts = &params.options.estimate;
    let mut cache = PriceCache::new();
    let mut progress = CliProgress;

    let (low, dedicated) = runner::load_tables(&mut cache, opts, &mut progress)?;
    let est = runner::estimate(opts, &low, &dedicated)?;

    print_estimate(&est);

    if params.do_export {
        let export = &params.options.export;
        let (headers, rows) = match export.scope {
            ExportScope::Summary => (owned(SUMMARY_HEADERS), vec![est.summary_row()]),
            ExportScope::Comparison => (owned(COMPARISON_HEADERS), est.comparison_rows()),
        };
        let path = file::write_export(export, Some(headers.as_slice()), &rows)?;
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}

fn owned(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| s!(*h)).collect()
}

fn print_estimate(est: &Estimate) {
    println!(
        "Cheapest SKU in {}: {} ({} cores, {} GiB)",
        est.region, est.best.name, est.best.cores, est.best.memory_gib
    );
    println!(
        "  {}/h low-priority, {}/h dedicated",
        usd(est.best.low_pri_price),
        est.best
            .dedicated_price
            .map(|p| usd(p))
            .unwrap_or_else(|| s!("n/a"))
    );
    if let Some(c) = &est.best.cheaper {
        println!("  {} cheaper in {}", c.diff, c.region);
    }
    println!(
        "Fleet: {} low-priority + {} dedicated nodes",
        est.split.low_pri, est.split.dedicated
    );
    println!(
        "Time to {} iterations: {} alone, {} with {} nodes",
        thousands_int(est.target_iterations),
        format_duration(est.single_node_secs),
        format_duration(est.fleet_secs),
        est.total_nodes
    );
    println!("Cost per hour: {}", usd(est.cost_per_hour));
    println!("Total cost projection: {}", usd(est.total_cost));
    println!("Cost per iteration: ${:.6}", est.cost_per_iteration);
    if let Some(note) = &est.updated {
        println!("Note: {note}");
    }
}

fn parse_cli() -> Result<Params, Box<dyn Error>> {
    let mut params = Params {
        options: AppOptions::default(),
        do_export: false,
        list_regions: false,
    };

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-r" | "--region" => {
                params.options.estimate.region = args.next().ok_or("Missing value for --region")?;}
            "--os" => {
                let v = args.next().ok_or("Missing value for --os")?;
                params.options.estimate.host_os = match v.to_ascii_lowercase().as_str() {
                    "linux" => HostOs::Linux,
                    "windows" => HostOs::Windows,
                    other => return Err(format!("Unknown OS: {}", other).into()),
                };}
            "--gpu" => {
                let v = args.next().ok_or("Missing value for --gpu")?;
                params.options.estimate.gpu = match v.to_ascii_lowercase().as_str() {
                    "none" => GpuSeries::None,
                    "nc" => GpuSeries::Nc,
                    "nv" => GpuSeries::Nv,
                    "either" => GpuSeries::Either,
                    other => return Err(format!("Unknown GPU series: {}", other).into()),
                };}
            "--cores" => {
                params.options.estimate.min_cores =
                    args.next().ok_or("Missing value for --cores")?.parse()?;}
            "--memory" => {
                params.options.estimate.min_memory_gib =
                    args.next().ok_or("Missing value for --memory")?.parse()?;}
            "--sim-speed" => {
                params.options.estimate.sim_speed =
                    args.next().ok_or("Missing value for --sim-speed")?.parse()?;}
            "--iterations" => {
                params.options.estimate.target_iterations =
                    args.next().ok_or("Missing value for --iterations")?.parse()?;}
            "--nodes" => {
                params.options.estimate.total_nodes =
                    args.next().ok_or("Missing value for --nodes")?.parse()?;}
            "--low-pri-ratio" => {
                params.options.estimate.low_pri_ratio =
                    args.next().ok_or("Missing value for --low-pri-ratio")?.parse()?;}
            "-o" | "--out" => {
                let v = args.next().ok_or("Missing output path")?;
                params.options.export.set_path(&v);
                params.do_export = true;}
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.options.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };}
            "--comparison" => params.options.export.scope = ExportScope::Comparison,
            "--no-headers" => params.options.export.include_headers = false,
            "--list-regions" => params.list_regions = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(params)
}
