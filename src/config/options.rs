// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use super::consts::*;

/// Pricing category. The site exposes these via the `tier` query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    LowPriority,
    Dedicated,
}

impl Tier {
    pub fn query_value(&self) -> &'static str {
        match self {
            Tier::LowPriority => "low",
            Tier::Dedicated => "standard",
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Tier::LowPriority => "Low priority",
            Tier::Dedicated => "Dedicated",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostOs {
    Linux,
    Windows,
}

impl HostOs {
    pub fn name(&self) -> &'static str {
        match self {
            HostOs::Linux => "linux",
            HostOs::Windows => "windows",
        }
    }
    pub fn other(&self) -> HostOs {
        match self {
            HostOs::Linux => HostOs::Windows,
            HostOs::Windows => HostOs::Linux,
        }
    }
}

/// GPU SKU families are recognizable by name prefix (NC-series, NV-series).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpuSeries {
    None,
    Nc,
    Nv,
    Either,
}

impl GpuSeries {
    pub fn label(&self) -> &'static str {
        match self {
            GpuSeries::None => "None",
            GpuSeries::Nc => "NC-series",
            GpuSeries::Nv => "NV-series",
            GpuSeries::Either => "Either",
        }
    }

    /// Does a SKU name satisfy this GPU requirement?
    pub fn matches(&self, sku_name: &str) -> bool {
        match self {
            GpuSeries::None => true,
            GpuSeries::Nc => sku_name.contains("NC"),
            GpuSeries::Nv => sku_name.contains("NV"),
            GpuSeries::Either => sku_name.contains("NC") || sku_name.contains("NV"),
        }
    }
}

/// Everything the estimate depends on. Changing any field recomputes the
/// estimate; changing region/OS additionally requires a (cached) fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimateOptions {
    pub region: String,
    pub host_os: HostOs,
    pub gpu: GpuSeries,

    /// Cores needed to run one simulator instance.
    pub min_cores: u32,
    /// Memory needed per container (GiB).
    pub min_memory_gib: f64,

    /// Simulator speed for a single instance (iterations / second).
    pub sim_speed: f64,
    /// Desired iterations per experiment.
    pub target_iterations: u64,
    /// Max number of instances for training.
    pub total_nodes: u32,
    /// Low-priority to dedicated VM ratio, 0.0..=1.0.
    pub low_pri_ratio: f64,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            region: s!(DEFAULT_REGION),
            host_os: HostOs::Linux,
            gpu: GpuSeries::None,
            min_cores: DEFAULT_CORES,
            min_memory_gib: DEFAULT_MEMORY_GIB,
            sim_speed: DEFAULT_SIM_SPEED,
            target_iterations: DEFAULT_ITERATIONS,
            total_nodes: DEFAULT_NODES,
            low_pri_ratio: DEFAULT_LOW_PRI_RATIO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

/// What to export: just the one-line cost summary, or the full
/// side-by-side comparison table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportScope {
    Summary,
    Comparison,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub scope: ExportScope,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            scope: ExportScope::Summary,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        path.push(join!(stem, ".", self.format.ext()));
        path
    }

    /// Parse GUI text into dir + stem. Ignores pasted extension; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub estimate: EstimateOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            estimate: EstimateOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_path_follows_format() {
        let mut export = ExportOptions::default();
        assert!(export.out_path().to_string_lossy().ends_with("cost.csv"));
        export.format = ExportFormat::Tsv;
        assert!(export.out_path().to_string_lossy().ends_with("cost.tsv"));
    }

    #[test]
    fn set_path_ignores_pasted_extension() {
        let mut export = ExportOptions::default();
        export.set_path("reports/summary.txt");
        let out = export.out_path();
        assert!(out.to_string_lossy().ends_with("summary.csv"));
        assert!(out.starts_with("reports"));
    }

    #[test]
    fn gpu_series_matching() {
        assert!(GpuSeries::None.matches("Standard_D2s_v3"));
        assert!(GpuSeries::Nc.matches("Standard_NC6"));
        assert!(!GpuSeries::Nc.matches("Standard_NV6"));
        assert!(GpuSeries::Either.matches("Standard_NV6"));
    }
}
