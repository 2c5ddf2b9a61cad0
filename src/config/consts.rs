// src/config/consts.rs
//
// Site constants and estimate defaults.

/// Pricing site. Query parameters: ?region=<name>&tier=<low|standard>
pub const BASE_URL: &str = "https://azureprice.net/";

/// The site serves an empty shell to unknown clients; a browser-like
/// user-agent gets the full table markup.
pub const USER_AGENT: &str = "Mozilla/5.0";

pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Regions offered in the GUI. Any region string is accepted on the CLI.
pub const REGIONS: &[&str] = &[
    "westus",
    "westus2",
    "eastus",
    "eastus2",
    "westeurope",
    "southcentralus",
    "centralus",
];

pub const DEFAULT_REGION: &str = "eastus";

pub const MIN_CORES: u32 = 1;
pub const MAX_CORES: u32 = 32;
pub const DEFAULT_CORES: u32 = 2;

pub const MIN_MEMORY_GIB: f64 = 0.5;
pub const MAX_MEMORY_GIB: f64 = 32.0;
pub const DEFAULT_MEMORY_GIB: f64 = 1.0;

pub const MAX_SIM_SPEED: f64 = 500.0;
pub const DEFAULT_SIM_SPEED: f64 = 1.0;

pub const MIN_ITERATIONS: u64 = 1_000;
pub const MAX_ITERATIONS: u64 = 100_000_000;
pub const DEFAULT_ITERATIONS: u64 = 100_000;

pub const MIN_NODES: u32 = 10;
pub const MAX_NODES: u32 = 750;
pub const DEFAULT_NODES: u32 = 50;

/// Low-priority : dedicated node ratio.
pub const DEFAULT_LOW_PRI_RATIO: f64 = 0.1;

pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "cost";
