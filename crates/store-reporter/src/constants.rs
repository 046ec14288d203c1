//! Centralized constants for the store reporter

// =============================================================================
// Default Paths
// =============================================================================

/// Default config file path
pub const CONFIG_FILENAME: &str = "config.toml";

/// Default dataset document path (written by the data retrieval job)
pub const DEFAULT_DATASET_PATH: &str = "./data/analysis.json";

/// Default report output directory
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

// =============================================================================
// Report File Names
// =============================================================================

/// Summary table CSV filename
pub const SUMMARY_FILENAME: &str = "summary.csv";

/// Monthly P&L ledger CSV filename
pub const MONTHLY_LEDGER_FILENAME: &str = "monthly_ledger.csv";

/// Revenue growth CSV filename
pub const GROWTH_FILENAME: &str = "growth.csv";

// =============================================================================
// Display
// =============================================================================

/// Growth points shown in the console summary tail
pub const CONSOLE_GROWTH_TAIL: usize = 6;
