// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "riskline.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Scoring ---
pub const DEFAULT_MOVING_AVG_WINDOW_DAYS: u32 = 30;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
