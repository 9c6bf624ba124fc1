// steplog - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "steplog";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "steplog";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the compiler that built this binary, captured by build.rs.
pub const RUSTC_VERSION: &str = env!("STEPLOG_RUSTC_VERSION");

// =============================================================================
// Output layout
// =============================================================================

/// Default width of the label gutter, including its two padding spaces.
pub const DEFAULT_LABEL_WIDTH: usize = 8;

/// Gutter width used while printing the identity block of the banner.
pub const BANNER_LABEL_WIDTH: usize = 20;

/// Default total physical line width before gutter subtraction.
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Smallest gutter that can still show a one-character label.
pub const MIN_LABEL_WIDTH: usize = 3;

/// Upper bound on the gutter width accepted from config.
pub const MAX_LABEL_WIDTH: usize = 40;

/// Bounds on the total line width accepted from config. The minimum leaves
/// room for text beside both the widest gutter and the banner gutter.
pub const MIN_LINE_WIDTH: usize = 50;
pub const MAX_LINE_WIDTH: usize = 1_000;

/// Length of the `~` rules printed around the banner and timing summary.
pub const RULE_WIDTH: usize = 80;

/// Character repeated to draw a rule.
pub const RULE_CHAR: char = '~';

/// Column width of the description in timing summary lines.
pub const TIMING_COLUMN_WIDTH: usize = 30;

// =============================================================================
// Section labels used by the logger itself
// =============================================================================

pub const LABEL_USER: &str = "USER";
pub const LABEL_MACHINE: &str = "MACHINE";
pub const LABEL_TIME: &str = "TIME";
pub const LABEL_RUNTIME: &str = "RUNTIME VERSION";
pub const LABEL_CWD: &str = "CURRENT DIR";
pub const LABEL_COMMAND: &str = "COMMAND LINE";
pub const LABEL_TIMING: &str = "TIMING";

// =============================================================================
// Data directory
// =============================================================================

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STEPLOG_SHARE";

/// File next to the executable recording the install prefix.
pub const PREFIX_FILE_NAME: &str = "share_dir.txt";

/// Data directory below the recorded install prefix.
pub const PREFIX_DATA_SUBDIR: &str = "share/steplog";

/// Fallback data directory, relative to the working directory.
pub const FALLBACK_DATA_DIR: &str = "./share";

// =============================================================================
// Configuration & diagnostics
// =============================================================================

/// Name of the TOML configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default tracing filter for the crate's own diagnostics.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Accepted values for `[diagnostics] level`.
pub const DIAGNOSTIC_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Number of stages the demo computation runs when not told otherwise.
pub const DEFAULT_DEMO_STEPS: usize = 3;

/// Upper bound on demo stages.
pub const MAX_DEMO_STEPS: usize = 1_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_widths_within_bounds() {
        assert!((MIN_LABEL_WIDTH..=MAX_LABEL_WIDTH).contains(&DEFAULT_LABEL_WIDTH));
        assert!((MIN_LABEL_WIDTH..=MAX_LABEL_WIDTH).contains(&BANNER_LABEL_WIDTH));
        assert!((MIN_LINE_WIDTH..=MAX_LINE_WIDTH).contains(&DEFAULT_LINE_WIDTH));
        assert!(DEFAULT_LINE_WIDTH > BANNER_LABEL_WIDTH);
        assert!(MIN_LINE_WIDTH > BANNER_LABEL_WIDTH);
        assert!(MIN_LINE_WIDTH > MAX_LABEL_WIDTH);
    }

    #[test]
    fn test_default_log_level_is_valid() {
        assert!(DIAGNOSTIC_LEVELS.contains(&DEFAULT_LOG_LEVEL));
    }
}
