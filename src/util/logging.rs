// steplog - util/logging.rs
//
// Internal diagnostics for steplog itself (config loading, path resolution,
// finalizer failures). This is NOT the progress log: it goes to stderr via
// tracing and never writes into a Logger destination.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [diagnostics] level = "info"

use tracing_subscriber::EnvFilter;

/// Build the filter for internal diagnostics.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "warn".
fn build_filter(debug_flag: bool, config_level: Option<&str>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    }
}

/// Initialise the diagnostics subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(debug_flag, config_level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            app = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            "Diagnostics initialised"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false, Some("error"));
        init(true, None);
    }
}
