// steplog - main.rs
//
// Demonstration driver. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and diagnostics initialisation
// 3. Logger setup (level, destination, layout)
// 4. A small staged computation reported through nested, timed sections

use clap::Parser;
use std::path::PathBuf;
use steplog::platform::config::{self, PlatformPaths};
use steplog::platform::data_dir::DataDir;
use steplog::util::constants;
use steplog::util::error::Result;
use steplog::{Destination, Logger, VerbosityLevel};

/// steplog - sectioned progress logging for long-running computations.
///
/// Runs a short synthetic computation (Newton iterations for square roots)
/// and reports it through the progress logger, so the effect of the
/// verbosity level, the label gutter and the timing summary can be seen.
#[derive(Parser, Debug)]
#[command(name = "steplog", version, about)]
struct Cli {
    /// Verbosity: 0-4 or silent, low, medium, high, highest.
    #[arg(short = 'l', long = "level")]
    level: Option<String>,

    /// Write the progress log to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Data directory (overrides STEPLOG_SHARE and config).
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Number of computation stages to run.
    #[arg(short = 'n', long = "steps", default_value_t = constants::DEFAULT_DEMO_STEPS)]
    steps: usize,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug diagnostics on stderr (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Interpret a CLI level: digits as an ordinal, anything else as a name.
fn parse_level(raw: &str) -> Result<VerbosityLevel> {
    let level = match raw.trim().parse::<i64>() {
        Ok(ordinal) => VerbosityLevel::from_value(ordinal)?,
        Err(_) => VerbosityLevel::from_value(raw.trim())?,
    };
    Ok(level)
}

/// Resolve the data directory. An explicitly configured directory must
/// exist; the implicit lookup is optional for the demo.
fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<Option<DataDir>> {
    match explicit {
        Some(dir) => Ok(Some(DataDir::at(dir)?)),
        None => match DataDir::discover() {
            Ok(dir) => Ok(Some(dir)),
            Err(e) => {
                tracing::info!(error = %e, "No data directory; continuing without data files");
                Ok(None)
            }
        },
    }
}

/// Newton iteration for sqrt(target), returning (root, iterations).
fn newton_sqrt(log: &mut Logger, target: f64, tolerance: f64) -> Result<(f64, usize)> {
    let mut x = target.max(1.0);
    let mut iterations = 0;
    loop {
        iterations += 1;
        let next = 0.5 * (x + target / x);
        let residual = (next - x).abs();
        {
            let mut trace = log.section("NEWTON", VerbosityLevel::Highest);
            trace.emit(&format!(
                "iteration {iterations:>3}: x = {next:.12}, |dx| = {residual:.3e}"
            ))?;
        }
        x = next;
        if residual < tolerance || iterations >= 100 {
            return Ok((x, iterations));
        }
    }
}

fn run(log: &mut Logger, data_dir: Option<&DataDir>, steps: usize) -> Result<()> {
    let mut top = log.timed("RUN", VerbosityLevel::Low, "total");
    top.emit(&format!("Starting a computation of {steps} stage(s)."))?;

    {
        let mut init = top.timed("INIT", VerbosityLevel::Medium, "initialization");
        match data_dir {
            Some(dir) => {
                let files = dir.find("*")?;
                init.emit(&format!(
                    "Data directory {} holds {} file(s).",
                    dir.root().display(),
                    files.len()
                ))?;
                for file in files {
                    let mut detail = init.section("INIT", VerbosityLevel::High);
                    detail.emit(&format!("  {}", file.display()))?;
                }
            }
            None => init.emit("No data directory configured.")?,
        }
    }

    for stage in 1..=steps {
        let mut step = top.timed("STAGE", VerbosityLevel::Medium, "stages");
        let target = (stage as f64) * 2.0;
        let (root, iterations) = newton_sqrt(&mut step, target, 1e-12)?;
        step.emit(&format!(
            "Stage {stage}/{steps}: sqrt({target}) = {root:.12} after {iterations} iterations."
        ))?;
        let mut check = step.timed("CHECK", VerbosityLevel::High, "verification");
        check.emit(&format!(
            "Residual root^2 - target = {:.3e}",
            root * root - target
        ))?;
    }

    top.emit("Computation finished.")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, warnings) = config::load_config(&config_path);

    steplog::util::logging::init(cli.debug, app_config.diagnostics_level.as_deref());
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    if let Err(e) = start(cli, app_config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn start(cli: Cli, app_config: config::AppConfig) -> Result<()> {
    let level = match cli.level.as_deref() {
        Some(raw) => parse_level(raw)?,
        None => app_config.level,
    };
    let steps = cli.steps.min(constants::MAX_DEMO_STEPS);

    tracing::info!(
        version = constants::APP_VERSION,
        level = %level,
        steps,
        "steplog starting"
    );

    let mut log = Logger::new(level).with_widths(app_config.label_width, app_config.line_width);
    if let Some(path) = cli.output.or(app_config.log_file) {
        log.bind_destination(Destination::path(path))?;
    }

    let data_dir = resolve_data_dir(cli.data_dir.or(app_config.data_dir))?;

    run(&mut log, data_dir.as_ref(), steps)?;
    log.exit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_forms() {
        assert_eq!(parse_level("3").unwrap(), VerbosityLevel::High);
        assert_eq!(parse_level(" Low ").unwrap(), VerbosityLevel::Low);
        assert!(parse_level("9").is_err());
        assert!(parse_level("chatty").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["steplog", "-l", "high", "-n", "2", "--debug"]).unwrap();
        assert_eq!(cli.level.as_deref(), Some("high"));
        assert_eq!(cli.steps, 2);
        assert!(cli.debug);
    }

    #[test]
    fn test_run_writes_stages_and_timings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("run.log");
        let mut log = Logger::new(VerbosityLevel::High);
        log.bind_destination(Destination::path(&path)).unwrap();
        run(&mut log, None, 2).unwrap();
        log.exit().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(" STAGE  Stage 2/2: sqrt(4) = 2.000000000000"));
        assert!(text.contains(" CHECK  Residual"));
        assert!(!text.contains("NEWTON"));
        assert_eq!(log.timetable().len(), 4);
        let keys: Vec<_> = log
            .timetable()
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(keys, vec!["total", "initialization", "stages", "verification"]);
    }
}
