use chrono::Local;
use eyre::Result;
use fern::Dispatch;
use log::LevelFilter;

/// Crates whose output is capped at `warn` whatever `RUST_LOG` says
const QUIET_TARGETS: [&str; 2] = ["tokio_postgres", "deadpool"];

/// Parses a `RUST_LOG` value, `info` when unset or not a plain level name
fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|level| level.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the stdout logger used by the `orbit` binary.
///
/// Lines look like `2024-01-01 12:00:00 [INFO] core::run_discovery: ...`.
///
/// # Errors
/// * If a logger was already installed
pub fn setup_logger() -> Result<()> {
    let level = parse_level(std::env::var("RUST_LOG").ok().as_deref());

    let mut dispatch = Dispatch::new().level(level);
    for target in QUIET_TARGETS {
        dispatch = dispatch.level_for(target, level.min(LevelFilter::Warn));
    }

    dispatch
        .chain(std::io::stdout())
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ));
        })
        .apply()?;
    Ok(())
}
