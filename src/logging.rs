//! `env_logger` setup shared by the binaries.

use log::LevelFilter;

/// Initialise logging once per process. `verbosity` counts `-v` flags; `RUST_LOG` overrides it.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
