//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins; otherwise the config's `logging.level`, raised by `-v`.
//! Logs go to stderr so stdout only carries the draw itself.

use santa_types::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init(config: &LoggingConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    }
}

fn default_directive(config_level: &str, verbose: u8) -> String {
    match verbose {
        0 => config_level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
