//! Tracing subscriber setup for the binary.
//!
//! Library code only emits events; installing a subscriber is the caller's
//! choice. Logs go to stderr so `--json` output on stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `rubicon=debug`.
pub const LOG_ENV_VAR: &str = "RUBICON_LOG";

/// Filter directive for a `-v` count when `RUBICON_LOG` is unset.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,rubicon=info",
        2 => "warn,rubicon=debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .compact()
        .try_init();
}
