//! Logging initialization for the `tl2swift` binary
//!
//! Logs go to stderr so they never mix with generated output or usage text.
//! `RUST_LOG` overrides the level picked from `-v` flags.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a given number of `-v` flags
fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,tl2swift=info,tl2swift_codegen=info",
        2 => "info,tl2swift=debug,tl2swift_codegen=debug",
        _ => "debug,tl2swift=trace,tl2swift_codegen=trace",
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)))
}

/// Install the global subscriber, human readable or JSON
pub fn init_logging(verbosity: u8, json: bool) {
    let registry = tracing_subscriber::registry().with(build_env_filter(verbosity));

    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(verbosity >= 2)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    if let Err(err) = result {
        eprintln!("logging already initialized: {err}");
    }
}
