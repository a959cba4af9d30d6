//! Tracing subscriber setup for the CLI.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used when `RUST_LOG` is unset.
///
/// The trailing level applies to dependencies: polars and eframe stay quiet
/// below `warn` unless `--verbose` is given.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "salary_dashboard=debug,info"
    } else {
        "salary_dashboard=info,warn"
    }
}

pub fn init_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_crate_level_only() {
        assert_eq!(default_directive(false), "salary_dashboard=info,warn");
        assert_eq!(default_directive(true), "salary_dashboard=debug,info");
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_directive(verbose)).is_ok());
        }
    }
}
