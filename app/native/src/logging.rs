//! Log output setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job. Output goes to stderr so command output on stdout stays
//! machine readable.

use tracing_subscriber::EnvFilter;

use crate::constants::logging::{DEFAULT_FILTER, VERBOSE_FILTER};

/// Picks the filter directive.
///
/// `--verbose` wins over `RUST_LOG`, which wins over the default.
fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global `tracing` subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if result.is_err() {
        tracing::trace!("foresight: log subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter() {
        let filter = build_filter(true);
        assert!(filter.to_string().contains("foresight=debug"));
    }

    #[test]
    fn test_default_filters_parse() {
        assert!(EnvFilter::builder().parse(DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::builder().parse(VERBOSE_FILTER).is_ok());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
