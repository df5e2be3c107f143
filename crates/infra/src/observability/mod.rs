//! Tracing subscriber setup
//!
//! Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back
//! to a caller-supplied directive such as `"info,whenly_core=debug"`.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Returns `false` if one was already set,
/// in which case nothing changes.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_new(default_directive) {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("info"),
        },
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(default_directive, "tracing initialised");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates `init_tracing` behavior for the repeated call scenario.
    ///
    /// Assertions:
    /// - the second call reports that nothing was installed
    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing("whenly=debug");
        assert!(!init_tracing("whenly=trace"));
    }
}
