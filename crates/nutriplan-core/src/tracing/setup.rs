//! Subscriber installation for hosts embedding the engine.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Directives used when `NUTRIPLAN_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "nutriplan_engine=info,nutriplan_core=info";

/// Resolve the filter: `NUTRIPLAN_LOG` first, then `fallback`.
///
/// `NUTRIPLAN_LOG=nutriplan_engine::allocation=debug` turns on simplex
/// iteration logs without touching the other modules.
pub fn resolve_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install a fmt subscriber with [`DEFAULT_DIRECTIVES`] as the fallback filter.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_DIRECTIVES);
}

/// Install a fmt subscriber. Only the first call in a process has any effect,
/// and a subscriber installed by the host beforehand is left in place.
pub fn init_tracing_with(fallback: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(resolve_filter(fallback))
            .try_init();
    });
}
