//! Tracing Setup
//!
//! Installs the global tracing subscriber for the hosting binary.
//! Filtering comes from `RUST_LOG` with a default of `bitfaker=info`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global tracing subscriber.
///
/// Panics if a global subscriber is already installed, so this belongs
/// in `main` only.
#[allow(clippy::expect_used)]
pub fn init() {
    let env_filter = EnvFilter::from_default_env().add_directive(
        "bitfaker=info"
            .parse()
            .expect("static directive 'bitfaker=info' is valid"),
    );

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
