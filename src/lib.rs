//! FinTrack turns transaction and budget records into dashboard summaries
//! and assigns category labels to free text with ordered keyword tables.

pub mod categorize;
pub mod config;
pub mod feed;
pub mod import;
pub mod ledger;
pub mod models;
pub mod news;
pub mod report;
pub mod run;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install the stderr fmt subscriber. `RUST_LOG` overrides the default
/// `fintrack=warn` filter. Safe to call more than once.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fintrack=warn"));
        // Another subscriber may already be installed (tests, embedding apps).
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
