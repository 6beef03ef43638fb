//! Test utilities for ccmeta
//!
//! Helpers shared by unit tests and the integration suite: a throwaway
//! reference directory, a diagnostic sink that records what it is told, and
//! opt-in logging.
//!
//! # Example
//!
//! ```rust,no_run
//! use ccmeta::metadata::{GenerateOptions, generate};
//! use ccmeta::test_utils::{RecordingSink, ReferenceTree};
//!
//! let tree = ReferenceTree::new().unwrap();
//! tree.add("core/dns/service.yaml", "# cluster-compare-optional\n").unwrap();
//!
//! let sink = RecordingSink::default();
//! let generated = generate(&GenerateOptions::new(tree.path()), &sink).unwrap();
//! assert!(sink.is_empty());
//! assert_eq!(generated.manifest.template_count(), 1);
//! ```

pub mod sink;
pub mod tree;

pub use sink::RecordingSink;
pub use tree::ReferenceTree;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, tests run
/// without a subscriber.
///
/// ```bash
/// RUST_LOG=ccmeta=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
