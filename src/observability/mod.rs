//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pattern, routing, config produce:
//!     → tracing events (compile, register, resolve, reject)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, plain or JSON)
//!     → Whatever `metrics` recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a subscriber or recorder is the
//!   caller's choice
//! - Metric updates without a recorder are no-ops
//! - Per-path events are `debug`/`trace`; table changes are `info`

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
