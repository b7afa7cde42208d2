//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and gauges via the `metrics` facade)
//!
//! Consumers:
//!     → Log output (stdout, pretty or JSON lines)
//!     → Whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Every navigation runs in a span carrying a navigation ID
//! - Metrics are no-ops until the host installs a recorder

pub mod logging;
pub mod metrics;
