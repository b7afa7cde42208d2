//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ConsoleConfig (validated, immutable)
//!     → routing::RouteTree::build (structural checks)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs + builder validate
//!     → atomic swap of Arc<RouteTree>
//!     → next navigation observes new routes
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only the route table is hot-swapped; router settings apply on restart

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{build_routes, load_builtin, load_config, ConfigError};
pub use schema::ConsoleConfig;
pub use schema::RouterConfig;
pub use schema::RouteSpec;
pub use schema::ObservabilityConfig;
