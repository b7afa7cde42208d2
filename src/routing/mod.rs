//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteSpec[] (config)
//!     → builder.rs (parse patterns, validate structure)
//!     → Freeze as immutable RouteTree
//!
//! Per navigation:
//!     request path
//!     → matcher.rs (walk tree, bind params, follow redirects)
//!     → RouteMatch or MatchError
//!     → breadcrumbs.rs (labeled trail)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (literal / single-component params only)
//! - Deterministic: same input always matches same route
//! - First complete match in declaration order wins

pub mod breadcrumbs;
pub mod builder;
pub mod error;
pub mod matcher;
pub mod node;
pub mod pattern;

pub use breadcrumbs::{resolve_breadcrumbs, Breadcrumb, Breadcrumbs};
pub use builder::RouteTree;
pub use error::{MatchError, NotFoundError, RedirectLoopError, ReverseError, StructuralError};
pub use matcher::{match_path, RouteMatch, DEFAULT_REDIRECT_LIMIT};
pub use node::{NodeId, RouteNode, ViewRef};
