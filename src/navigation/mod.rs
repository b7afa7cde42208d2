//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! host location (hash fragment / URL / path)
//!     → location.rs (path + query)
//!     → controller.rs (match, breadcrumbs, current state)
//!     → outcome.rs (NavigationOutcome)
//!     → RenderLayer (external)
//! ```

pub mod controller;
pub mod location;
pub mod outcome;

pub use controller::{NavigationController, RedirectIssue, SharedRoutes};
pub use location::{Location, LocationError};
pub use outcome::{NavigationOutcome, RenderLayer, ResolvedView};
