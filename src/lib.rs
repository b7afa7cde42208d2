//! Nested route resolution and breadcrumb trails for the analytics console.

pub mod config;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::schema::ConsoleConfig;
pub use navigation::{NavigationController, NavigationOutcome, RenderLayer, ResolvedView};
pub use routing::{Breadcrumb, RouteTree};
