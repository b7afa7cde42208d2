//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (redirect limit, log level)
//! - Reject blank view ids and breadcrumb labels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ConsoleConfig → Result<(), Vec<ValidationError>>
//! - Tree structure (dead ends, parameter clashes) is checked by the route
//!   builder, not here

use thiserror::Error;

use crate::config::schema::{ConsoleConfig, RouteSpec};

/// Upper bound accepted for `router.redirect_limit`.
pub const MAX_REDIRECT_LIMIT: usize = 64;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("router.redirect_limit must be between 1 and {max}, got {value}")]
    RedirectLimit { value: usize, max: usize },

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("no routes are declared")]
    NoRoutes,

    #[error("route `{0}` has a blank view")]
    BlankView(String),

    #[error("route `{0}` has a blank breadcrumb label")]
    BlankBreadcrumb(String),

    #[error("route `{0}` has a blank name")]
    BlankName(String),
}

/// Check a parsed configuration before it is accepted.
pub fn validate_config(config: &ConsoleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let limit = config.router.redirect_limit;
    if limit == 0 || limit > MAX_REDIRECT_LIMIT {
        errors.push(ValidationError::RedirectLimit {
            value: limit,
            max: MAX_REDIRECT_LIMIT,
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }
    for route in &config.routes {
        validate_route(route, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteSpec, errors: &mut Vec<ValidationError>) {
    if route.view.as_ref().is_some_and(|v| v.as_str().trim().is_empty()) {
        errors.push(ValidationError::BlankView(route.path.clone()));
    }
    if route.breadcrumb.as_ref().is_some_and(|b| b.trim().is_empty()) {
        errors.push(ValidationError::BlankBreadcrumb(route.path.clone()));
    }
    if route.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
        errors.push(ValidationError::BlankName(route.path.clone()));
    }
    for child in &route.children {
        validate_route(child, errors);
    }
}
