//! Routing error taxonomy.
//!
//! # Error Classes
//! - `StructuralError`: malformed route table, raised at build time (fatal)
//! - `NotFoundError`: no route for a requested path (recoverable)
//! - `RedirectLoopError`: redirect chain exceeded its bound (configuration bug)
//! - `ReverseError`: a named route could not be turned into a path

use serde::Serialize;
use thiserror::Error;

/// Errors raised while building a route tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The route table declares no routes at all.
    #[error("route table is empty")]
    Empty,

    /// A path component is not a valid literal or parameter.
    #[error("invalid segment `{segment}` in route `{path}`: {reason}")]
    InvalidSegment {
        path: String,
        segment: String,
        reason: &'static str,
    },

    /// A node renders nothing, redirects nowhere and has no children.
    #[error("route `{path}` is a dead end: no view, redirect or children")]
    DeadEnd { path: String },

    /// A parameter name is bound twice on one root-to-node path.
    #[error("parameter `:{param}` is bound more than once on route `{path}`")]
    DuplicateParam { path: String, param: String },

    /// An absolute child path does not extend its parent's path.
    #[error("absolute route `{path}` is not nested under its parent `{parent}`")]
    DetachedChild { path: String, parent: String },

    /// A redirect target is not an absolute path.
    #[error("redirect `{target}` on route `{path}` must be an absolute path")]
    RelativeRedirect { path: String, target: String },

    /// A redirect target references a parameter the route never binds.
    #[error("redirect `{target}` on route `{path}` uses unbound parameter `:{param}`")]
    UnboundRedirectParam {
        path: String,
        target: String,
        param: String,
    },

    /// Two routes at different paths share a name.
    #[error("route name `{name}` is used by both `{first}` and `{second}`")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
}

/// No route matched the requested path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("no route matches `{path}`")]
pub struct NotFoundError {
    pub path: String,
}

/// A redirect chain exceeded the configured hop limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("redirect chain exceeded {limit} hops: {}", .hops.join(" -> "))]
pub struct RedirectLoopError {
    /// Maximum number of hops allowed.
    pub limit: usize,
    /// Every path visited, starting with the original request.
    pub hops: Vec<String>,
}

/// Failure of a single match attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    RedirectLoop(#[from] RedirectLoopError),
}

/// Errors when building a path from a route name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    #[error("no route is named `{0}`")]
    UnknownName(String),

    #[error("route `{name}` needs parameter `:{param}`")]
    MissingParam { name: String, param: String },

    #[error("parameter `:{param}` must not be empty")]
    InvalidParam { param: String, value: String },
}
