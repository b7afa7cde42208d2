//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the console
//! router. All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::routing::ViewRef;

/// Root configuration for the console router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Matching and navigation settings.
    pub router: RouterConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route table, top-level routes in declaration order.
    pub routes: Vec<RouteSpec>,
}

/// How locations are read from the host environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Path lives in the URL fragment (`#/dashboard`).
    #[default]
    Hash,
    /// Path is the URL path itself.
    History,
}

/// Router behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Maximum redirect hops per navigation before it is treated as a loop.
    pub redirect_limit: usize,

    /// Location mode of the host.
    pub mode: HistoryMode,

    /// Class the host applies to links under the current path.
    pub link_active_class: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            redirect_limit: 10,
            mode: HistoryMode::Hash,
            link_active_class: "open active".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Declarative description of one route and its children.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RouteSpec {
    /// Relative (`projects`, `sentiment/:analysisId`, ``) or absolute
    /// (`/dashboard`) path.
    pub path: String,

    /// Identifier for programmatic navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// View rendered when this route is the match target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewRef>,

    /// Absolute path to re-resolve instead of rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// Breadcrumb label; unlabeled routes stay out of the trail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<String>,

    /// Nested routes, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteSpec>,
}

impl RouteSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(ViewRef::new(view));
        self
    }

    #[must_use]
    pub fn redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    #[must_use]
    pub fn breadcrumb(mut self, label: impl Into<String>) -> Self {
        self.breadcrumb = Some(label.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: RouteSpec) -> Self {
        self.children.push(child);
        self
    }
}
