//! Navigation results and the seam to the rendering layer.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::routing::{Breadcrumb, NotFoundError, RedirectLoopError, RouteMatch, ViewRef};

/// Everything the rendering layer needs to show a resolved route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedView {
    /// View of the matched route.
    pub view: ViewRef,
    /// Views of matched ancestors, outermost first.
    pub layouts: Vec<ViewRef>,
    pub route_name: Option<String>,
    /// Path that finally resolved, after redirects.
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub redirected_from: Vec<String>,
}

impl ResolvedView {
    pub(crate) fn from_match(matched: &RouteMatch<'_>, query: BTreeMap<String, String>) -> Self {
        Self {
            view: matched.view().clone(),
            layouts: matched.layouts().into_iter().cloned().collect(),
            route_name: matched.target().name().map(str::to_string),
            path: matched.path(),
            params: matched.params().clone(),
            query,
            breadcrumbs: matched.breadcrumbs().collect(),
            redirected_from: matched.redirected_from().to_vec(),
        }
    }
}

/// Result of one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Resolved(ResolvedView),
    /// Recoverable: the renderer decides what "not found" looks like.
    NotFound(NotFoundError),
    /// The route table redirects in a loop. A configuration bug.
    ConfigurationError(RedirectLoopError),
}

impl NavigationOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, NavigationOutcome::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&ResolvedView> {
        match self {
            NavigationOutcome::Resolved(view) => Some(view),
            _ => None,
        }
    }

    /// Label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationOutcome::Resolved(_) => "resolved",
            NavigationOutcome::NotFound(_) => "not_found",
            NavigationOutcome::ConfigurationError(_) => "configuration_error",
        }
    }
}

/// Receives navigation results; implemented by the host's renderer.
pub trait RenderLayer: Send {
    /// Show a resolved view.
    fn render(&mut self, view: &ResolvedView);

    /// No route matched.
    fn not_found(&mut self, error: &NotFoundError);

    /// The route table is broken; surface it loudly.
    fn configuration_error(&mut self, error: &RedirectLoopError);
}
