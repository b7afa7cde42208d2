//! Navigation orchestration.
//!
//! # Responsibilities
//! - Match each navigation against the current route tree snapshot
//! - Package view, parameters and breadcrumbs for the rendering layer
//! - Report not-found and redirect-loop outcomes
//! - Track the current location for active-link checks
//!
//! # Design Decisions
//! - Explicitly constructed; no process-wide router
//! - Each navigation loads one tree snapshot, so a hot reload never mixes
//!   two trees within a navigation
//! - A failed navigation leaves the current view in place

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use uuid::Uuid;

use crate::config::schema::RouterConfig;
use crate::navigation::location::{Location, LocationError};
use crate::navigation::outcome::{NavigationOutcome, RenderLayer, ResolvedView};
use crate::observability::metrics;
use crate::routing::pattern::{join_path, split_path};
use crate::routing::{match_path, MatchError, ReverseError, RouteTree};

/// Route tree shared with the config watcher; swapped whole on reload.
pub type SharedRoutes = Arc<ArcSwap<RouteTree>>;

/// A redirect whose target does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectIssue {
    /// Full pattern of the redirecting route.
    pub route: String,
    pub target: String,
    pub error: MatchError,
}

/// Drives navigation for one host.
pub struct NavigationController {
    routes: SharedRoutes,
    config: RouterConfig,
    current: Option<ResolvedView>,
    layer: Option<Box<dyn RenderLayer>>,
}

impl NavigationController {
    /// Create a controller owning `tree`.
    pub fn new(tree: RouteTree, config: RouterConfig) -> Self {
        Self::with_shared(Arc::new(ArcSwap::from_pointee(tree)), config)
    }

    /// Create a controller reading from a tree that may be swapped under it.
    pub fn with_shared(routes: SharedRoutes, config: RouterConfig) -> Self {
        metrics::record_tree_size(routes.load().len());
        Self {
            routes,
            config,
            current: None,
            layer: None,
        }
    }

    /// Attach the rendering layer that receives every outcome.
    #[must_use]
    pub fn with_render_layer(mut self, layer: impl RenderLayer + 'static) -> Self {
        self.layer = Some(Box::new(layer));
        self
    }

    /// Handle for publishing new trees.
    pub fn routes(&self) -> SharedRoutes {
        Arc::clone(&self.routes)
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Navigate to a path, optionally carrying `?query`.
    pub fn navigate(&mut self, path: &str) -> NavigationOutcome {
        self.navigate_location(&Location::parse(path))
    }

    /// Navigate to a full URL, reading it per the configured history mode.
    pub fn navigate_url(&mut self, url: &str) -> Result<NavigationOutcome, LocationError> {
        let location = Location::from_url(url, self.config.mode)?;
        Ok(self.navigate_location(&location))
    }

    /// Navigate to a named route.
    pub fn navigate_named(
        &mut self,
        name: &str,
        params: &HashMap<String, String>,
    ) -> Result<NavigationOutcome, ReverseError> {
        let path = self.routes.load().path_for(name, params)?;
        Ok(self.navigate(&path))
    }

    pub fn navigate_location(&mut self, location: &Location) -> NavigationOutcome {
        let navigation_id = Uuid::new_v4();
        let span = tracing::info_span!("navigate", %navigation_id, path = %location.path());
        let _enter = span.enter();

        let tree = self.routes.load_full();
        let outcome = match match_path(&tree, location.path(), self.config.redirect_limit) {
            Ok(matched) => {
                metrics::record_redirects(matched.redirected_from().len());
                NavigationOutcome::Resolved(ResolvedView::from_match(
                    &matched,
                    location.query().clone(),
                ))
            }
            Err(MatchError::NotFound(err)) => {
                tracing::warn!(error = %err, "Navigation failed");
                NavigationOutcome::NotFound(err)
            }
            Err(MatchError::RedirectLoop(err)) => {
                tracing::error!(error = %err, "Route table redirects in a loop");
                NavigationOutcome::ConfigurationError(err)
            }
        };
        metrics::record_navigation(outcome.kind());

        if let NavigationOutcome::Resolved(view) = &outcome {
            tracing::info!(view = %view.view, resolved = %view.path, "Navigation resolved");
            self.current = Some(view.clone());
        }
        if let Some(layer) = self.layer.as_mut() {
            match &outcome {
                NavigationOutcome::Resolved(view) => layer.render(view),
                NavigationOutcome::NotFound(err) => layer.not_found(err),
                NavigationOutcome::ConfigurationError(err) => layer.configuration_error(err),
            }
        }
        outcome
    }

    /// Last successfully resolved view.
    pub fn current(&self) -> Option<&ResolvedView> {
        self.current.as_ref()
    }

    /// Whether the current path is `path` or lies below it.
    pub fn is_active(&self, path: &str) -> bool {
        let Some(current) = &self.current else {
            return false;
        };
        let wanted = split_path(path);
        split_path(&current.path).starts_with(&wanted)
    }

    /// Class for a link to `path`: the configured active class when active.
    pub fn link_class(&self, path: &str) -> Option<&str> {
        self.is_active(path)
            .then_some(self.config.link_active_class.as_str())
    }

    /// Resolve every redirect in the tree and report the ones that fail.
    ///
    /// Parameters in a target are filled with a placeholder value.
    pub fn check_redirects(&self) -> Vec<RedirectIssue> {
        let tree = self.routes.load_full();
        let mut issues = Vec::new();
        for (_, node) in tree.iter() {
            let Some(target) = node.redirect() else {
                continue;
            };
            let probe: Vec<&str> = split_path(target)
                .into_iter()
                .map(|c| if c.starts_with(':') { "_" } else { c })
                .collect();
            if let Err(error) = match_path(&tree, &join_path(&probe), self.config.redirect_limit) {
                tracing::warn!(route = %node.full_pattern(), redirect = %target, %error, "Redirect does not resolve");
                issues.push(RedirectIssue {
                    route: node.full_pattern().to_string(),
                    target: target.to_string(),
                    error,
                });
            }
        }
        issues
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("config", &self.config)
            .field("current", &self.current)
            .field("has_render_layer", &self.layer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteSpec;

    fn controller() -> NavigationController {
        let tree = RouteTree::build(&[
            RouteSpec::new("/").redirect("/dashboard"),
            RouteSpec::new("/dashboard")
                .name("Dashboard")
                .view("Dashboard")
                .breadcrumb("Dashboard")
                .child(RouteSpec::new("projects/:projectId").name("Project").view("Project")),
            RouteSpec::new("/loop").redirect("/loop"),
            RouteSpec::new("/broken").redirect("/nowhere"),
        ])
        .unwrap();
        NavigationController::new(tree, RouterConfig::default())
    }

    #[test]
    fn test_navigate_resolves_and_tracks_current() {
        let mut nav = controller();
        let outcome = nav.navigate("/?welcome=1");
        let view = outcome.resolved().unwrap();
        assert_eq!(view.view.as_str(), "Dashboard");
        assert_eq!(view.path, "/dashboard");
        assert_eq!(view.redirected_from, vec!["/"]);
        assert_eq!(view.query.get("welcome").map(String::as_str), Some("1"));
        assert_eq!(nav.current().unwrap().path, "/dashboard");
    }

    #[test]
    fn test_failures_keep_current_view() {
        let mut nav = controller();
        nav.navigate("/dashboard");

        assert_eq!(nav.navigate("/missing").kind(), "not_found");
        assert!(matches!(
            nav.navigate("/loop"),
            NavigationOutcome::ConfigurationError(_)
        ));
        assert_eq!(nav.current().unwrap().path, "/dashboard");
    }

    #[test]
    fn test_active_links() {
        let mut nav = controller();
        assert!(!nav.is_active("/dashboard"));

        nav.navigate("/dashboard/projects/abc");
        assert!(nav.is_active("/dashboard"));
        assert!(nav.is_active("/dashboard/projects/abc/"));
        assert!(!nav.is_active("/dashboard/projects/other"));
        assert!(!nav.is_active("/dash"));
        assert_eq!(nav.link_class("/dashboard"), Some("open active"));
        assert_eq!(nav.link_class("/login"), None);
    }

    #[test]
    fn test_navigate_named() {
        let mut nav = controller();
        let mut params = HashMap::new();
        params.insert("projectId".to_string(), "p1".to_string());

        let outcome = nav.navigate_named("Project", &params).unwrap();
        assert_eq!(outcome.resolved().unwrap().params.get("projectId").map(String::as_str), Some("p1"));
        assert!(nav.navigate_named("Nope", &params).is_err());
    }

    #[test]
    fn test_named_params_survive_reserved_characters() {
        let mut nav = controller();
        for value in ["a#b", "p?x=1", "my project/2"] {
            let mut params = HashMap::new();
            params.insert("projectId".to_string(), value.to_string());

            let outcome = nav.navigate_named("Project", &params).unwrap();
            let view = outcome.resolved().unwrap();
            assert_eq!(view.params.get("projectId").map(String::as_str), Some(value));
            assert!(view.query.is_empty());
        }
        assert_eq!(nav.current().unwrap().path, "/dashboard/projects/my%20project%2F2");
    }

    #[test]
    fn test_navigate_url_decodes_params() {
        let mut nav = controller();
        let outcome = nav
            .navigate_url("http://localhost:8080/#/dashboard/projects/my%20project")
            .unwrap();
        let view = outcome.resolved().unwrap();
        assert_eq!(view.params.get("projectId").map(String::as_str), Some("my project"));
        assert_eq!(view.path, "/dashboard/projects/my%20project");
    }

    #[test]
    fn test_navigate_url_hash_mode() {
        let mut nav = controller();
        let outcome = nav
            .navigate_url("http://localhost:8080/#/dashboard/projects/x")
            .unwrap();
        assert_eq!(outcome.resolved().unwrap().route_name.as_deref(), Some("Project"));
    }

    #[test]
    fn test_check_redirects_reports_broken_targets() {
        let nav = controller();
        let issues = nav.check_redirects();
        let routes: Vec<_> = issues.iter().map(|i| i.route.as_str()).collect();
        assert_eq!(routes, vec!["/loop", "/broken"]);
        assert!(matches!(issues[0].error, MatchError::RedirectLoop(_)));
        assert!(matches!(issues[1].error, MatchError::NotFound(_)));
    }

    #[test]
    fn test_swapped_tree_is_used_by_next_navigation() {
        let mut nav = controller();
        assert!(!nav.navigate("/login").is_resolved());

        let next = RouteTree::build(&[RouteSpec::new("/login").view("Login")]).unwrap();
        nav.routes().store(Arc::new(next));
        assert!(nav.navigate("/login").is_resolved());
    }
}
