//! Resolution tests against the built-in analytics console route table.

use std::collections::{BTreeMap, HashSet};

use console_router::routing::pattern::split_path;
use console_router::routing::{Breadcrumb, MatchError, NodeId};

mod common;

#[test]
fn test_every_renderable_route_is_reachable() {
    let tree = common::console_tree();
    let mut seen = HashSet::new();

    for (id, node) in tree.iter() {
        let first_with_path = seen.insert(node.full_pattern().to_string());
        let has_index = node
            .children()
            .iter()
            .any(|c| tree.node(*c).pattern().is_empty());
        if !first_with_path || node.view().is_none() || node.redirect().is_some() || has_index {
            continue;
        }

        let concrete: Vec<String> = split_path(node.full_pattern())
            .into_iter()
            .map(|c| match c.strip_prefix(':') {
                Some(name) => format!("{}-value", name),
                None => c.to_string(),
            })
            .collect();
        let path = format!("/{}", concrete.join("/"));

        let matched = tree
            .resolve(&path)
            .unwrap_or_else(|e| panic!("{} should resolve: {}", path, e));
        assert_eq!(matched.target_id(), id, "{} resolved to the wrong route", path);
        assert_eq!(matched.path(), path);
    }
}

#[test]
fn test_new_project_breadcrumbs() {
    let tree = common::console_tree();
    let matched = tree.resolve("/dashboard/projects/new").unwrap();

    assert_eq!(matched.view().as_str(), "New");
    assert_eq!(
        matched.breadcrumbs().collect::<Vec<_>>(),
        vec![
            Breadcrumb::new("Dashboard", "/dashboard"),
            Breadcrumb::new("New Project", "/dashboard/projects/new"),
        ]
    );
}

#[test]
fn test_analysis_binds_both_params() {
    let tree = common::console_tree();
    let matched = tree
        .resolve("/dashboard/projects/abc123/sentiment/xyz")
        .unwrap();

    let expected: BTreeMap<String, String> = [("projectId", "abc123"), ("analysisId", "xyz")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(matched.params(), &expected);
    assert_eq!(matched.target().name(), Some("Sentiment Analysis"));

    let trail: Vec<_> = matched.breadcrumbs().collect();
    assert_eq!(
        trail,
        vec![
            Breadcrumb::new("Dashboard", "/dashboard"),
            Breadcrumb::new("Project Home", "/dashboard/projects/abc123"),
            Breadcrumb::new("Sentiment Analysis", "/dashboard/projects/abc123/sentiment/xyz"),
        ]
    );
    assert_eq!(trail.last().unwrap().path, matched.path());
}

#[test]
fn test_project_sub_dashboards() {
    let tree = common::console_tree();
    for (suffix, view) in [
        ("concept", "Extraction"),
        ("category", "Category"),
        ("similar", "Similar"),
    ] {
        let path = format!("/dashboard/projects/p9/{}", suffix);
        let matched = tree.resolve(&path).unwrap();
        assert_eq!(matched.view().as_str(), view);
        assert_eq!(matched.param("projectId"), Some("p9"));
    }
}

#[test]
fn test_root_redirects_to_dashboard() {
    let tree = common::console_tree();
    let via_root = tree.resolve("/").unwrap();
    let direct = tree.resolve("/dashboard").unwrap();

    assert_eq!(via_root.target_id(), direct.target_id());
    assert_eq!(via_root.params(), direct.params());
    assert_eq!(via_root.view().as_str(), "DashboardNew");
    assert_eq!(via_root.redirected_from(), ["/".to_string()]);
    assert!(direct.redirected_from().is_empty());
}

#[test]
fn test_rendering_twin_wins_for_exact_paths() {
    let tree = common::console_tree();

    // Both `/dashboard` and `/dashboard/projects` have a structural twin with a
    // redirect; the earlier rendering route wins.
    assert_eq!(tree.resolve("/dashboard/").unwrap().view().as_str(), "DashboardNew");
    assert_eq!(tree.resolve("/dashboard/projects").unwrap().view().as_str(), "Projects");
    assert_eq!(
        tree.resolve("/dashboard/projects/abc").unwrap().view().as_str(),
        "ProjectDashboard"
    );
}

#[test]
fn test_layouts_and_login() {
    let tree = common::console_tree();

    let matched = tree.resolve("/dashboard/projects/new").unwrap();
    let layouts: Vec<_> = matched.layouts().iter().map(|v| v.as_str()).collect();
    assert_eq!(layouts, vec!["Full"]);
    assert_eq!(matched.chain().next(), Some(NodeId::ROOT));

    let login = tree.resolve("/login").unwrap();
    assert_eq!(login.view().as_str(), "Login");
    assert!(login.layouts().is_empty());
    assert_eq!(login.breadcrumbs().count(), 0);
}

#[test]
fn test_unknown_paths() {
    let tree = common::console_tree();
    for path in [
        "/dashboard/projects/abc/unknown",
        "/dashboard/projects/abc/sentiment",
        "/settings",
        "/login/extra",
    ] {
        match tree.resolve(path) {
            Err(MatchError::NotFound(err)) => assert_eq!(err.path, path),
            other => panic!("{} should not resolve, got {:?}", path, other.map(|m| m.path())),
        }
    }
}

#[test]
fn test_tree_is_shareable_across_threads() {
    let tree = std::sync::Arc::new(common::console_tree());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tree = std::sync::Arc::clone(&tree);
            std::thread::spawn(move || {
                let path = format!("/dashboard/projects/p{}/similar", i);
                tree.resolve(&path).map(|m| m.param("projectId").map(str::to_string))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let bound = handle.join().unwrap().unwrap();
        assert_eq!(bound, Some(format!("p{}", i)));
    }
}
