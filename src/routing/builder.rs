//! Route tree construction.
//!
//! # Responsibilities
//! - Compile a nested `RouteSpec` table into an immutable `RouteTree`
//! - Normalize absolute child paths to paths relative to their parent
//! - Reject structurally broken tables before any route is served
//!
//! # Design Decisions
//! - Nodes are stored in one arena in pre-order, so `NodeId` order is
//!   declaration order
//! - An implicit root at `/` owns the declared top-level routes
//! - Names may repeat only on nodes sharing one full path; lookups pick the
//!   first declared node

use std::collections::HashMap;

use crate::config::schema::RouteSpec;
use crate::routing::error::{ReverseError, StructuralError};
use crate::routing::node::{NodeId, RouteNode};
use crate::routing::pattern::{
    encode_component, join_path, parse_component, split_path, Component, Pattern,
};

/// Immutable, validated route tree.
#[derive(Debug, Clone)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
    names: HashMap<String, NodeId>,
}

impl RouteTree {
    /// Build a tree from top-level route specs.
    pub fn build(specs: &[RouteSpec]) -> Result<Self, StructuralError> {
        if specs.is_empty() {
            return Err(StructuralError::Empty);
        }

        let mut builder = Builder {
            nodes: vec![RouteNode {
                pattern: Pattern::default(),
                full_pattern: "/".to_string(),
                name: None,
                view: None,
                redirect: None,
                breadcrumb: None,
                parent: None,
                children: Vec::new(),
            }],
            names: HashMap::new(),
        };

        let mut top_level = Vec::with_capacity(specs.len());
        for spec in specs {
            top_level.push(builder.add(spec, NodeId::ROOT, &[])?);
        }
        builder.nodes[NodeId::ROOT.0].children = top_level;

        let tree = RouteTree {
            nodes: builder.nodes,
            names: builder.names,
        };
        tracing::debug!(
            nodes = tree.len(),
            named = tree.names.len(),
            "Route tree built"
        );
        Ok(tree)
    }

    pub fn root(&self) -> &RouteNode {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Look up a node handed out by this tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a larger tree. Use [`RouteTree::get`] for ids
    /// of unknown origin.
    pub fn node(&self, id: NodeId) -> &RouteNode {
        &self.nodes[id.0]
    }

    /// Look up a node, `None` if `id` is out of range for this tree.
    pub fn get(&self, id: NodeId) -> Option<&RouteNode> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, the implicit root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All nodes in declaration (pre-)order, root first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &RouteNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// First declared node carrying `name`.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Node ids from the root down to `id`, both included.
    pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.node(parent).parent;
        }
        chain.reverse();
        chain
    }

    /// Concrete path of a named route with `params` substituted.
    ///
    /// Values are percent-encoded, so any non-empty value round-trips
    /// through matching.
    pub fn path_for(
        &self,
        name: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, ReverseError> {
        let id = self
            .find_by_name(name)
            .ok_or_else(|| ReverseError::UnknownName(name.to_string()))?;

        let mut components = Vec::new();
        for raw in split_path(self.node(id).full_pattern()) {
            match raw.strip_prefix(':') {
                Some(param) => {
                    let value = params.get(param).ok_or_else(|| ReverseError::MissingParam {
                        name: name.to_string(),
                        param: param.to_string(),
                    })?;
                    if value.is_empty() {
                        return Err(ReverseError::InvalidParam {
                            param: param.to_string(),
                            value: value.clone(),
                        });
                    }
                    components.push(encode_component(value));
                }
                None => components.push(raw.to_string()),
            }
        }
        Ok(join_path(&components))
    }
}

struct Builder {
    nodes: Vec<RouteNode>,
    names: HashMap<String, NodeId>,
}

impl Builder {
    fn add(
        &mut self,
        spec: &RouteSpec,
        parent: NodeId,
        bound: &[String],
    ) -> Result<NodeId, StructuralError> {
        let parent_full = self.nodes[parent.0].full_pattern.clone();
        let relative = relative_path(&spec.path, &parent_full)?;
        let pattern = Pattern::parse(&relative, &spec.path)?;

        let full_pattern = if pattern.is_empty() {
            parent_full
        } else if parent_full == "/" {
            format!("/{}", pattern)
        } else {
            format!("{}/{}", parent_full, pattern)
        };

        let mut scope = bound.to_vec();
        for param in pattern.params() {
            if scope.iter().any(|p| p == param) {
                return Err(StructuralError::DuplicateParam {
                    path: full_pattern,
                    param: param.to_string(),
                });
            }
            scope.push(param.to_string());
        }

        if spec.view.is_none() && spec.redirect.is_none() && spec.children.is_empty() {
            return Err(StructuralError::DeadEnd { path: full_pattern });
        }

        if let Some(target) = &spec.redirect {
            check_redirect(target, &full_pattern, &scope)?;
        }

        let id = NodeId(self.nodes.len());
        if let Some(name) = &spec.name {
            match self.names.get(name) {
                Some(&existing) => {
                    let first = &self.nodes[existing.0].full_pattern;
                    if *first != full_pattern {
                        return Err(StructuralError::DuplicateName {
                            name: name.clone(),
                            first: first.clone(),
                            second: full_pattern,
                        });
                    }
                }
                None => {
                    self.names.insert(name.clone(), id);
                }
            }
        }

        self.nodes.push(RouteNode {
            pattern,
            full_pattern,
            name: spec.name.clone(),
            view: spec.view.clone(),
            redirect: spec.redirect.clone(),
            breadcrumb: spec.breadcrumb.clone(),
            parent: Some(parent),
            children: Vec::new(),
        });

        let mut children = Vec::with_capacity(spec.children.len());
        for child in &spec.children {
            children.push(self.add(child, id, &scope)?);
        }
        self.nodes[id.0].children = children;

        Ok(id)
    }
}

/// Strip the parent's path from an absolute child path.
fn relative_path(path: &str, parent_full: &str) -> Result<String, StructuralError> {
    if !path.starts_with('/') {
        return Ok(path.to_string());
    }
    let own = split_path(path);
    let parent = split_path(parent_full);
    if !own.starts_with(&parent) {
        return Err(StructuralError::DetachedChild {
            path: path.to_string(),
            parent: parent_full.to_string(),
        });
    }
    Ok(own[parent.len()..].join("/"))
}

fn check_redirect(target: &str, path: &str, scope: &[String]) -> Result<(), StructuralError> {
    if !target.starts_with('/') {
        return Err(StructuralError::RelativeRedirect {
            path: path.to_string(),
            target: target.to_string(),
        });
    }
    for raw in split_path(target) {
        if let Component::Param(param) = parse_component(raw, path)? {
            if !scope.contains(&param) {
                return Err(StructuralError::UnboundRedirectParam {
                    path: path.to_string(),
                    target: target.to_string(),
                    param,
                });
            }
        }
    }
    Ok(())
}
