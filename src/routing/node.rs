//! Route tree data model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::routing::pattern::Pattern;

/// Opaque handle to a renderable view.
///
/// Resolved by the host's view registry; the router never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRef(String);

impl ViewRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a node inside its [`RouteTree`](crate::routing::RouteTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The implicit root every tree starts from.
    pub const ROOT: NodeId = NodeId(0);
}

/// One node of the route tree.
///
/// Nodes live in the tree's arena; `parent` and `children` are indices into it.
#[derive(Debug, Clone)]
pub struct RouteNode {
    pub(crate) pattern: Pattern,
    pub(crate) full_pattern: String,
    pub(crate) name: Option<String>,
    pub(crate) view: Option<ViewRef>,
    pub(crate) redirect: Option<String>,
    pub(crate) breadcrumb: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl RouteNode {
    /// Pattern relative to the parent node.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Pattern from the root, e.g. `/dashboard/projects/:projectId`.
    pub fn full_pattern(&self) -> &str {
        &self.full_pattern
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn view(&self) -> Option<&ViewRef> {
        self.view.as_ref()
    }

    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn breadcrumb(&self) -> Option<&str> {
        self.breadcrumb.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// No view of its own: only groups children or redirects.
    pub fn is_structural(&self) -> bool {
        self.view.is_none()
    }
}
