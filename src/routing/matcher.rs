//! Path matching against a route tree.
//!
//! # Responsibilities
//! - Walk the tree depth-first, consuming request components
//! - Bind dynamic `:param` components
//! - Follow redirects from the root, bounded by a hop limit
//!
//! # Design Decisions
//! - Declaration order decides ties: siblings are tried first to last and
//!   the first complete match wins. A sibling whose pattern matches but whose
//!   subtree cannot finish the match is abandoned for the next one.
//! - At the match target a redirect beats index children, and index children
//!   beat the node's own view.
//! - Exceeding the hop limit is an error, never a silent truncation.
//! - No regex; cost is bounded by tree size times hop limit.

use std::collections::BTreeMap;

use crate::routing::builder::RouteTree;
use crate::routing::error::{MatchError, NotFoundError, RedirectLoopError};
use crate::routing::node::{NodeId, RouteNode, ViewRef};
use crate::routing::pattern::{encode_component, join_path, split_path};

/// Redirect hops allowed per navigation unless configured otherwise.
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;

/// Successful resolution of a path.
///
/// Borrows the tree it was matched against; discard it once the navigation
/// is handled.
#[derive(Debug, Clone)]
pub struct RouteMatch<'t> {
    tree: &'t RouteTree,
    /// Root-to-target nodes, each with the number of path components
    /// consumed once that node matched.
    chain: Vec<(NodeId, usize)>,
    components: Vec<String>,
    params: BTreeMap<String, String>,
    view: &'t ViewRef,
    redirected_from: Vec<String>,
}

impl<'t> RouteMatch<'t> {
    pub fn tree(&self) -> &'t RouteTree {
        self.tree
    }

    /// Matched node ids, root first.
    pub fn chain(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.chain.iter().map(|(id, _)| *id)
    }

    /// Matched nodes, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &'t RouteNode> + '_ {
        let tree = self.tree;
        self.chain.iter().map(move |(id, _)| tree.node(*id))
    }

    pub fn target_id(&self) -> NodeId {
        self.chain.last().map(|(id, _)| *id).unwrap_or(NodeId::ROOT)
    }

    /// The node that rendered.
    pub fn target(&self) -> &'t RouteNode {
        self.tree.node(self.target_id())
    }

    pub fn view(&self) -> &'t ViewRef {
        self.view
    }

    /// Views of the matched ancestors, outermost first.
    pub fn layouts(&self) -> Vec<&'t ViewRef> {
        let tree = self.tree;
        let len = self.chain.len().saturating_sub(1);
        self.chain[..len]
            .iter()
            .filter_map(|(id, _)| tree.node(*id).view())
            .collect()
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Normalized path that finally resolved, after any redirects.
    pub fn path(&self) -> String {
        join_path(&self.components)
    }

    /// Concrete path up to the chain entry at `index`.
    pub(crate) fn path_at(&self, index: usize) -> String {
        let consumed = self.chain.get(index).map(|(_, c)| *c).unwrap_or(0);
        join_path(&self.components[..consumed])
    }

    pub(crate) fn chain_len(&self) -> usize {
        self.chain.len()
    }

    pub(crate) fn node_at(&self, index: usize) -> &'t RouteNode {
        self.tree.node(self.chain[index].0)
    }

    /// Every path that redirected on the way here, in order.
    pub fn redirected_from(&self) -> &[String] {
        &self.redirected_from
    }
}

/// Resolve `path` against `tree`, following at most `redirect_limit` redirects.
pub fn match_path<'t>(
    tree: &'t RouteTree,
    path: &str,
    redirect_limit: usize,
) -> Result<RouteMatch<'t>, MatchError> {
    let mut current = join_path(&split_path(path));
    let mut redirected_from = Vec::new();

    loop {
        let components = split_path(&current);
        let mut walk = Walk {
            tree,
            chain: vec![(NodeId::ROOT, 0)],
            params: Vec::new(),
        };

        match walk.resolve(NodeId::ROOT, &components, 0) {
            Some(Resolution::Render(view)) => {
                tracing::trace!(path = %current, view = %view, "Route matched");
                return Ok(RouteMatch {
                    tree,
                    chain: walk.chain,
                    components: components.iter().map(|c| c.to_string()).collect(),
                    params: walk.params.into_iter().collect(),
                    view,
                    redirected_from,
                });
            }
            Some(Resolution::Redirect(target)) => {
                tracing::debug!(from = %current, to = %target, "Following redirect");
                redirected_from.push(current);
                if redirected_from.len() > redirect_limit {
                    let mut hops = redirected_from;
                    hops.push(target);
                    return Err(RedirectLoopError {
                        limit: redirect_limit,
                        hops,
                    }
                    .into());
                }
                current = target;
            }
            None => return Err(NotFoundError { path: current }.into()),
        }
    }
}

impl RouteTree {
    /// [`match_path`] with [`DEFAULT_REDIRECT_LIMIT`].
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<'_>, MatchError> {
        match_path(self, path, DEFAULT_REDIRECT_LIMIT)
    }
}

enum Resolution<'t> {
    Render(&'t ViewRef),
    Redirect(String),
}

struct Walk<'t> {
    tree: &'t RouteTree,
    chain: Vec<(NodeId, usize)>,
    params: Vec<(String, String)>,
}

impl<'t> Walk<'t> {
    /// `node` has matched and `consumed` components are used up; resolve the rest.
    fn resolve(&mut self, node: NodeId, input: &[&str], consumed: usize) -> Option<Resolution<'t>> {
        let tree = self.tree;
        let current = tree.node(node);
        let rest = &input[consumed..];

        if rest.is_empty() {
            if let Some(target) = current.redirect() {
                return Some(Resolution::Redirect(self.substitute(target)));
            }
            for &child in current.children() {
                if tree.node(child).pattern().is_empty() {
                    if let Some(found) = self.enter(child, input, consumed) {
                        return Some(found);
                    }
                }
            }
            return current.view().map(Resolution::Render);
        }

        for &child in current.children() {
            if let Some(found) = self.enter(child, input, consumed) {
                return Some(found);
            }
        }
        None
    }

    fn enter(&mut self, child: NodeId, input: &[&str], consumed: usize) -> Option<Resolution<'t>> {
        let mark = self.params.len();
        let used = self
            .tree
            .node(child)
            .pattern()
            .match_prefix(&input[consumed..], &mut self.params)?;

        self.chain.push((child, consumed + used));
        if let Some(found) = self.resolve(child, input, consumed + used) {
            return Some(found);
        }
        self.chain.pop();
        self.params.truncate(mark);
        None
    }

    fn substitute(&self, target: &str) -> String {
        let components: Vec<String> = split_path(target)
            .into_iter()
            .map(|c| match c.strip_prefix(':') {
                Some(name) => self
                    .params
                    .iter()
                    .rev()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| encode_component(v))
                    .unwrap_or_else(|| c.to_string()),
                None => c.to_string(),
            })
            .collect();
        join_path(&components)
    }
}
