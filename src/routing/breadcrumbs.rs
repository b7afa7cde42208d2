//! Breadcrumb trail derivation.
//!
//! Only labeled nodes appear in the trail; structural grouping nodes stay
//! invisible. The iterator is lazy and `Clone`, so a trail can be walked any
//! number of times from the same match.

use serde::Serialize;

use crate::routing::matcher::RouteMatch;

/// One entry of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    /// Concrete path (parameters substituted) up to the labeled node.
    pub path: String,
}

impl Breadcrumb {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Lazy root-to-leaf trail over a [`RouteMatch`].
#[derive(Debug, Clone)]
pub struct Breadcrumbs<'m, 't> {
    matched: &'m RouteMatch<'t>,
    next: usize,
}

/// Trail for `matched`.
pub fn resolve_breadcrumbs<'m, 't>(matched: &'m RouteMatch<'t>) -> Breadcrumbs<'m, 't> {
    Breadcrumbs { matched, next: 0 }
}

impl<'t> RouteMatch<'t> {
    pub fn breadcrumbs(&self) -> Breadcrumbs<'_, 't> {
        resolve_breadcrumbs(self)
    }
}

impl Iterator for Breadcrumbs<'_, '_> {
    type Item = Breadcrumb;

    fn next(&mut self) -> Option<Breadcrumb> {
        while self.next < self.matched.chain_len() {
            let index = self.next;
            self.next += 1;
            if let Some(label) = self.matched.node_at(index).breadcrumb() {
                return Some(Breadcrumb::new(label, self.matched.path_at(index)));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.matched.chain_len() - self.next))
    }
}
