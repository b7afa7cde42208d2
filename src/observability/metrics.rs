//! Metrics collection.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by `outcome`
//! - `router_redirects_total` (counter): redirect hops followed
//! - `router_tree_nodes` (gauge): nodes in the active route tree

/// Count one navigation.
pub fn record_navigation(outcome: &'static str) {
    metrics::counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_redirects(hops: usize) {
    if hops > 0 {
        metrics::counter!("router_redirects_total").increment(hops as u64);
    }
}

pub fn record_tree_size(nodes: usize) {
    metrics::gauge!("router_tree_nodes").set(nodes as f64);
}
