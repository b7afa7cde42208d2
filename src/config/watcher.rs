//! Route table watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use notify::{Watcher, RecursiveMode, Event, RecommendedWatcher, Config};
use tokio::sync::mpsc;
use crate::config::loader::{build_routes, load_config, ConfigError};
use crate::config::schema::ConsoleConfig;
use crate::navigation::SharedRoutes;
use crate::observability::metrics;

/// Monitors the configuration file and publishes freshly built route trees.
pub struct ConfigWatcher {
    path: PathBuf,
    routes: SharedRoutes,
    update_tx: mpsc::UnboundedSender<ConsoleConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher publishing into `routes`.
    ///
    /// Returns the watcher and a receiver notified after each successful reload.
    pub fn new(
        path: &Path,
        routes: SharedRoutes,
    ) -> (Self, mpsc::UnboundedReceiver<ConsoleConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        let watcher = Self {
            path: path.to_path_buf(),
            routes,
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Load, build and publish the file once.
    ///
    /// On failure the current tree stays in place.
    pub fn reload(&self) -> Result<ConsoleConfig, ConfigError> {
        reload(&self.path, &self.routes)
    }

    /// Start watching the file in a background thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let routes = Arc::clone(&self.routes);

        let mut watcher = RecommendedWatcher::new(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Route table change detected, reloading...");
                        match reload(&path, &routes) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config);
                            }
                            Err(e) => {
                                tracing::error!("Failed to reload route table: {}. Keeping current routes.", e);
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            }
        }, Config::default().with_poll_interval(Duration::from_secs(2)))?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route table watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, routes: &SharedRoutes) -> Result<ConsoleConfig, ConfigError> {
    let config = load_config(path)?;
    let tree = build_routes(&config)?;
    metrics::record_tree_size(tree.len());
    routes.store(Arc::new(tree));
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arc_swap::ArcSwap;
    use crate::config::schema::RouteSpec;
    use crate::routing::RouteTree;

    fn shared() -> SharedRoutes {
        let tree = RouteTree::build(&[RouteSpec::new("/old").view("Old")]).unwrap();
        Arc::new(ArcSwap::from_pointee(tree))
    }

    #[test]
    fn test_reload_swaps_tree() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[[routes]]\npath = \"/new\"\nview = \"New\"\n").unwrap();

        let routes = shared();
        let (watcher, _rx) = ConfigWatcher::new(file.path(), Arc::clone(&routes));
        watcher.reload().unwrap();

        assert!(routes.load().resolve("/new").is_ok());
        assert!(routes.load().resolve("/old").is_err());
    }

    #[test]
    fn test_failed_reload_keeps_tree() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[[routes]]\npath = \"/dead\"\n").unwrap();

        let routes = shared();
        let (watcher, _rx) = ConfigWatcher::new(file.path(), Arc::clone(&routes));
        assert!(matches!(watcher.reload(), Err(ConfigError::Structural(_))));

        assert!(routes.load().resolve("/old").is_ok());
    }
}
