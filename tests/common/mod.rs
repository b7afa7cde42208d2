//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use console_router::config::{build_routes, load_builtin};
use console_router::navigation::{NavigationController, RenderLayer, ResolvedView};
use console_router::routing::{NotFoundError, RedirectLoopError, RouteTree};

/// What a render layer was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    View(ResolvedView),
    NotFound(String),
    Fatal(RedirectLoopError),
}

/// Render layer that records every call.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    pub events: Arc<Mutex<Vec<Rendered>>>,
}

impl RecordingLayer {
    pub fn take(&self) -> Vec<Rendered> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl RenderLayer for RecordingLayer {
    fn render(&mut self, view: &ResolvedView) {
        self.events.lock().unwrap().push(Rendered::View(view.clone()));
    }

    fn not_found(&mut self, error: &NotFoundError) {
        self.events.lock().unwrap().push(Rendered::NotFound(error.path.clone()));
    }

    fn configuration_error(&mut self, error: &RedirectLoopError) {
        self.events.lock().unwrap().push(Rendered::Fatal(error.clone()));
    }
}

/// The built-in console route tree.
pub fn console_tree() -> RouteTree {
    build_routes(&load_builtin().unwrap()).unwrap()
}

/// Controller over the built-in console table.
pub fn console_controller() -> NavigationController {
    let config = load_builtin().unwrap();
    let tree = build_routes(&config).unwrap();
    NavigationController::new(tree, config.router)
}

pub fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
