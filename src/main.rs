//! Console Router CLI
//!
//! Resolves analytics console paths against a route table and prints what the
//! rendering layer would receive.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml ──▶ config ──▶ routing::builder ──▶ RouteTree (immutable)
//!                     ▲                                  │
//!                     │ watcher (hot reload)             ▼
//!                     │                     navigation::controller
//!   path / URL ───────┼──────────────────▶  ├─ routing::matcher
//!                     │                     ├─ routing::breadcrumbs
//!                     │                     ▼
//!                     │              NavigationOutcome ──▶ stdout (JSON)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use console_router::config::{self, watcher::ConfigWatcher, ConsoleConfig};
use console_router::navigation::{NavigationController, NavigationOutcome};
use console_router::observability::logging;
use console_router::routing::RouteTree;

#[derive(Parser)]
#[command(name = "console-router")]
#[command(about = "Resolve analytics console routes", long_about = None)]
struct Cli {
    /// Route table (TOML). Defaults to the built-in console table.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve paths or URLs and print each outcome as JSON
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the compiled route tree
    Tree,
    /// Validate the route table and every redirect target
    Check,
    /// Re-resolve a path whenever the route table file changes
    Watch { path: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_builtin()?,
    };
    logging::init_logging(&config.observability)?;

    tracing::info!(
        source = %cli.config.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "built-in".into()),
        redirect_limit = config.router.redirect_limit,
        "Configuration loaded"
    );

    let tree = config::build_routes(&config)?;
    let ConsoleConfig { router, .. } = config;
    let mut nav = NavigationController::new(tree, router);

    match cli.command {
        Commands::Resolve { paths } => {
            for path in paths {
                let outcome = resolve(&mut nav, &path)?;
                print_outcome(&outcome)?;
            }
        }
        Commands::Tree => {
            print_tree(&nav.routes().load());
        }
        Commands::Check => {
            let issues = nav.check_redirects();
            for issue in &issues {
                eprintln!("{} redirects to {}: {}", issue.route, issue.target, issue.error);
            }
            if !issues.is_empty() {
                return Err(format!("{} redirect(s) do not resolve", issues.len()).into());
            }
            println!("Route table OK ({} routes)", nav.routes().load().len() - 1);
        }
        Commands::Watch { path } => {
            let Some(file) = cli.config else {
                return Err("watch needs --config".into());
            };
            let (watcher, mut updates) = ConfigWatcher::new(&file, nav.routes());
            let _watcher = watcher.run()?;

            print_outcome(&resolve(&mut nav, &path)?)?;
            loop {
                tokio::select! {
                    update = updates.recv() => {
                        if update.is_none() {
                            break;
                        }
                        print_outcome(&resolve(&mut nav, &path)?)?;
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted, stopping watcher");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

fn resolve(
    nav: &mut NavigationController,
    target: &str,
) -> Result<NavigationOutcome, Box<dyn std::error::Error>> {
    if target.contains("://") {
        Ok(nav.navigate_url(target)?)
    } else {
        Ok(nav.navigate(target))
    }
}

fn print_outcome(outcome: &NavigationOutcome) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

fn print_tree(tree: &RouteTree) {
    for (id, node) in tree.iter().skip(1) {
        let depth = tree.lineage(id).len() - 2;
        let mut line = format!("{}{}", "  ".repeat(depth), node.full_pattern());
        if let Some(name) = node.name() {
            line.push_str(&format!(" [{}]", name));
        }
        if let Some(view) = node.view() {
            line.push_str(&format!(" view={}", view));
        }
        if let Some(target) = node.redirect() {
            line.push_str(&format!(" redirect={}", target));
        }
        if let Some(label) = node.breadcrumb() {
            line.push_str(&format!(" crumb=\"{}\"", label));
        }
        println!("{}", line);
    }
}
