//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ConsoleConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{RouteTree, StructuralError};

/// Route table shipped with the console.
const BUILTIN_ROUTES: &str = include_str!("../../routes/console.toml");

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    Structural(StructuralError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::Structural(e) => write!(f, "Invalid route table: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<StructuralError> for ConfigError {
    fn from(e: StructuralError) -> Self {
        ConfigError::Structural(e)
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<ConsoleConfig, ConfigError> {
    let config: ConsoleConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// The console's own route table.
pub fn load_builtin() -> Result<ConsoleConfig, ConfigError> {
    parse_config(BUILTIN_ROUTES)
}

/// Compile the route table of a loaded configuration.
pub fn build_routes(config: &ConsoleConfig) -> Result<RouteTree, ConfigError> {
    let tree = RouteTree::build(&config.routes)?;
    tracing::info!(nodes = tree.len(), "Route table compiled");
    Ok(tree)
}
