//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level pathwise configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathwiseConfig {
    /// Graph document file or directory. `None` uses the built-in seed graph.
    #[serde(default)]
    pub graph_path: Option<PathBuf>,
    /// Default traversal depth for learning progressions.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Target grade used when a request does not name one.
    #[serde(default)]
    pub default_target_grade: Option<String>,
    #[serde(default = "default_true")]
    pub check_literacy: bool,
    #[serde(default = "default_true")]
    pub check_motivation: bool,
    #[serde(default)]
    pub check_standards_alignment: bool,
    /// Output directory for saved evaluations.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_max_depth() -> usize {
    5
}
fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./pathwise-results")
}

impl Default for PathwiseConfig {
    fn default() -> Self {
        Self {
            graph_path: None,
            max_depth: default_max_depth(),
            default_target_grade: None,
            check_literacy: true,
            check_motivation: true,
            check_standards_alignment: false,
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `pathwise.toml` in the current directory
/// 2. `~/.config/pathwise/config.toml`
///
/// Environment variable overrides: `PATHWISE_GRAPH_PATH`, `PATHWISE_MAX_DEPTH`.
pub fn load_config() -> Result<PathwiseConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PathwiseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pathwise.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => PathwiseConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML config string and expand `${VAR}` references in `graph_path`.
pub fn parse_config_str(content: &str) -> Result<PathwiseConfig> {
    let mut config: PathwiseConfig = toml::from_str(content)?;
    config.graph_path = config
        .graph_path
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
    Ok(config)
}

fn apply_env_overrides(config: &mut PathwiseConfig) -> Result<()> {
    if let Ok(path) = std::env::var("PATHWISE_GRAPH_PATH") {
        if !path.trim().is_empty() {
            config.graph_path = Some(PathBuf::from(path));
        }
    }

    if let Ok(depth) = std::env::var("PATHWISE_MAX_DEPTH") {
        config.max_depth = depth
            .trim()
            .parse()
            .with_context(|| format!("invalid PATHWISE_MAX_DEPTH: '{depth}'"))?;
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pathwise"))
}
