use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::warn;

use crate::error::ErrorCode;

/// Environment variable that overrides `numeric.pivot_tolerance`.
pub const PIVOT_TOLERANCE_ENV: &str = "MATGRAPH_PIVOT_TOLERANCE";

/// Relative pivot threshold per unit of `max(rows, cols) * max|entry|`:
/// machine epsilon, the same scale as numpy's `matrix_rank` default.
pub const RELATIVE_PIVOT_TOLERANCE: f64 = f64::EPSILON;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub numeric: NumericConfig,
}

/// Tolerances for the elimination-based operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericConfig {
    /// Absolute threshold below which a pivot counts as zero.
    ///
    /// `None` selects the relative default
    /// `max(rows, cols) * max|entry| * RELATIVE_PIVOT_TOLERANCE`.
    #[serde(default)]
    pub pivot_tolerance: Option<f64>,
    /// Decimal places used by [`crate::Matrix::rounded`] callers.
    #[serde(default = "default_display_precision")]
    pub display_precision: usize,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: None,
            display_precision: default_display_precision(),
        }
    }
}

impl NumericConfig {
    /// Pivot threshold for a `rows x cols` matrix whose largest absolute
    /// entry is `max_abs`.
    #[must_use]
    pub fn tolerance_for(&self, rows: usize, cols: usize, max_abs: f64) -> f64 {
        self.pivot_tolerance
            .unwrap_or_else(|| rows.max(cols) as f64 * max_abs * RELATIVE_PIVOT_TOLERANCE)
    }
}

/// Load an [`EngineConfig`] from a TOML file, falling back to defaults when
/// the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<EngineConfig>(&content)
        .with_context(|| {
            format!(
                "Failed to parse {} ({})",
                path.display(),
                ErrorCode::ConfigParseError
            )
        })
}

/// Load `<config_dir>/matgraph/config.toml`, or defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<EngineConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(EngineConfig::default());
    };

    load_config(&config_dir.join("matgraph/config.toml"))
}

/// Load `path` and apply the [`PIVOT_TOLERANCE_ENV`] override.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn resolve_config(path: &Path) -> Result<EngineConfig> {
    let config = load_config(path)?;
    Ok(apply_env_override(config, env::var(PIVOT_TOLERANCE_ENV).ok()))
}

fn apply_env_override(mut config: EngineConfig, env_tolerance: Option<String>) -> EngineConfig {
    let Some(raw) = env_tolerance else {
        return config;
    };

    match raw.trim().parse::<f64>() {
        Ok(tol) if tol.is_finite() && tol >= 0.0 => {
            config.numeric.pivot_tolerance = Some(tol);
        }
        _ => {
            warn!(value = %raw, "ignoring invalid {PIVOT_TOLERANCE_ENV}");
        }
    }
    config
}

const fn default_display_precision() -> usize {
    4
}
