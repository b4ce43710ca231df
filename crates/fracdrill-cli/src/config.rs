//! Drill settings: TOML file, environment overrides, and command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fracdrill_core::model::{DenominatorRange, GenerationConfig, Operation, QuestionType};

/// Top-level fracdrill settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillSettings {
    /// Operations to draw from.
    #[serde(default = "default_operations")]
    pub operations: Vec<Operation>,
    /// Denominator bound tag ("1-5", "1-10", "1-12", "1-15").
    #[serde(default)]
    pub denominator_range: DenominatorRange,
    /// "missing-result", "missing-operand" or "both".
    #[serde(default)]
    pub question_type: QuestionType,
    /// Where to keep the running tally between invocations.
    #[serde(default)]
    pub progress_file: Option<PathBuf>,
}

fn default_operations() -> Vec<Operation> {
    vec![Operation::Addition]
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            operations: default_operations(),
            denominator_range: DenominatorRange::default(),
            question_type: QuestionType::default(),
            progress_file: None,
        }
    }
}

/// Values given on the command line; each one replaces the file setting.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub operations: Option<String>,
    pub range: Option<String>,
    pub question_type: Option<String>,
}

impl DrillSettings {
    /// Build the generation config, applying command-line overrides.
    pub fn generation_config(&self, overrides: &Overrides) -> Result<GenerationConfig> {
        let operations = match &overrides.operations {
            Some(list) => parse_operations(list)?,
            None => self.operations.clone(),
        };
        let range = match &overrides.range {
            Some(r) => r.parse::<DenominatorRange>().map_err(|e: String| anyhow::anyhow!(e))?,
            None => self.denominator_range,
        };
        let question_type = match &overrides.question_type {
            Some(q) => q.parse::<QuestionType>().map_err(|e: String| anyhow::anyhow!(e))?,
            None => self.question_type,
        };
        GenerationConfig::new(operations, range, question_type)
            .context("invalid generation settings")
    }
}

/// Parse a comma-separated operation list; `all` enables every operation.
pub fn parse_operations(list: &str) -> Result<Vec<Operation>> {
    if list.trim().eq_ignore_ascii_case("all") {
        return Ok(Operation::ALL.to_vec());
    }
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Operation>().map_err(|e| anyhow::anyhow!(e)))
        .collect()
}

/// Load settings from well-known paths.
///
/// Search order:
/// 1. `fracdrill.toml` in the current directory
/// 2. `~/.config/fracdrill/config.toml`
///
/// Environment variable overrides: `FRACDRILL_RANGE`, `FRACDRILL_QUESTION_TYPE`.
pub fn load_settings_from(path: Option<&Path>) -> Result<DrillSettings> {
    let settings_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("fracdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let settings = match settings_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading settings");
            parse_settings(&path)?
        }
        None => DrillSettings::default(),
    };

    apply_env_overrides(settings, |key| std::env::var(key).ok())
}

fn parse_settings(path: &Path) -> Result<DrillSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<DrillSettings>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn apply_env_overrides(
    mut settings: DrillSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<DrillSettings> {
    if let Some(range) = lookup("FRACDRILL_RANGE") {
        settings.denominator_range = range
            .parse::<DenominatorRange>()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("invalid FRACDRILL_RANGE")?;
    }
    if let Some(question_type) = lookup("FRACDRILL_QUESTION_TYPE") {
        settings.question_type = question_type
            .parse::<QuestionType>()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("invalid FRACDRILL_QUESTION_TYPE")?;
    }
    Ok(settings)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("fracdrill"))
}
