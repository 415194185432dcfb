use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use streakwise::engine::{ScoreBuckets, StreakPolicy, DEFAULT_MOTIVATION_GAP, DEFAULT_WEEKS};
use streakwise::models::TrackedModule;

fn default_true() -> bool {
    true
}
fn default_weeks() -> u32 {
    DEFAULT_WEEKS
}
fn default_motivation_gap() -> u32 {
    DEFAULT_MOTIVATION_GAP
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Every invocation counts as a login for today.
    #[serde(default = "default_true")]
    pub record_logins: bool,
    /// Minimum count for a day to qualify, keyed by module name. Unlisted modules need 1.
    #[serde(default)]
    pub daily_minimum: BTreeMap<String, u32>,
}

impl TrackingConfig {
    pub fn minimum_for(&self, module: TrackedModule) -> u32 {
        self.daily_minimum.get(module.as_str()).copied().unwrap_or(1)
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            record_logins: true,
            daily_minimum: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    #[serde(default)]
    pub thresholds: ScoreBuckets,
    /// Per-module overrides of `thresholds`.
    #[serde(default)]
    pub modules: BTreeMap<String, ScoreBuckets>,
}

impl HeatmapConfig {
    pub fn buckets_for(&self, module: TrackedModule) -> ScoreBuckets {
        self.modules.get(module.as_str()).copied().unwrap_or(self.thresholds)
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            weeks: default_weeks(),
            thresholds: ScoreBuckets::default(),
            modules: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Show "N days to beat your best" once the streak is this close.
    #[serde(default = "default_motivation_gap")]
    pub motivation_gap: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            motivation_gap: default_motivation_gap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub streak: StreakPolicy,
    #[serde(default)]
    pub heatmap: HeatmapConfig,
    #[serde(default)]
    pub labels: LabelConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "streakwise")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("streakwise.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("Parsing config.toml")?;
        if config.heatmap.weeks == 0 {
            bail!("[heatmap] weeks must be at least 1");
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(path)
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
