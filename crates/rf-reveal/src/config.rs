//! Reveal configuration
//!
//! A config names a scenario (or carries a full custom topology), the tick
//! pacing, and where assets live. YAML and JSON are both accepted.
//!
//! ```yaml
//! scenario: full_survivor
//! timing:
//!   profile: turbo
//!   tick_interval_ms: 50
//!   steps_per_phase: 10
//! assets:
//!   root: ./images
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RevealError, RevealResult};
use crate::pool::DirectorySource;
use crate::scenario::{self, PLACEHOLDER_PREFIX};
use crate::sequencer::RevealSequencer;
use crate::timing::TimingConfig;
use crate::topology::Topology;

fn default_extension() -> String {
    "png".to_string()
}

fn default_placeholder() -> String {
    PLACEHOLDER_PREFIX.to_string()
}

/// Where and how candidates are listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory holding one sub-directory per category
    pub root: PathBuf,
    /// File extension of candidate files (case-insensitive)
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Prefix of placeholder entries excluded from perk pools
    #[serde(default = "default_placeholder")]
    pub placeholder_prefix: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("images"),
            extension: default_extension(),
            placeholder_prefix: default_placeholder(),
        }
    }
}

/// Complete reveal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Built-in scenario name; ignored when `topology` is set
    #[serde(default)]
    pub scenario: Option<String>,
    /// Custom topology
    #[serde(default)]
    pub topology: Option<Topology>,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

impl RevealConfig {
    pub fn for_scenario(name: impl Into<String>) -> Self {
        Self {
            scenario: Some(name.into()),
            topology: None,
            timing: TimingConfig::default(),
            assets: AssetConfig::default(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> RevealResult<Self> {
        serde_yml::from_str(yaml).map_err(|e| RevealError::Config(format!("invalid YAML: {e}")))
    }

    pub fn from_json_str(json: &str) -> RevealResult<Self> {
        serde_json::from_str(json).map_err(|e| RevealError::Config(format!("invalid JSON: {e}")))
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let mut config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            other => {
                return Err(RevealError::Config(format!(
                    "unsupported config format: {}",
                    other.unwrap_or("<none>")
                )));
            }
        };

        // Relative asset roots are relative to the config file
        if config.assets.root.is_relative() {
            if let Some(dir) = path.parent() {
                config.assets.root = dir.join(&config.assets.root);
            }
        }

        log::debug!("loaded reveal config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> RevealResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RevealError::Config(e.to_string()))
    }

    /// Resolve the topology, applying the configured placeholder prefix
    pub fn topology(&self) -> RevealResult<Topology> {
        let mut topology = match (&self.topology, &self.scenario) {
            (Some(topology), _) => topology.clone(),
            (None, Some(name)) => scenario::by_name(name)
                .ok_or_else(|| RevealError::Config(format!("unknown scenario '{name}'")))?,
            (None, None) => {
                return Err(RevealError::Config(
                    "config names neither a scenario nor a topology".to_string(),
                ));
            }
        };

        for slot in &mut topology.slots {
            if slot.pool.exclude_prefix.is_some() {
                slot.pool.exclude_prefix = Some(self.assets.placeholder_prefix.clone());
            }
        }

        Ok(topology)
    }

    pub fn source(&self) -> DirectorySource {
        DirectorySource::new(&self.assets.root).with_extension(&self.assets.extension)
    }

    /// Directory-backed sequencer for this config
    pub fn build_sequencer(&self) -> RevealResult<RevealSequencer<DirectorySource>> {
        let sequencer = RevealSequencer::new(self.topology()?, self.source())?;
        Ok(sequencer.with_timing(self.timing.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimingProfile;

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
scenario: full_survivor
timing:
  profile: turbo
  tick_interval_ms: 50
  steps_per_phase: 10
assets:
  root: /srv/images
"#;
        let config = RevealConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.timing.profile, TimingProfile::Turbo);
        assert_eq!(config.assets.extension, "png");
        assert_eq!(config.assets.placeholder_prefix, "helpLoading");
        assert_eq!(config.topology().unwrap().phases.len(), 4);
    }

    #[test]
    fn test_defaults_from_minimal_json() {
        let config = RevealConfig::from_json_str(r#"{ "scenario": "killer" }"#).unwrap();
        assert_eq!(config.timing, TimingConfig::normal());
        assert_eq!(config.assets.root, PathBuf::from("images"));
    }

    #[test]
    fn test_unknown_scenario() {
        let config = RevealConfig::for_scenario("maps");
        assert!(matches!(config.topology(), Err(RevealError::Config(_))));
        assert!(matches!(
            RevealConfig::from_json_str("{ \"timing\": 3 }"),
            Err(RevealError::Config(_))
        ));
    }

    #[test]
    fn test_huge_step_count_does_not_overflow() {
        let yaml = "scenario: killer_perks\ntiming:\n  tick_interval_ms: 0\n  steps_per_phase: 4294967295\n";
        let config = RevealConfig::from_yaml_str(yaml).unwrap();
        let seq = config.build_sequencer().unwrap();
        assert_eq!(seq.timing().ticks_per_phase(), u32::MAX);
        assert_eq!(seq.timing().phase_duration(), std::time::Duration::ZERO);
    }

    #[test]
    fn test_placeholder_override() {
        let mut config = RevealConfig::for_scenario("survivor_perks");
        config.assets.placeholder_prefix = "loading".to_string();
        let topo = config.topology().unwrap();
        assert!(
            topo.slots
                .iter()
                .all(|s| s.pool.exclude_prefix.as_deref() == Some("loading"))
        );
    }

    #[test]
    fn test_custom_topology_roundtrip() {
        let mut config = RevealConfig::for_scenario("killer");
        config.topology = Some(scenario::killer());
        let json = config.to_json().unwrap();
        let parsed = RevealConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.topology().unwrap(), scenario::killer());
    }

    #[test]
    fn test_load_resolves_relative_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reveal.yml");
        fs::write(&path, "scenario: killer_perks\nassets:\n  root: assets\n").unwrap();

        let config = RevealConfig::load(&path).unwrap();
        assert_eq!(config.assets.root, dir.path().join("assets"));
        assert!(config.build_sequencer().is_ok());

        let bad = dir.path().join("reveal.toml");
        fs::write(&bad, "").unwrap();
        assert!(matches!(RevealConfig::load(&bad), Err(RevealError::Config(_))));
    }
}
