use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub aws: Option<AwsConfig>,
    pub scaling: ScalingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region override; the ambient AWS credential chain decides when unset.
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingConfig {
    /// Seconds between readiness checks during a downscale wait
    pub poll_interval_secs: u64,
    /// Cap on readiness checks; polls until ready when unset
    pub max_attempts: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws: Some(AwsConfig { region: None }),
            scaling: ScalingConfig {
                poll_interval_secs: 10,
                max_attempts: None,
            },
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .asgctl.toml in current dir, then ~/.config/asgctl/config.toml
            let local = PathBuf::from(".asgctl.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("asgctl").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".asgctl.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content).with_context(|| {
                let mut err = format!("Failed to parse config: {}", config_path.display());
                err.push_str("\n  Common issues:");
                err.push_str("\n    - Invalid TOML syntax");
                err.push_str("\n    - Incorrect value types");
                err.push_str("\n  Tip: Run 'asgctl init' to create a new config file");
                err
            })?;
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'asgctl init' to create a config file.");
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.aws.is_some());
        assert_eq!(config.scaling.poll_interval_secs, 10);
        assert!(config.scaling.max_attempts.is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let mut config = Config::default();
        config.scaling.poll_interval_secs = 3;
        config.scaling.max_attempts = Some(20);
        assert!(config.save(&config_path).is_ok());
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.scaling.poll_interval_secs, 3);
        assert_eq!(loaded.scaling.max_attempts, Some(20));
    }

    #[test]
    fn test_config_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let fake_path = temp_dir.path().join("nonexistent.toml");

        // Should return default config
        let config = Config::load(Some(&fake_path)).unwrap();
        assert_eq!(config.scaling.poll_interval_secs, 10);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid toml content {").unwrap();

        let result = Config::load(Some(&config_path));
        assert!(result.is_err());
    }

    #[test]
    fn test_init_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("init_test.toml");

        assert!(init_config(&config_path).is_ok());
        assert!(config_path.exists());

        // Verify it's valid TOML
        let config = Config::load(Some(&config_path)).unwrap();
        assert!(config.aws.is_some());
    }
}
