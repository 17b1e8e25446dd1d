//! Configuration file handling.
//!
//! This module loads and validates the two YAML configuration documents:
//! run settings (how often and how many times to poll) and the weather
//! source registry (where to poll and how to dig the temperature out of
//! each response).

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Run settings: cycle count and inter-cycle delay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// How many polling cycles to run.
    pub times_to_check: u64,

    /// Seconds to sleep between cycles. Fractional values are allowed.
    #[serde(default)]
    pub check_interval_in_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            times_to_check: 1,
            check_interval_in_seconds: 60.0,
        }
    }
}

/// One configured weather source (API endpoint).
///
/// Immutable after load; the registry is read-only for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSource {
    /// Unique, non-empty identifier; also the column name in the results file.
    pub name: String,

    /// Request URL.
    pub url: String,

    /// Query parameters sent with the request.
    #[serde(default)]
    pub params: HashMap<String, String>,

    /// HTTP headers sent with the request.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Ordered key path used to extract the temperature from the response.
    ///
    /// An empty path is legal and yields a missing reading every cycle.
    #[serde(default)]
    pub result_keys: Vec<String>,
}

/// On-disk shape of the sources document.
#[derive(Debug, Deserialize)]
struct SourcesFile {
    weather_resources: Vec<WeatherSource>,
}

/// Full validated configuration handed to the checker.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub sources: Vec<WeatherSource>,
}

impl Config {
    /// Load and validate configuration from the two YAML documents.
    pub fn load(settings_path: &Path, sources_path: &Path) -> Result<Self> {
        let settings = load_settings(settings_path)?;
        let sources = load_sources(sources_path)?;
        let config = Self { settings, sources };
        config.validate()?;
        Ok(config)
    }

    /// Source names in ascending byte-wise order.
    ///
    /// This is the column order of the results file header, and every data
    /// row is written in the same order.
    pub fn sorted_source_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sources.iter().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over the settings file, but only when
    /// explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(times) = args.times {
            self.settings.times_to_check = times;
        }
        if let Some(interval) = args.interval {
            self.settings.check_interval_in_seconds = interval;
        }
    }

    /// Reject configurations that would corrupt a run: duplicate or empty
    /// source names and empty URLs. Anything else is the loader's problem.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();

        for source in &self.sources {
            if source.name.is_empty() {
                bail!("source with url '{}' has an empty name", source.url);
            }
            if source.url.is_empty() {
                bail!("source '{}' has an empty url", source.name);
            }
            if !seen.insert(source.name.as_str()) {
                bail!("duplicate source name: '{}'", source.name);
            }
        }

        if self.settings.check_interval_in_seconds < 0.0
            || !self.settings.check_interval_in_seconds.is_finite()
        {
            bail!(
                "check_interval_in_seconds must be a non-negative number, got {}",
                self.settings.check_interval_in_seconds
            );
        }

        Ok(())
    }
}

/// Load run settings from a YAML file.
fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    serde_yml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

/// Load the source registry from a YAML file.
fn load_sources(path: &Path) -> Result<Vec<WeatherSource>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sources file: {}", path.display()))?;

    let file: SourcesFile = serde_yml::from_str(&content)
        .with_context(|| format!("Failed to parse sources file: {}", path.display()))?;

    Ok(file.weather_resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str) -> WeatherSource {
        WeatherSource {
            name: name.to_string(),
            url: format!("https://api.example.com/{}", name),
            params: HashMap::new(),
            headers: HashMap::new(),
            result_keys: vec!["main".to_string(), "temp".to_string()],
        }
    }

    #[test]
    fn test_parse_settings() {
        let yaml = "times_to_check: 5\ncheck_interval_in_seconds: 2.5\n";
        let settings: Settings = serde_yml::from_str(yaml).unwrap();
        assert_eq!(settings.times_to_check, 5);
        assert_eq!(settings.check_interval_in_seconds, 2.5);
    }

    #[test]
    fn test_parse_sources() {
        let yaml = r#"
weather_resources:
  - name: openweather
    url: "https://api.openweathermap.org/data/2.5/weather"
    params:
      q: London
      units: metric
    headers: {}
    result_keys:
      - main
      - temp
  - name: wttr
    url: "https://wttr.in/London"
    result_keys:
      - current_condition
"#;
        let file: SourcesFile = serde_yml::from_str(yaml).unwrap();
        assert_eq!(file.weather_resources.len(), 2);
        assert_eq!(file.weather_resources[0].name, "openweather");
        assert_eq!(
            file.weather_resources[0].params.get("q"),
            Some(&"London".to_string())
        );
        assert!(file.weather_resources[1].headers.is_empty());
    }

    #[test]
    fn test_sorted_source_names() {
        let config = Config {
            settings: Settings::default(),
            sources: vec![source("wttr"), source("accuweather"), source("openweather")],
        };
        assert_eq!(
            config.sorted_source_names(),
            vec!["accuweather", "openweather", "wttr"]
        );
    }

    #[test]
    fn test_validate_duplicate_names() {
        let config = Config {
            settings: Settings::default(),
            sources: vec![source("a"), source("a")],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_name() {
        let config = Config {
            settings: Settings::default(),
            sources: vec![source("")],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_interval() {
        let config = Config {
            settings: Settings {
                times_to_check: 1,
                check_interval_in_seconds: -1.0,
            },
            sources: vec![source("a")],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_result_keys_is_legal() {
        let config = Config {
            settings: Settings::default(),
            sources: vec![WeatherSource {
                result_keys: Vec::new(),
                ..source("bare")
            }],
        };
        assert!(config.validate().is_ok());
    }
}
