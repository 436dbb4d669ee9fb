//! TOML configuration for the command-line front end.
//!
//! Every section and field is optional; anything missing falls back to the
//! scenario defaults, so an empty file is a valid config.

use std::path::Path;

use anyhow::{Context, Result};
use jiff::civil::Time as ClockTime;
use serde::{Deserialize, Serialize};
use sigmaprop_core::Measurement;
use sigmaprop_propagate::linear::{Config, ConfigError, DEFAULT_REL_STEP};
use sigmaprop_scenarios::{
    cooling::{self, CoolingReadings},
    radiocarbon::{self, RadiocarbonSample},
    time_of_death::{self, DeathCase},
};
use uom::si::{f64::Time, time::hour};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub engine: EngineSection,
    pub radiocarbon: RadiocarbonSection,
    pub cooling: CoolingSection,
}

/// Propagator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    /// Relative finite-difference step.
    pub rel_step: f64,
}

/// Radiocarbon sample readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RadiocarbonSection {
    pub half_life_years: Measurement,
    pub percent_modern: Measurement,
}

/// Newton cooling readings, in °F, and the clock time of the first reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoolingSection {
    pub interval_hours: f64,
    pub discovered_at: ClockTime,
    pub ambient: Measurement,
    pub first: Measurement,
    pub second: Measurement,
    pub body: Measurement,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            rel_step: DEFAULT_REL_STEP,
        }
    }
}

impl Default for RadiocarbonSection {
    fn default() -> Self {
        Self {
            half_life_years: radiocarbon::HALF_LIFE_YEARS,
            percent_modern: radiocarbon::PERCENT_MODERN,
        }
    }
}

impl Default for CoolingSection {
    fn default() -> Self {
        Self {
            interval_hours: cooling::READING_INTERVAL_HOURS,
            discovered_at: time_of_death::DISCOVERED_AT,
            ambient: cooling::AMBIENT,
            first: cooling::FIRST_READING,
            second: cooling::SECOND_READING,
            body: time_of_death::BODY_TEMPERATURE,
        }
    }
}

impl EngineSection {
    /// Builds the propagator config.
    ///
    /// # Errors
    ///
    /// Returns an error if `rel_step` is not finite and positive.
    pub fn propagation(&self) -> Result<Config, ConfigError> {
        Config::new(self.rel_step)
    }
}

impl RadiocarbonSection {
    /// Returns the sample described by this section.
    #[must_use]
    pub fn sample(&self) -> RadiocarbonSample {
        RadiocarbonSample {
            half_life: self.half_life_years,
            percent_modern: self.percent_modern,
        }
    }
}

impl CoolingSection {
    /// Returns the time-of-death case described by this section.
    #[must_use]
    pub fn case(&self) -> DeathCase {
        DeathCase {
            readings: CoolingReadings {
                ambient: self.ambient,
                first: self.first,
                second: self.second,
                interval: Time::new::<hour>(self.interval_hours),
            },
            body: self.body,
            discovered_at: self.discovered_at,
        }
    }
}

impl AppConfig {
    /// Loads the config from `path`, or returns the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown fields.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Renders the config as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use jiff::civil::time;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.cooling.case(), DeathCase::default());
        assert_eq!(config.radiocarbon.sample(), RadiocarbonSample::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let text = r#"
            [engine]
            rel_step = 1e-5

            [cooling]
            ambient = { value = 70.0, sigma = 1.0 }
            discovered_at = "22:05:00"
        "#;

        let config = AppConfig::from_toml(text).unwrap();

        assert_relative_eq!(config.engine.rel_step, 1e-5);
        assert_relative_eq!(config.cooling.ambient.value, 70.0);
        assert_relative_eq!(config.cooling.ambient.sigma, 1.0);
        assert_eq!(config.cooling.discovered_at, time(22, 5, 0, 0));
        assert_eq!(config.cooling.first, cooling::FIRST_READING);
        assert_eq!(config.radiocarbon, RadiocarbonSection::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(AppConfig::from_toml("[engine]\nstep = 1e-6\n").is_err());
    }

    #[test]
    fn defaults_survive_a_toml_round_trip() {
        let text = AppConfig::default().to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), AppConfig::default());
    }

    #[test]
    fn invalid_rel_step_is_reported_when_building_engine_config() {
        let config = AppConfig::from_toml("[engine]\nrel_step = 0.0\n").unwrap();
        assert!(config.engine.propagation().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/sigmaprop.toml")));
        assert!(result.is_err());
    }
}
