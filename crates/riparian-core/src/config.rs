use crate::error::{Result, RiparianError};
use crate::models::{CriteriaWeights, ZoneSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const ENV_WEIGHT_ISSUE_DENSITY: &str = "RIPARIAN_WEIGHT_ISSUE_DENSITY";
pub const ENV_WEIGHT_WATER_PROXIMITY: &str = "RIPARIAN_WEIGHT_WATER_PROXIMITY";
pub const ENV_WEIGHT_SEVERITY: &str = "RIPARIAN_WEIGHT_SEVERITY";
pub const ENV_WEIGHT_RECURRENCE: &str = "RIPARIAN_WEIGHT_RECURRENCE";
pub const ENV_GRID_SIZE_METERS: &str = "RIPARIAN_GRID_SIZE_METERS";
pub const ENV_WATER_PROXIMITY_METERS: &str = "RIPARIAN_WATER_PROXIMITY_METERS";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the zone engine
///
/// Weights are carried as given. A weight outside `[0, 1]` is reported with
/// a warning when the weights are read, but it is not clamped.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub issue_density: ConfigValue<f64>,
    pub water_proximity: ConfigValue<f64>,
    pub severity_factor: ConfigValue<f64>,
    pub recurrence: ConfigValue<f64>,
    pub grid_size_meters: ConfigValue<f64>,
    pub water_proximity_meters: ConfigValue<f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let weights = CriteriaWeights::default();
        let settings = ZoneSettings::default();
        Self {
            issue_density: ConfigValue::new(weights.issue_density, ConfigSource::Default),
            water_proximity: ConfigValue::new(weights.water_proximity, ConfigSource::Default),
            severity_factor: ConfigValue::new(weights.severity_factor, ConfigSource::Default),
            recurrence: ConfigValue::new(weights.recurrence, ConfigSource::Default),
            grid_size_meters: ConfigValue::new(settings.grid_size_meters, ConfigSource::Default),
            water_proximity_meters: ConfigValue::new(
                settings.water_proximity_meters,
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RiparianError::ConfigMissing {
                key: format!("config file {}", path.display()),
            },
            _ => RiparianError::Io(e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| RiparianError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(weights) = file_config.weights {
            if let Some(w) = weights.issue_density {
                self.issue_density.update(w, ConfigSource::File);
            }
            if let Some(w) = weights.water_proximity {
                self.water_proximity.update(w, ConfigSource::File);
            }
            if let Some(w) = weights.severity_factor {
                self.severity_factor.update(w, ConfigSource::File);
            }
            if let Some(w) = weights.recurrence {
                self.recurrence.update(w, ConfigSource::File);
            }
        }

        if let Some(meters) = file_config.grid_size_meters {
            let meters = check_meters("grid_size_meters", meters)?;
            self.grid_size_meters.update(meters, ConfigSource::File);
        }

        if let Some(meters) = file_config.water_proximity_meters {
            let meters = check_meters("water_proximity_meters", meters)?;
            self.water_proximity_meters.update(meters, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    ///
    /// Unparsable values are logged and ignored.
    pub fn load_from_env(mut self) -> Self {
        let weight_vars = [
            (ENV_WEIGHT_ISSUE_DENSITY, &mut self.issue_density),
            (ENV_WEIGHT_WATER_PROXIMITY, &mut self.water_proximity),
            (ENV_WEIGHT_SEVERITY, &mut self.severity_factor),
            (ENV_WEIGHT_RECURRENCE, &mut self.recurrence),
        ];
        for (var, slot) in weight_vars {
            if let Ok(raw) = env::var(var) {
                match raw.trim().parse::<f64>() {
                    Ok(w) if w.is_finite() => slot.update(w, ConfigSource::Environment),
                    _ => tracing::warn!("Invalid {} value '{}': expected a number", var, raw),
                }
            }
        }

        let meter_vars = [
            (ENV_GRID_SIZE_METERS, "grid_size_meters", &mut self.grid_size_meters),
            (
                ENV_WATER_PROXIMITY_METERS,
                "water_proximity_meters",
                &mut self.water_proximity_meters,
            ),
        ];
        for (var, key, slot) in meter_vars {
            if let Ok(raw) = env::var(var) {
                match parse_meters(key, &raw) {
                    Ok(meters) => slot.update(meters, ConfigSource::Environment),
                    Err(_) => tracing::warn!(
                        "Invalid {} value '{}': expected a positive number of meters",
                        var,
                        raw
                    ),
                }
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(weights) = overrides.weights {
            self.issue_density.update(weights.issue_density, ConfigSource::Cli);
            self.water_proximity.update(weights.water_proximity, ConfigSource::Cli);
            self.severity_factor.update(weights.severity_factor, ConfigSource::Cli);
            self.recurrence.update(weights.recurrence, ConfigSource::Cli);
        }

        if let Some(meters) = overrides.grid_size_meters {
            self.grid_size_meters.update(meters, ConfigSource::Cli);
        }

        if let Some(meters) = overrides.water_proximity_meters {
            self.water_proximity_meters.update(meters, ConfigSource::Cli);
        }
    }

    /// Effective criteria weights
    pub fn weights(&self) -> CriteriaWeights {
        let weights = CriteriaWeights::new(
            self.issue_density.value,
            self.water_proximity.value,
            self.severity_factor.value,
            self.recurrence.value,
        );
        let out_of_range = weights.out_of_range();
        if !out_of_range.is_empty() {
            tracing::warn!(
                weights = ?out_of_range,
                "Criteria weights outside [0, 1] are used unchanged"
            );
        }
        weights
    }

    /// Effective grid and water-proximity settings
    pub fn settings(&self) -> ZoneSettings {
        ZoneSettings {
            grid_size_meters: self.grid_size_meters.value,
            water_proximity_meters: self.water_proximity_meters.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        let weights = [
            ("weights.issue_density", &self.issue_density),
            ("weights.water_proximity", &self.water_proximity),
            ("weights.severity_factor", &self.severity_factor),
            ("weights.recurrence", &self.recurrence),
        ];
        for (key, value) in weights {
            map.insert(key.to_string(), (format!("{}", value.value), value.source));
        }

        map.insert(
            "grid_size_meters".to_string(),
            (format!("{} m", self.grid_size_meters.value), self.grid_size_meters.source),
        );

        map.insert(
            "water_proximity_meters".to_string(),
            (format!("{} m", self.water_proximity_meters.value), self.water_proximity_meters.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    grid_size_meters: Option<f64>,
    water_proximity_meters: Option<f64>,
    weights: Option<FileWeights>,
}

#[derive(Debug, Deserialize, Serialize)]
struct FileWeights {
    issue_density: Option<f64>,
    water_proximity: Option<f64>,
    severity_factor: Option<f64>,
    recurrence: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub weights: Option<CriteriaWeights>,
    pub grid_size_meters: Option<f64>,
    pub water_proximity_meters: Option<f64>,
}

/// Parse a comma-separated weight list in scoring order:
/// `issue_density,water_proximity,severity_factor,recurrence`
pub fn parse_weights(s: &str) -> Result<CriteriaWeights> {
    let values: Vec<f64> = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| RiparianError::ConfigInvalid {
            key: "weights".to_string(),
            reason: format!("Invalid weight list '{}': {}", s, e),
        })?;

    match values.as_slice() {
        [density, water, severity, recurrence]
            if values.iter().all(|w| w.is_finite()) =>
        {
            Ok(CriteriaWeights::new(*density, *water, *severity, *recurrence))
        }
        _ => Err(RiparianError::ConfigInvalid {
            key: "weights".to_string(),
            reason: format!(
                "Expected four finite weights (density,water,severity,recurrence), got '{}'",
                s
            ),
        }),
    }
}

/// Parse a strictly positive distance in meters
///
/// `grid_size_meters` must also be at least
/// [`ZoneSettings::MIN_GRID_SIZE_METERS`].
pub fn parse_meters(key: &str, s: &str) -> Result<f64> {
    let meters = s.trim().parse::<f64>().map_err(|e| RiparianError::ConfigInvalid {
        key: key.to_string(),
        reason: format!("Invalid distance '{}': {}", s, e),
    })?;
    check_meters(key, meters)
}

fn check_meters(key: &str, meters: f64) -> Result<f64> {
    if !(meters.is_finite() && meters > 0.0) {
        return Err(RiparianError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Distance must be a positive number of meters, got {}", meters),
        });
    }

    if key == "grid_size_meters" && meters < ZoneSettings::MIN_GRID_SIZE_METERS {
        return Err(RiparianError::ConfigInvalid {
            key: key.to_string(),
            reason: format!(
                "Grid size must be at least {} m, got {}",
                ZoneSettings::MIN_GRID_SIZE_METERS,
                meters
            ),
        });
    }

    Ok(meters)
}
