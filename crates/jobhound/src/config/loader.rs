use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::ConfigError;
use crate::timing::IndustryClass;

const SCHEMA_JSON: &str = include_str!("../../../../schema/jobhound-v1.json");

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

/// Default config file location: `<config_dir>/jobhound/jobhound.json`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("jobhound").join("jobhound.json"))
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| format!("{} at {}", e, e.instance_path()))
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Validate version
    if config.version != 1 {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    // Validate experience level patterns
    let mut seen_levels = std::collections::HashSet::new();
    for level in &config.scoring.experience_levels {
        if !seen_levels.insert(&level.level) {
            return Err(ConfigError::Validation {
                message: format!("Duplicate experience level '{}'", level.level),
            });
        }

        for pattern in &level.patterns {
            if let Err(e) = regex::Regex::new(pattern) {
                return Err(ConfigError::InvalidPattern {
                    level: level.level.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    // Validate score bounds
    if !(0.0..=100.0).contains(&config.scoring.min_score) {
        return Err(ConfigError::Validation {
            message: format!(
                "scoring.min_score must be within 0..=100, got {}",
                config.scoring.min_score
            ),
        });
    }
    if !(0.0..=100.0).contains(&config.notify.high_score_threshold) {
        return Err(ConfigError::Validation {
            message: format!(
                "notify.high_score_threshold must be within 0..=100, got {}",
                config.notify.high_score_threshold
            ),
        });
    }

    // Validate timing rules. An empty weekday set or an empty hour window
    // would make the submission scan vacuous.
    if config.timing.acceptable_weekdays.is_empty() {
        return Err(ConfigError::Validation {
            message: "timing.acceptable_weekdays must not be empty".to_string(),
        });
    }
    for day in &config.timing.acceptable_weekdays {
        if day.parse::<chrono::Weekday>().is_err() {
            return Err(ConfigError::Validation {
                message: format!("Unknown weekday '{}' in timing.acceptable_weekdays", day),
            });
        }
    }

    for (class, window) in &config.timing.industry_windows {
        if IndustryClass::parse(class).is_none() {
            return Err(ConfigError::Validation {
                message: format!("Unknown industry class '{}' in timing.industry_windows", class),
            });
        }
        if window.start_hour >= window.end_hour || window.end_hour > 24 {
            return Err(ConfigError::Validation {
                message: format!(
                    "Invalid hour window {}..{} for industry class '{}'",
                    window.start_hour, window.end_hour, class
                ),
            });
        }
    }
    for class in config.timing.industry_keywords.keys() {
        if IndustryClass::parse(class).is_none() {
            return Err(ConfigError::Validation {
                message: format!(
                    "Unknown industry class '{}' in timing.industry_keywords",
                    class
                ),
            });
        }
    }

    if config.timing.submit_now_within_hours <= 0 {
        return Err(ConfigError::Validation {
            message: "timing.submit_now_within_hours must be positive".to_string(),
        });
    }
    if config.timing.fallback_hour >= 24 {
        return Err(ConfigError::Validation {
            message: format!(
                "timing.fallback_hour must be within 0..=23, got {}",
                config.timing.fallback_hour
            ),
        });
    }

    // Validate timezone names against the tz database
    for (name, value) in config
        .timing
        .city_timezones
        .iter()
        .chain(config.timing.country_timezones.iter())
    {
        if value.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigError::InvalidTimezone {
                name: name.clone(),
                value: value.clone(),
            });
        }
    }
    if config
        .timing
        .default_timezone
        .parse::<chrono_tz::Tz>()
        .is_err()
    {
        return Err(ConfigError::InvalidTimezone {
            name: "timing.default_timezone".to_string(),
            value: config.timing.default_timezone.clone(),
        });
    }

    Ok(())
}
