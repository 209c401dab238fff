use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let data_dir = PathBuf::from(or_default("FEEDPULSE_DATA_DIR", "./data/articles"));
    let reports_dir = PathBuf::from(or_default("FEEDPULSE_REPORTS_DIR", "./reports"));
    let labels_path = PathBuf::from(or_default("FEEDPULSE_LABELS_PATH", "./config/labels.yaml"));
    let log_level = or_default("FEEDPULSE_LOG_LEVEL", "info");

    let read_multiplier_threshold = parse_f64("FEEDPULSE_READ_MULTIPLIER", "3.0")?;
    let looking_rate_multiplier_threshold = parse_f64("FEEDPULSE_LOOKING_RATE_MULTIPLIER", "2.0")?;
    let share_rate_multiplier_threshold = parse_f64("FEEDPULSE_SHARE_RATE_MULTIPLIER", "2.0")?;
    let recency_days = parse_u32("FEEDPULSE_RECENCY_DAYS", "3")?;
    let lookback_days = parse_u32("FEEDPULSE_LOOKBACK_DAYS", "30")?;
    let min_label_support = parse_usize("FEEDPULSE_MIN_LABEL_SUPPORT", "2")?;

    for (var, value) in [
        ("FEEDPULSE_READ_MULTIPLIER", read_multiplier_threshold),
        (
            "FEEDPULSE_LOOKING_RATE_MULTIPLIER",
            looking_rate_multiplier_threshold,
        ),
        (
            "FEEDPULSE_SHARE_RATE_MULTIPLIER",
            share_rate_multiplier_threshold,
        ),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("threshold must be a positive finite number, got {value}"),
            });
        }
    }

    if recency_days == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FEEDPULSE_RECENCY_DAYS".to_string(),
            reason: "recency window must be at least 1 day".to_string(),
        });
    }

    Ok(AppConfig {
        data_dir,
        reports_dir,
        labels_path,
        log_level,
        read_multiplier_threshold,
        looking_rate_multiplier_threshold,
        share_rate_multiplier_threshold,
        recency_days,
        lookback_days,
        min_label_support,
    })
}
