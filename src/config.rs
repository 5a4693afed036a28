use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AppError;

const DEFAULT_CONFIG_FILE: &str = "spyglass.toml";
const CONFIG_PATH_ENV: &str = "SPYGLASS_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub analysis: AnalysisSettings,
    pub geocoder: GeocoderSettings,
    pub map: MapSettings,
    pub progress: ProgressSettings,
    pub http: HttpSettings,
}

/// Unsigned-upload object storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub base_url: String,
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub flight_altitude_m: f64,
    pub flight_duration_secs: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    pub tick_interval_ms: u64,
    pub step: u8,
    pub cap: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name: "dbs8wrvlv".to_string(),
            upload_preset: "Aa123456".to_string(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
        }
    }
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("spyglass/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            flight_altitude_m: 30_000.0,
            flight_duration_secs: 2.0,
        }
    }
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            step: 1,
            cap: 99,
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl ProgressSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Loads settings from `SPYGLASS_CONFIG` (or `spyglass.toml` in the working
    /// directory, if present) layered under `SPYGLASS__SECTION__KEY` variables.
    pub fn load() -> Result<Self, AppError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        debug!("Loading configuration from {}", path.display());
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("SPYGLASS").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        info!(
            "Configuration loaded: analysis backend {}, storage {}/{}",
            settings.analysis.base_url, settings.storage.base_url, settings.storage.cloud_name
        );
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.progress.cap >= 100 {
            return Err(invalid("progress.cap must stay below 100"));
        }
        if self.progress.step == 0 {
            return Err(invalid("progress.step must be at least 1"));
        }
        if self.http.timeout_secs == 0 {
            return Err(invalid("http.timeout_secs must be at least 1"));
        }
        let duration = self.map.flight_duration_secs;
        if !duration.is_finite() || duration < 0.0 {
            return Err(invalid("map.flight_duration_secs must be a finite, non-negative number"));
        }
        let altitude = self.map.flight_altitude_m;
        if !altitude.is_finite() || altitude <= 0.0 {
            return Err(invalid("map.flight_altitude_m must be a finite, positive number"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> AppError {
    config::ConfigError::Message(message.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("spyglass-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("absent-{}.toml", uuid::Uuid::new_v4()));
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.progress.cap, 99);
        assert_eq!(settings.progress.tick_interval(), Duration::from_millis(50));
        assert_eq!(settings.map.flight_altitude_m, 30_000.0);
        assert_eq!(settings.analysis.base_url, "http://localhost:5001");
    }

    #[test]
    fn file_overrides_only_named_keys() {
        let path = write_temp_config(
            r#"
            [analysis]
            base_url = "http://backend.internal:9000"

            [progress]
            tick_interval_ms = 10
            "#,
        );
        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.analysis.base_url, "http://backend.internal:9000");
        assert_eq!(settings.progress.tick_interval_ms, 10);
        assert_eq!(settings.progress.cap, 99);
        assert_eq!(settings.storage.upload_preset, "Aa123456");
    }

    #[test]
    fn cap_of_one_hundred_is_rejected() {
        let path = write_temp_config("[progress]\ncap = 100\n");
        let result = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn infinite_flight_duration_is_rejected() {
        let path = write_temp_config("[map]\nflight_duration_secs = inf\n");
        let result = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn non_positive_altitude_is_rejected() {
        let path = write_temp_config("[map]\nflight_altitude_m = 0.0\n");
        let result = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn zero_http_timeout_is_rejected() {
        let path = write_temp_config("[http]\ntimeout_secs = 0\n");
        let result = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
