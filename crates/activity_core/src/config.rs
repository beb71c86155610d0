use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use shared::{domain::Step, error::ValidationError};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::{
    reporter::{AttemptCollector, HttpCollector, MissingCollector},
    sequence::SequenceModel,
};

pub const SETTINGS_FILE: &str = "activity.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid collector url '{url}': {reason}")]
    InvalidCollectorUrl { url: String, reason: String },
    #[error("invalid step catalogue: {0}")]
    Catalogue(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepConfig {
    pub id: u32,
    pub label: String,
}

/// Activity settings. Reporting is off until `collector_url` is set: with no
/// endpoint every attempt is scored and shown as usual, and its report is
/// logged as failed. See `activity.example.toml` at the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub collector_url: Option<String>,
    pub activity_title: String,
    pub steps: Option<Vec<StepConfig>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collector_url: None,
            activity_title: "NMC Registration Flow".into(),
            steps: None,
        }
    }
}

impl Settings {
    /// `None` when no collector is configured; an empty string counts as unset.
    pub fn collector_endpoint(&self) -> Result<Option<Url>, SettingsError> {
        let Some(raw) = self.collector_url.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        let url = Url::parse(raw).map_err(|err| SettingsError::InvalidCollectorUrl {
            url: raw.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::InvalidCollectorUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(Some(url))
    }

    pub fn collector(&self) -> Result<Arc<dyn AttemptCollector>, SettingsError> {
        match self.collector_endpoint()? {
            Some(endpoint) => Ok(Arc::new(HttpCollector::new(endpoint))),
            None => {
                warn!("config: no collector url configured; attempts will not be recorded");
                Ok(Arc::new(MissingCollector))
            }
        }
    }

    pub fn sequence_model(&self) -> Result<SequenceModel, SettingsError> {
        match &self.steps {
            None => Ok(SequenceModel::registration_flow()),
            Some(steps) => Ok(SequenceModel::new(
                steps
                    .iter()
                    .map(|step| Step::new(step.id, step.label.clone()))
                    .collect(),
            )?),
        }
    }
}

pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE))
}

/// Defaults, then the settings file if it exists, then environment overrides.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ACTIVITY_COLLECTOR_URL") {
        settings.collector_url = Some(v);
    }
    if let Some(v) = lookup("APP__COLLECTOR_URL") {
        settings.collector_url = Some(v);
    }
    if let Some(v) = lookup("APP__ACTIVITY_TITLE") {
        settings.activity_title = v;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_settings_file(label: &str, contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("activity_settings_{label}_{suffix}.toml"));
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn sample_settings_file_parses_to_defaults() {
        let sample: Settings = toml::from_str(include_str!("../../../activity.example.toml"))
            .expect("sample settings");
        assert_eq!(sample, Settings::default());
        assert_eq!(sample.collector_endpoint().expect("endpoint"), None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = env::temp_dir().join("activity_settings_does_not_exist.toml");
        let settings = load_settings_from(&path).expect("settings");
        assert_eq!(settings.activity_title, "NMC Registration Flow");
        assert!(settings.steps.is_none());
    }

    #[test]
    fn parses_custom_catalogue() {
        let path = temp_settings_file(
            "catalogue",
            r#"
activity_title = "Tea"
collector_url = "https://collector.example/exec"

[[steps]]
id = 1
label = "Boil water"

[[steps]]
id = 2
label = "Steep"
"#,
        );
        let settings = load_settings_from(&path).expect("settings");
        fs::remove_file(&path).expect("cleanup");

        assert_eq!(settings.activity_title, "Tea");
        let model = settings.sequence_model().expect("model");
        assert_eq!(model.canonical_order()[1].label, "Steep");
        assert_eq!(
            settings
                .collector_endpoint()
                .expect("endpoint")
                .map(|url| url.to_string()),
            Some("https://collector.example/exec".to_string())
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_settings_file("malformed", "activity_title = [");
        let err = load_settings_from(&path).unwrap_err();
        fs::remove_file(&path).expect("cleanup");
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn app_prefixed_env_wins() {
        let vars: HashMap<&str, &str> = [
            ("ACTIVITY_COLLECTOR_URL", "http://first.example"),
            ("APP__COLLECTOR_URL", "http://second.example"),
            ("APP__ACTIVITY_TITLE", "Override"),
        ]
        .into_iter()
        .collect();
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(
            settings.collector_url.as_deref(),
            Some("http://second.example")
        );
        assert_eq!(settings.activity_title, "Override");
    }

    #[test]
    fn rejects_non_http_collector() {
        let settings = Settings {
            collector_url: Some("ftp://collector.example".into()),
            ..Settings::default()
        };
        assert!(matches!(
            settings.collector_endpoint(),
            Err(SettingsError::InvalidCollectorUrl { .. })
        ));

        let blank = Settings {
            collector_url: Some("   ".into()),
            ..Settings::default()
        };
        assert_eq!(blank.collector_endpoint().expect("blank"), None);
    }

    #[test]
    fn duplicate_configured_ids_are_rejected() {
        let settings = Settings {
            steps: Some(vec![
                StepConfig {
                    id: 1,
                    label: "a".into(),
                },
                StepConfig {
                    id: 1,
                    label: "b".into(),
                },
            ]),
            ..Settings::default()
        };
        assert!(matches!(
            settings.sequence_model(),
            Err(SettingsError::Catalogue(ValidationError::DuplicateStepId(_)))
        ));
    }
}
