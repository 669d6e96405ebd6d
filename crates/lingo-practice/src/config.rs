use lingo_srs::SchedulerParams;
use serde::Deserialize;

use crate::error::PracticeError;

/// Prefix for scheduler tuning variables, e.g. `SRS_SPOKEN_WEIGHT=1.3`.
pub const SCHEDULER_ENV_PREFIX: &str = "SRS_";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Debug, Default, Deserialize)]
struct AppVars {
    #[serde(default)]
    app_env: Environment,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PracticeConfig {
    pub environment: Environment,
    pub scheduler: SchedulerParams,
}

impl PracticeConfig {
    /// Read `APP_ENV` and the `SRS_*` variables from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, PracticeError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, PracticeError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let app: AppVars = envy::from_iter(vars.iter().cloned())?;
        let scheduler: SchedulerParams = envy::prefixed(SCHEDULER_ENV_PREFIX).from_iter(vars)?;
        scheduler.validate()?;

        Ok(Self {
            environment: app.app_env,
            scheduler,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PracticeConfig::from_vars(vars(&[("HOME", "/root")])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.scheduler, SchedulerParams::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = PracticeConfig::from_vars(vars(&[
            ("APP_ENV", "production"),
            ("SRS_SPOKEN_WEIGHT", "1.5"),
            ("SRS_PARTIAL_DAMPING", "0.6"),
            ("SRS_MAX_INTERVAL_DAYS", "365"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert!(!config.environment.is_development());
        assert_eq!(config.scheduler.spoken_weight, 1.5);
        assert_eq!(config.scheduler.partial_damping, 0.6);
        assert_eq!(config.scheduler.max_interval_days, 365);
        assert_eq!(config.scheduler.typed_weight, 1.0);
    }

    #[test]
    fn test_rejects_unparseable_value() {
        let result = PracticeConfig::from_vars(vars(&[("SRS_STABILITY_GAIN", "lots")]));
        assert!(matches!(result, Err(PracticeError::Config(_))));
    }

    #[test]
    fn test_rejects_out_of_range_params() {
        let result = PracticeConfig::from_vars(vars(&[("SRS_SPOKEN_WEIGHT", "0.5")]));
        assert!(matches!(result, Err(PracticeError::Scheduler(_))));
    }
}
