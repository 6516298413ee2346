use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "linear_regression_model.json";
pub const DEFAULT_LOG_PATH: &str = "logs/app.log";
pub const MODEL_PATH_ENV: &str = "GPA_MODEL_PATH";
pub const LOG_PATH_ENV: &str = "GPA_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Flags win over environment variables, which win over defaults.
    pub fn resolve(model_flag: Option<PathBuf>, log_flag: Option<PathBuf>) -> Self {
        Self::resolve_with(model_flag, log_flag, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        model_flag: Option<PathBuf>,
        log_flag: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |flag: Option<PathBuf>, key: &str, default: &str| {
            flag.or_else(|| env(key).filter(|v| !v.is_empty()).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(default))
        };
        Self {
            model_path: pick(model_flag, MODEL_PATH_ENV, DEFAULT_MODEL_PATH),
            log_path: pick(log_flag, LOG_PATH_ENV, DEFAULT_LOG_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = Config::resolve_with(None, None, |_| None);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.log_path, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = |key: &str| match key {
            MODEL_PATH_ENV => Some("/srv/model.json".to_string()),
            LOG_PATH_ENV => Some("/var/log/gpa.log".to_string()),
            _ => None,
        };
        let config = Config::resolve_with(None, None, env);
        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.log_path, PathBuf::from("/var/log/gpa.log"));

        let config = Config::resolve_with(Some(PathBuf::from("local.json")), None, env);
        assert_eq!(config.model_path, PathBuf::from("local.json"));
        assert_eq!(config.log_path, PathBuf::from("/var/log/gpa.log"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = Config::resolve_with(None, None, |_| Some(String::new()));
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
