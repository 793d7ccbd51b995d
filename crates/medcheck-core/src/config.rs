use crate::error::MedcheckError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MEDICINE_FILE: &str = "medicine_data.csv";
pub const DEFAULT_USERS_FILE: &str = "users.csv";
pub const DEFAULT_REJECTED_FILE: &str = "rejected_medicines.csv";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Where the stores live and how loudly to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub medicine_file: String,
    pub users_file: String,
    pub rejected_file: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            medicine_file: DEFAULT_MEDICINE_FILE.into(),
            users_file: DEFAULT_USERS_FILE.into(),
            rejected_file: DEFAULT_REJECTED_FILE.into(),
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

impl Config {
    /// Load configuration from `MEDCHECK_*` environment variables, falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> Result<Self, MedcheckError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MedcheckError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get_or = |key: &str, default: String| lookup(key).unwrap_or(default);

        let config = Self {
            data_dir: lookup("MEDCHECK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            medicine_file: get_or("MEDCHECK_MEDICINE_FILE", defaults.medicine_file),
            users_file: get_or("MEDCHECK_USERS_FILE", defaults.users_file),
            rejected_file: get_or("MEDCHECK_REJECTED_FILE", defaults.rejected_file),
            log_level: get_or("MEDCHECK_LOG", defaults.log_level),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn validate(&self) -> Result<(), MedcheckError> {
        for (key, value) in [
            ("MEDCHECK_MEDICINE_FILE", &self.medicine_file),
            ("MEDCHECK_USERS_FILE", &self.users_file),
            ("MEDCHECK_REJECTED_FILE", &self.rejected_file),
        ] {
            if value.trim().is_empty() {
                return Err(MedcheckError::Config(format!("{key} must not be empty")));
            }
        }
        if self.medicine_file == self.users_file
            || self.medicine_file == self.rejected_file
            || self.users_file == self.rejected_file
        {
            return Err(MedcheckError::Config(
                "medicine, users and rejection files must be distinct".into(),
            ));
        }
        Ok(())
    }

    pub fn medicine_path(&self) -> PathBuf {
        self.data_dir.join(&self.medicine_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn rejected_path(&self) -> PathBuf {
        self.data_dir.join(&self.rejected_file)
    }
}
