use super::{ensure_file, open_existing, replace_file};
use crate::error::MedcheckError;
use crate::model::Credential;
use std::path::{Path, PathBuf};

pub const USER_COLUMNS: [&str; 2] = ["username", "password"];

/// The credential store: plaintext username/password pairs.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_exists(&self) -> Result<bool, MedcheckError> {
        ensure_file(&self.path, &USER_COLUMNS)
    }

    pub fn load(&self) -> Result<Vec<Credential>, MedcheckError> {
        let Some(file) = open_existing(&self.path)? else {
            return Ok(Vec::new());
        };
        let mut reader = csv::Reader::from_reader(file);
        let users = reader
            .deserialize()
            .collect::<Result<Vec<Credential>, csv::Error>>()?;
        Ok(users)
    }

    pub fn save(&self, users: &[Credential]) -> Result<(), MedcheckError> {
        replace_file(
            &self.path,
            &USER_COLUMNS,
            users
                .iter()
                .map(|u| [u.username.as_str(), u.password.as_str()]),
        )
    }
}
