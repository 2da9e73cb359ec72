use super::SecretsResult;
use crate::utils::fs::write_atomic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key-value store for operator secrets
pub trait SecretsStore {
    fn get_password_hash(&self) -> SecretsResult<Option<String>>;

    /// Store a new hash. Any pending first-run password is discarded.
    fn set_password_hash(&self, hash: &str) -> SecretsResult<()>;

    fn set_first_run_token(&self, token: &str) -> SecretsResult<()>;

    /// Return the first-run password once, removing it from storage
    fn get_and_clear_first_run_token(&self) -> SecretsResult<Option<String>>;
}

/// On-disk layout of `config.json`
///
/// Keys this module does not own (UI preferences, ...) are carried through untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SecretsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_run_password: Option<String>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

/// Secrets kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonSecretsStore {
    path: PathBuf,
}

impl JsonSecretsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store; a corrupt one is an error so it is
    /// never silently replaced by a fresh password.
    fn read(&self) -> SecretsResult<SecretsFile> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SecretsFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, file: &SecretsFile) -> SecretsResult<()> {
        let content = serde_json::to_vec_pretty(file)?;
        write_atomic(&self.path, &content)?;
        Ok(())
    }
}

impl SecretsStore for JsonSecretsStore {
    fn get_password_hash(&self) -> SecretsResult<Option<String>> {
        Ok(self.read()?.password)
    }

    fn set_password_hash(&self, hash: &str) -> SecretsResult<()> {
        let mut file = self.read()?;
        file.password = Some(hash.to_string());
        file.first_run_password = None;
        self.write(&file)
    }

    fn set_first_run_token(&self, token: &str) -> SecretsResult<()> {
        let mut file = self.read()?;
        file.first_run_password = Some(token.to_string());
        self.write(&file)
    }

    fn get_and_clear_first_run_token(&self) -> SecretsResult<Option<String>> {
        let mut file = self.read()?;
        let token = file.first_run_password.take();
        if token.is_some() {
            self.write(&file)?;
        }
        Ok(token)
    }
}
