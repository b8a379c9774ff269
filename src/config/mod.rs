use std::collections::HashMap;

use tracing::warn;

use crate::security::{FileMode, FileModeError};

/// Configuration key holding the octal umask applied to the mode of newly created files.
pub const FILE_CREATION_UMASK_KEY: &str = "underfs.file.creation.umask";

const ENV_PREFIX: &str = "UNDERFS_";

/// The one capability option constructors actually need from configuration. Keeping the trait
/// this narrow lets tests stub the umask without assembling a full provider.
pub trait UmaskSource {
    /// The configured file creation umask, or `None` when the option isn't set. A present but
    /// malformed value is an error; falling back to an unmasked default would silently widen
    /// permissions on created files.
    fn file_creation_umask(&self) -> Result<Option<FileMode>, ConfigurationError>;
}

/// Read-only key/value configuration provider. Options constructors query it once at
/// construction time and don't retain it.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    entries: HashMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        Self { entries }
    }

    /// Builds a provider from `UNDERFS_`-prefixed environment variables, mapping
    /// `UNDERFS_FILE_CREATION_UMASK` to the key `underfs.file.creation.umask`.
    pub fn from_env() -> Self {
        let entries = std::env::vars()
            .filter_map(|(name, value)| {
                let suffix = name.strip_prefix(ENV_PREFIX)?;
                Some((format!("underfs.{}", suffix.to_lowercase().replace('_', ".")), value))
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl UmaskSource for Configuration {
    fn file_creation_umask(&self) -> Result<Option<FileMode>, ConfigurationError> {
        let raw = match self.get(FILE_CREATION_UMASK_KEY) {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match FileMode::from_octal_str(raw) {
            Ok(umask) => Ok(Some(umask)),
            Err(err) => {
                warn!(key = FILE_CREATION_UMASK_KEY, value = raw, "malformed file creation umask");

                Err(ConfigurationError::MalformedUmask {
                    value: raw.to_string(),
                    source: err,
                })
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("malformed file creation umask {value:?}: {source}")]
    MalformedUmask {
        value: String,

        #[source]
        source: FileModeError,
    },
}
