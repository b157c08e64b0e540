use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LintError, Result};

use super::Config;

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Config file looked up in the repository root.
pub const LOCAL_CONFIG_NAME: &str = "corpus-lint.toml";

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Loads `corpus-lint.toml` from the repository root.
///
/// A missing file yields `Config::default()`.
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
    root: PathBuf,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self::with_fs(RealFileSystem, root)
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub fn with_fs(fs: F, root: &Path) -> Self {
        Self {
            fs,
            root: root.to_path_buf(),
        }
    }

    fn local_config_path(&self) -> PathBuf {
        self.root.join(LOCAL_CONFIG_NAME)
    }

    fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        let path = self.local_config_path();
        match self.fs.read_to_string(&path) {
            Ok(content) => {
                debug!("loading config from {}", path.display());
                Self::parse_config(&content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no {LOCAL_CONFIG_NAME} found, using defaults");
                Ok(Config::default())
            }
            Err(source) => Err(LintError::FileRead { path, source }),
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| LintError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("loading config from {}", path.display());
        Self::parse_config(&content)
    }
}

/// Reject values that parse but cannot drive a run.
///
/// # Errors
/// Returns a configuration error describing the first invalid value.
pub fn validate(config: &Config) -> Result<()> {
    if config.ignore_file.trim().is_empty() {
        return Err(LintError::Config("ignore_file must not be empty".into()));
    }
    if config.parallel.chunk_size == 0 {
        return Err(LintError::Config(
            "parallel.chunk_size must be at least 1".into(),
        ));
    }
    if config.changed.base.trim().is_empty() {
        return Err(LintError::Config("changed.base must not be empty".into()));
    }
    Ok(())
}
