//! Configuration file discovery and loading for the CLI
//!
//! A configuration file is looked up in this order:
//!
//! 1. The path given with `--config`, which must exist
//! 2. `waferplan/config.toml` below the working directory
//! 3. `config.toml` in the platform configuration directory
//!
//! Without any of these the built-in defaults apply. A loaded file is
//! checked in full, so a bad color or scale is reported as a configuration
//! problem before any placement runs.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use waferplan::{WaferplanError, config::AppConfig};

/// Location of the project-local configuration, relative to the working
/// directory.
const LOCAL_CONFIG: &str = "waferplan/config.toml";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid style in {path}: {message}")]
    Style { path: PathBuf, message: String },

    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ConfigError> for WaferplanError {
    fn from(err: ConfigError) -> Self {
        WaferplanError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::System(path) => path,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Explicit(_) => "explicit",
            Self::Local(_) => "local",
            Self::System(_) => "system",
        };
        write!(f, "{kind} {}", self.path().display())
    }
}

/// Find and load the configuration for this run.
///
/// # Errors
///
/// Returns [`WaferplanError::Config`] if an explicit path does not exist, or
/// if the file found cannot be read, parsed or used.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, WaferplanError> {
    let explicit = explicit_path.as_ref().map(|path| path.as_ref());
    let source = discover(explicit, Path::new("."), system_config_dir().as_deref());

    match source {
        Some(source) => {
            info!(source = source.to_string(); "Loading configuration");
            Ok(load_from(&source)?)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Picks the configuration file to load.
///
/// An explicit path always wins, even when it does not exist, so that the
/// missing file is reported instead of silently falling back.
fn discover(
    explicit: Option<&Path>,
    working_dir: &Path,
    system_dir: Option<&Path>,
) -> Option<ConfigSource> {
    if let Some(path) = explicit {
        return Some(ConfigSource::Explicit(path.to_path_buf()));
    }

    let local = working_dir.join(LOCAL_CONFIG);
    if local.is_file() {
        return Some(ConfigSource::Local(local));
    }

    let system = system_dir?.join(CONFIG_FILE_NAME);
    if system.is_file() {
        return Some(ConfigSource::System(system));
    }
    debug!(path = system.display().to_string(); "System configuration file not found");
    None
}

fn system_config_dir() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("com", "orreryworks", "waferplan");
    if dirs.is_none() {
        debug!("Could not determine platform-specific config directory");
    }
    dirs.map(|dirs| dirs.config_dir().to_path_buf())
}

fn load_from(source: &ConfigSource) -> Result<AppConfig, ConfigError> {
    let path = source.path();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.style().check().map_err(|message| ConfigError::Style {
        path: path.to_path_buf(),
        message,
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_explicit_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();

        assert!(matches!(err, WaferplanError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_explicit_file_is_parsed() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "[placement]\nmax_positions = 7\n");

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.placement().max_positions(), 7);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "[placement\n");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, WaferplanError::Config(_)));
    }

    #[test]
    fn test_bad_style_is_reported_on_load() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "[style]\nscale = 0.0\n");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, WaferplanError::Config(_)));
        assert!(err.to_string().contains("Invalid style"));
    }

    #[test]
    fn test_discovery_order() {
        let work = tempdir().unwrap();
        let system = tempdir().unwrap();

        assert_eq!(discover(None, work.path(), Some(system.path())), None);
        assert_eq!(discover(None, work.path(), None), None);

        let system_file = write(system.path(), "config.toml", "");
        assert_eq!(
            discover(None, work.path(), Some(system.path())),
            Some(ConfigSource::System(system_file))
        );

        let local_file = write(work.path(), LOCAL_CONFIG, "");
        assert_eq!(
            discover(None, work.path(), Some(system.path())),
            Some(ConfigSource::Local(local_file))
        );

        let explicit = work.path().join("other.toml");
        assert_eq!(
            discover(Some(&explicit), work.path(), Some(system.path())),
            Some(ConfigSource::Explicit(explicit))
        );
    }

    #[test]
    fn test_source_display_names_kind_and_path() {
        let source = ConfigSource::Local(PathBuf::from("waferplan/config.toml"));
        assert_eq!(source.to_string(), "local waferplan/config.toml");
    }
}
