//! Reading and writing the config file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Config, ConfigError, Result};

const CONFIG_DIR_NAME: &str = "jira-ticket-cli";
const CONFIG_FILE_NAME: &str = "config.json";

/// Location of the config file in the platform config directory.
pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Read a config file. A missing file is an empty config.
pub fn load_file(path: &Path) -> Result<Config> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No config file");
            return Ok(Config::default());
        }
        Err(e) => return Err(ConfigError::ReadError(e)),
    };

    serde_json::from_str(&contents).map_err(ConfigError::ParseError)
}

/// Write a config file readable only by the current user.
pub fn save_file(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(ConfigError::CreateDirError)?;
        restrict(dir, 0o700).map_err(ConfigError::CreateDirError)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(ConfigError::SerializeError)?;
    write_private(path, json.as_bytes()).map_err(ConfigError::WriteError)?;
    // An existing file keeps its old mode through the open above.
    restrict(path, 0o600).map_err(ConfigError::WriteError)?;

    debug!(path = %path.display(), "Saved config");
    Ok(())
}

/// Remove the config file if it exists.
pub fn clear(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::WriteError(e)),
    }
}

/// Create the file as 0600 so the token is never readable by others,
/// not even between creation and the chmod.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

#[cfg(unix)]
fn restrict(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn restrict(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
