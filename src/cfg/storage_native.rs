use std::{
    fs::OpenOptions,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use directories::ProjectDirs;

use super::ConfigError;

static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("io.github", "orrery", "orrery_demo"));
pub(super) static CONFIG_PATH: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    PROJECT_DIRS
        .as_ref()
        .map(|dirs| dirs.config_dir().join("config.toml"))
});

/// Reads the config file at `path`.
///
/// A missing file is not an error and yields `Ok(None)`.
pub(super) fn read(path: &Path) -> Result<Option<String>, ConfigError> {
    let mut file = match OpenOptions::new().read(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::Open(e)),
    };

    let mut string = String::new();
    file.read_to_string(&mut string)
        .map_err(ConfigError::Read)?;
    Ok(Some(string))
}
