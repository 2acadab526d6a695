//! Default config and data locations.

use std::path::PathBuf;

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "emudata.toml";

/// Directory under the user data dir holding the clone.
pub const DATA_DIR_NAME: &str = "py21cmEMU";

/// `<config dir>/emudata/emudata.toml`, e.g. `~/.config/emudata/emudata.toml`.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(config_path_in(&config_dir))
}

pub fn config_path_in(config_dir: &std::path::Path) -> PathBuf {
    config_dir.join("emudata").join(CONFIG_FILE_NAME)
}

/// `<data dir>/py21cmEMU`, e.g. `~/.local/share/py21cmEMU`.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(data_dir.join(DATA_DIR_NAME))
}
