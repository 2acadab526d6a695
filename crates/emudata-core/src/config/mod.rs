//! Configuration for the data location, remote and integrity check.
//!
//! Loaded from `emudata.toml` in the user config directory unless another
//! path is given. Every field has a default, so a missing file is valid.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_emudata_toml, parse_emudata_toml_str, to_toml};
pub use paths::{default_config_path, default_data_dir};
pub use schema::{EmuDataConfig, RemoteConfig};
pub use store::ConfigStore;
