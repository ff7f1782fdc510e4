//! Process environment: data directory and listen port resolution.

use std::{env, path::PathBuf};

/// Default directory the JSON documents are stored under.
const DEFAULT_DATA_DIR: &str = "data";
/// Environment variable that overrides [`DEFAULT_DATA_DIR`].
const DATA_DIR_ENV: &str = "DATA_DIR";
/// Default TCP port the server listens on.
const DEFAULT_PORT: u16 = 3000;
/// Environment variable that overrides [`DEFAULT_PORT`].
const PORT_ENV: &str = "PORT";

/// Resolve the data directory taking the environment override into account.
pub fn resolve_data_dir() -> PathBuf {
    env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Resolve the listen port, falling back to the default on absent or
/// unparsable values.
pub fn resolve_port() -> u16 {
    env::var(PORT_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
