use std::path::PathBuf;

use super::Config;

/// Returns the config directory: `~/.config/cornerclock/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("cornerclock"))
}

/// Returns the config file path: `~/.config/cornerclock/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            NOT_FOUND.to_string()
        } else {
            format!("{}: {e}", path.display())
        }
    })?;
    parse(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Parses and validates config text.
pub(super) fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults. Any other failure returns
/// defaults along with the message, so the caller can log it once the
/// logger is up.
pub fn load() -> (Config, Option<String>) {
    match try_load() {
        Ok(config) => (config, None),
        Err(e) if e == NOT_FOUND => (Config::default(), None),
        Err(e) => (Config::default(), Some(e)),
    }
}

const NOT_FOUND: &str = "config file not found";
