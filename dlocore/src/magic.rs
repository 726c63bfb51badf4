/// Name of the environment variable containing the path to the translator configuration file.
/// If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/dlo/config.toml` or `$HOME/.config/dlo/config.toml`
///  (2) on Windows: `%APPDATA%\dlo\config.toml`
pub const ENV_CONFIG_PATH: &str = "DLO_CONFIG_PATH";

/// Directory name used under the platform configuration directory.
pub const CONFIG_DIR_NAME: &str = "dlo";

/// File name of the translator configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
