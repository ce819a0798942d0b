//! Path helpers for the Zellij sandbox, where the host filesystem is mounted
//! under `/host`.

use std::path::PathBuf;

/// Directory for plugin-owned files such as the trace log.
///
/// `/host` points to the cwd of the last focused terminal, which usually makes
/// this `~/.local/share/zellij/zatalog` on the host.
///
/// # Examples
///
/// ```
/// use zatalog::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zatalog"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zatalog")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use zatalog::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/Pictures"), "/host/Pictures");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Maps a path typed by the user to where the plugin can read it.
///
/// Tilde paths expand to `/host`, relative paths resolve against `/host`, and
/// absolute paths are used as given.
///
/// # Examples
///
/// ```
/// use zatalog::infrastructure::to_sandbox_path;
///
/// assert_eq!(to_sandbox_path("~/cap.png").to_str(), Some("/host/cap.png"));
/// assert_eq!(to_sandbox_path("img/cap.png").to_str(), Some("/host/img/cap.png"));
/// assert_eq!(to_sandbox_path("/tmp/cap.png").to_str(), Some("/tmp/cap.png"));
/// ```
#[must_use]
pub fn to_sandbox_path(path: &str) -> PathBuf {
    let expanded = expand_tilde(path.trim());
    if expanded.starts_with('/') {
        PathBuf::from(expanded)
    } else {
        PathBuf::from("/host").join(expanded)
    }
}
