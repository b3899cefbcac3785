//! Path utilities for locating gifscout's data files.

use std::path::PathBuf;

/// Application directory name under the platform data directory.
const APP_DIR: &str = "gifscout";

/// Returns the data directory for session and log files.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/gifscout`
/// 2. `$HOME/.local/share/gifscout`
/// 3. `./.gifscout` when no home directory is known
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn data_dir_from(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|p| p.is_absolute()) {
        return xdg.join(APP_DIR);
    }
    home.map_or_else(
        || PathBuf::from(format!(".{APP_DIR}")),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, or when `HOME` is unset, are returned as-is.
///
/// # Examples
///
/// ```
/// use gifscout::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, std::env::var_os("HOME").map(PathBuf::from))
}

fn expand_tilde_with(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_data_home_wins_over_home() {
        let dir = data_dir_from(Some("/xdg".into()), Some("/home/me".into()));
        assert_eq!(dir, PathBuf::from("/xdg/gifscout"));
    }

    #[test]
    fn relative_xdg_is_ignored() {
        let dir = data_dir_from(Some("relative".into()), Some("/home/me".into()));
        assert_eq!(dir, PathBuf::from("/home/me/.local/share/gifscout"));
    }

    #[test]
    fn falls_back_to_working_directory() {
        assert_eq!(data_dir_from(None, None), PathBuf::from(".gifscout"));
    }

    #[test]
    fn tilde_expansion() {
        let home = Some(PathBuf::from("/home/me"));
        assert_eq!(expand_tilde_with("~", home.clone()), PathBuf::from("/home/me"));
        assert_eq!(
            expand_tilde_with("~/conf/gifscout.toml", home.clone()),
            PathBuf::from("/home/me/conf/gifscout.toml")
        );
        assert_eq!(expand_tilde_with("~other/x", home), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
    }
}
