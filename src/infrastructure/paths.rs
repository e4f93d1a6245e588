//! Paths inside the Zellij plugin sandbox, where the host filesystem is
//! mounted under `/host`.

use std::path::PathBuf;

/// Mount point of the host filesystem inside the sandbox.
pub const HOST_ROOT: &str = "/host";

/// Directory holding the trace file.
///
/// `/host` is the cwd Zellij was started from, usually the home directory, so
/// this ends up at `~/.local/share/zellij/coinpane`.
///
/// ```
/// use coinpane::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/coinpane"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/coinpane")
}

/// Rewrites a leading `~` to the sandbox host root.
///
/// ```
/// use coinpane::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/etc/coinpane.toml"), "/etc/coinpane.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_only_a_leading_home_tilde() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/a/b"), "/host/a/b");
        assert_eq!(expand_tilde("~other/a"), "~other/a");
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
        assert_eq!(expand_tilde(""), "");
    }
}
