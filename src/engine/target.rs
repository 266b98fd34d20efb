//! Target path resolution and tolerant file access
//!
//! Target paths may carry a leading `~` and `$VAR`/`${VAR}` environment
//! references. Existing targets are read through a staged decode so a
//! legacy-encoded config file never aborts an apply on its own.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{ApplyError, LineBuffer};

/// Expand `~` and environment-variable references in a target path.
///
/// Fails with [`ApplyError::EmptyTarget`] for an empty path. Unset variables
/// are left verbatim rather than erased, so a template written for another
/// machine's layout fails visibly instead of writing somewhere unexpected.
pub fn resolve_target(path: &str) -> Result<PathBuf, ApplyError> {
    if path.is_empty() {
        return Err(ApplyError::EmptyTarget);
    }
    Ok(expand_home(&expand_env(path)))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest.trim_start_matches(['/', '\\']));
            }
        }
    }
    PathBuf::from(path)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").unwrap()
    })
}

fn expand_env(path: &str) -> String {
    env_var_pattern()
        .replace_all(path, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Decode target bytes: strict UTF-8 first, then Windows-1252, then lossy
/// UTF-8 as the last resort.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let bytes = err.into_bytes();
            let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
            if had_errors {
                String::from_utf8_lossy(&bytes).into_owned()
            } else {
                text.into_owned()
            }
        }
    }
}

/// Load the target's lines; a missing file starts with an empty buffer.
pub fn load_buffer(path: &Path) -> Result<LineBuffer, ApplyError> {
    if !path.exists() {
        return Ok(LineBuffer::new());
    }
    let bytes = std::fs::read(path)?;
    Ok(LineBuffer::from_text(&decode_text(bytes)))
}

/// Write the buffer as the file's complete contents in one pass, creating
/// parent directories on the way.
pub fn write_buffer(path: &Path, buffer: LineBuffer) -> Result<(), ApplyError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, buffer.into_text())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_target_rejected() {
        assert!(matches!(resolve_target(""), Err(ApplyError::EmptyTarget)));
    }

    #[test]
    fn test_plain_path_unchanged() {
        let path = resolve_target("/tmp/out.conf").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/out.conf"));
    }

    #[test]
    fn test_tilde_expansion() {
        let home = dirs::home_dir().expect("test needs a home directory");
        assert_eq!(resolve_target("~").unwrap(), home);
        assert_eq!(
            resolve_target("~/app/config").unwrap(),
            home.join("app/config")
        );
    }

    #[test]
    fn test_tilde_mid_path_not_expanded() {
        let path = resolve_target("/tmp/~backup").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/~backup"));
    }

    #[test]
    fn test_env_var_expansion() {
        env::set_var("PRISMO_TEST_DIR", "/opt/prismo");
        assert_eq!(expand_env("$PRISMO_TEST_DIR/cfg"), "/opt/prismo/cfg");
        assert_eq!(expand_env("${PRISMO_TEST_DIR}/cfg"), "/opt/prismo/cfg");
    }

    #[test]
    fn test_unset_env_var_left_verbatim() {
        env::remove_var("PRISMO_TEST_UNSET");
        assert_eq!(expand_env("$PRISMO_TEST_UNSET/x"), "$PRISMO_TEST_UNSET/x");
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("héllo\n".as_bytes().to_vec()), "héllo\n");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is 'é' in Windows-1252 but invalid standalone UTF-8.
        let bytes = vec![b'c', b'a', b'f', 0xE9];
        assert_eq!(decode_text(bytes), "café");
    }
}
