// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use shotmark_ipc::Result;

use crate::config::ShotmarkConfig;

/// Runtime dir for IPC files (socket + lock).
fn runtime_ipc_dir() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("shotmark")
}

pub fn default_socket_path() -> PathBuf {
    runtime_ipc_dir().join("shotmark.sock")
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn default_log_path(file: &str) -> PathBuf {
    let base = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    base.join("shotmark").join(file)
}

/// `$SHOTMARK_DIR` when set and non-empty.
pub fn output_dir_override() -> Option<PathBuf> {
    std::env::var_os("SHOTMARK_DIR")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
}

/// Where screenshots go.
///
/// Priority:
/// 1) $SHOTMARK_DIR (if set and non-empty)
/// 2) config shotmark.screenshot_directory (if non-empty)
/// 3) $XDG_RUNTIME_DIR
/// 4) /tmp
pub fn output_dir_from_cfg(cfg: &ShotmarkConfig) -> PathBuf {
    resolve_output_dir(output_dir_override(), cfg)
}

fn resolve_output_dir(env_dir: Option<PathBuf>, cfg: &ShotmarkConfig) -> PathBuf {
    if let Some(p) = env_dir {
        return p;
    }

    let p = cfg.screenshot_directory.clone();
    if !p.as_os_str().is_empty() {
        return p;
    }

    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}

pub fn default_output_path(cfg: &ShotmarkConfig, ext: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();

    output_dir_from_cfg(cfg).join(format!("shotmark-{ts}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_dir_wins_over_config() {
        let cfg = ShotmarkConfig {
            screenshot_directory: PathBuf::from("/cfg/dir"),
            ..ShotmarkConfig::default()
        };
        assert_eq!(
            resolve_output_dir(Some(PathBuf::from("/env/dir")), &cfg),
            PathBuf::from("/env/dir")
        );
        assert_eq!(resolve_output_dir(None, &cfg), PathBuf::from("/cfg/dir"));
    }

    #[test]
    fn socket_lives_in_its_own_dir() {
        let sock = default_socket_path();
        assert_eq!(sock.file_name().and_then(|s| s.to_str()), Some("shotmark.sock"));
        assert!(sock.parent().is_some_and(|p| p.ends_with("shotmark")));
    }
}
