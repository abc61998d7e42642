// Author: Dustin Pilgrim
// License: MIT

use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("socket path has no parent dir: {}", .0.display())]
    NoParent(PathBuf),

    #[error("shotmarkd already running (lock held at {})", .0.display())]
    AlreadyRunning(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pid file next to the socket. Removed on drop.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    file: fs::File,
}

impl InstanceLock {
    pub fn acquire_for_socket(sock_path: &Path) -> Result<Self, LockError> {
        let dir = sock_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| LockError::NoParent(sock_path.to_path_buf()))?;

        let lock_path = dir.join("shotmarkd.lock");

        // a dead owner's lock is cleared once
        if lock_path.exists() && is_lock_stale(&lock_path) {
            let _ = fs::remove_file(&lock_path);
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&lock_path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(LockError::AlreadyRunning(lock_path));
            }
            Err(e) => return Err(LockError::Io(e)),
        };

        writeln!(file, "pid={}", std::process::id())?;

        Ok(Self {
            path: lock_path,
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = self.file.flush();
        let _ = fs::remove_file(&self.path);
    }
}

fn is_lock_stale(lock_path: &Path) -> bool {
    let mut s = String::new();
    if fs::File::open(lock_path)
        .and_then(|mut f| f.read_to_string(&mut s))
        .is_err()
    {
        return false;
    }

    let pid = s
        .lines()
        .find_map(|l| l.strip_prefix("pid="))
        .and_then(|v| v.trim().parse::<libc::pid_t>().ok())
        .filter(|pid| *pid > 0);

    let Some(pid) = pid else {
        return false;
    };

    !process_alive(pid)
}

fn process_alive(pid: libc::pid_t) -> bool {
    // signal 0 only probes; EPERM still means the process exists
    let rc = unsafe { libc::kill(pid, 0) };
    rc == 0 || std::io::Error::last_os_error().raw_os_error() != Some(libc::ESRCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_reports_already_running() {
        let dir = tempfile::tempdir().unwrap();
        let sock = dir.path().join("shotmark.sock");

        let lock = InstanceLock::acquire_for_socket(&sock).unwrap();
        let err = InstanceLock::acquire_for_socket(&sock).unwrap_err();
        assert!(matches!(err, LockError::AlreadyRunning(_)), "{err}");

        let lock_path = lock.path().to_path_buf();
        drop(lock);
        assert!(!lock_path.exists());
        assert!(InstanceLock::acquire_for_socket(&sock).is_ok());
    }

    #[test]
    fn lock_of_dead_process_is_taken_over() {
        let dir = tempfile::tempdir().unwrap();
        let sock = dir.path().join("shotmark.sock");
        // above any kernel pid_max
        fs::write(dir.path().join("shotmarkd.lock"), "pid=2147483000\n").unwrap();

        let lock = InstanceLock::acquire_for_socket(&sock).unwrap();
        let body = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(body.trim(), format!("pid={}", std::process::id()));
    }

    #[test]
    fn unreadable_pid_is_not_stale() {
        let dir = tempfile::tempdir().unwrap();
        let sock = dir.path().join("shotmark.sock");
        fs::write(dir.path().join("shotmarkd.lock"), "garbage\n").unwrap();

        assert!(matches!(
            InstanceLock::acquire_for_socket(&sock),
            Err(LockError::AlreadyRunning(_))
        ));
    }
}
