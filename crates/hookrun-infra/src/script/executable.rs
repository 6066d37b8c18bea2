//! Executable-file check.

use std::path::Path;

/// True if `path` is a regular file the current process may execute.
///
/// On unix this asks the kernel via `access(2)` with `X_OK`, so ownership,
/// group membership and the root override are all taken into account.
/// On other platforms any existing regular file counts as executable.
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        rustix::fs::access(path, rustix::fs::Access::EXEC_OK).is_ok()
    }
    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    fn write_with_mode(dir: &Path, name: &str, mode: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    fn running_as_root() -> bool {
        rustix::process::geteuid().is_root()
    }

    fn spawns(path: &Path) -> bool {
        const ETXTBSY: i32 = 26;
        loop {
            let status = std::process::Command::new(path)
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .status();
            match status {
                // Another test thread may still hold the freshly written file open.
                Err(e) if e.raw_os_error() == Some(ETXTBSY) => {
                    std::thread::sleep(std::time::Duration::from_millis(10))
                }
                other => return other.is_ok(),
            }
        }
    }

    #[test]
    fn executable_file_passes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_with_mode(tmp.path(), "run.sh", 0o755);
        assert!(is_executable(&path));
    }

    #[test]
    fn non_executable_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_with_mode(tmp.path(), "run.sh", 0o644);
        assert!(!is_executable(&path));
    }

    #[test]
    fn missing_file_and_directory_fail() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!is_executable(&tmp.path().join("missing.sh")));
        assert!(!is_executable(tmp.path()));
    }

    #[test]
    fn group_execute_bit_does_not_count_for_owner() {
        // Root may execute any file with an execute bit, so the owner
        // restriction only shows up for ordinary users.
        if running_as_root() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        let path = write_with_mode(tmp.path(), "group.sh", 0o650);
        assert!(!is_executable(&path));
        assert!(!spawns(&path));
    }

    #[test]
    fn check_agrees_with_spawn() {
        let tmp = tempfile::tempdir().unwrap();
        for (name, mode) in [
            ("owner.sh", 0o700),
            ("group.sh", 0o650),
            ("other.sh", 0o601),
            ("plain.sh", 0o644),
        ] {
            let path = write_with_mode(tmp.path(), name, mode);
            assert_eq!(is_executable(&path), spawns(&path), "mode {mode:o}");
        }
    }
}
