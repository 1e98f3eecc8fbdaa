use shredder::{shred, shred_file, shred_file_with_options, FileKind, ShredError, Stage};
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::tempdir;

/// Create a sparse file of `size` bytes with `content` written every MiB
fn create_large_file(path: &Path, size: u64, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    let interval = 1024 * 1024;
    let mut offset = 0u64;
    while offset < size {
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(content)?;
        offset += interval;
    }
    file.set_len(size)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[test]
fn shred_removes_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("sample_test_file.txt");
    fs::write(&path, b"This is test content that should be shredded")?;

    shred(&path)?;

    assert!(!path.exists(), "file still exists after shredding");
    Ok(())
}

#[test]
fn shred_missing_file_is_not_found() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("non_existent_file.txt");

    let err = shred(&path).unwrap_err();

    assert!(matches!(err, ShredError::NotFound { .. }), "got {err:?}");
    assert_eq!(err.stage(), Some(Stage::Open));
    Ok(())
}

#[test]
fn shred_empty_file_deletes_it() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("empty_test.txt");
    fs::write(&path, b"")?;

    shred(&path)?;

    assert!(!path.exists(), "empty file still exists after shredding");
    Ok(())
}

#[test]
fn overwrite_only_destroys_content_in_place() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("overwrite_test.txt");
    let original = b"SENSITIVE_DATA_TO_BE_OVERWRITTEN_1234567890";
    fs::write(&path, original)?;

    shred_file_with_options(&path, false, false)?;

    let after = fs::read(&path)?;
    assert_eq!(after.len(), original.len(), "overwrite must not change length");
    assert_ne!(after.as_slice(), original.as_slice(), "original content still present");
    Ok(())
}

#[test]
fn overwrite_only_leaves_empty_file_empty() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("still_empty.txt");
    fs::write(&path, b"")?;

    shred_file_with_options(&path, false, false)?;

    assert_eq!(fs::metadata(&path)?.len(), 0);
    Ok(())
}

#[test]
fn read_only_file_is_left_untouched() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("readonly_test.txt");
    let content = b"read-only content";
    fs::write(&path, content)?;

    let mut perms = fs::metadata(&path)?.permissions();
    perms.set_readonly(true);
    fs::set_permissions(&path, perms)?;

    // Privileged users can open read-only files for writing
    if OpenOptions::new().write(true).open(&path).is_ok() {
        eprintln!("skipping: read-only files are writable for this user");
        return Ok(());
    }

    let err = shred(&path).unwrap_err();

    assert!(matches!(err, ShredError::PermissionDenied { stage: Stage::Open, .. }), "got {err:?}");
    assert_eq!(fs::read(&path)?, content);
    Ok(())
}

#[test]
fn directory_is_rejected_and_kept() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let target = dir.path().join("sample_test_dir");
    fs::create_dir(&target)?;

    let err = shred(&target).unwrap_err();

    assert!(
        matches!(err, ShredError::WrongFileType { kind: FileKind::Directory, .. }),
        "got {err:?}"
    );
    assert!(target.is_dir(), "directory must survive a failed shred");
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlink_is_removed_and_target_truncated() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let target = dir.path().join("test_symlink_target.txt");
    let link = dir.path().join("test_symlink.txt");
    fs::write(&target, b"target content")?;
    std::os::unix::fs::symlink("test_symlink_target.txt", &link)?;

    shred(&link)?;

    assert!(fs::symlink_metadata(&link).is_err(), "symlink should be removed");
    let meta = fs::metadata(&target)?;
    assert_eq!(meta.len(), 0, "target should be truncated to 0 bytes");
    Ok(())
}

#[cfg(unix)]
#[test]
fn device_files_are_rejected() {
    for device in ["/dev/null", "/dev/zero", "/dev/urandom"] {
        if !Path::new(device).exists() {
            eprintln!("skipping: {device} not available");
            continue;
        }

        let err = shred(device).unwrap_err();

        assert!(
            matches!(err, ShredError::WrongFileType { kind: FileKind::CharDevice, .. }),
            "{device}: got {err:?}"
        );
        assert!(Path::new(device).exists());
    }
}

#[cfg(target_os = "linux")]
#[test]
fn unlink_failure_keeps_destroyed_data() -> Result<(), Box<dyn Error>> {
    use std::os::unix::io::AsRawFd;

    if !Path::new("/proc/self/fd").is_dir() {
        eprintln!("skipping: /proc not mounted");
        return Ok(());
    }

    let dir = tempdir()?;
    let path = dir.path().join("held_open.txt");
    fs::write(&path, b"content reachable through a descriptor link")?;

    // Entries under /proc/self/fd resolve for open but cannot be unlinked
    let held = fs::File::open(&path)?;
    let link = format!("/proc/self/fd/{}", held.as_raw_fd());

    let err = shred(&link).unwrap_err();

    assert!(matches!(err, ShredError::Unlink { .. }), "got {err:?}");
    assert_eq!(err.stage(), Some(Stage::Unlink));
    assert!(err.raw_os_error().is_some());
    assert_eq!(fs::metadata(&path)?.len(), 0, "truncate must stay done");
    drop(held);
    Ok(())
}

#[test]
fn large_file_overwrite_destroys_pattern() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("large_overwrite_test.txt");
    let pattern = b"I_AM_A_PATTERN_1234567890_ABCDABCD";
    let size = 10 * 1024 * 1024;
    create_large_file(&path, size, pattern)?;

    shred_file_with_options(&path, false, false)?;

    let data = fs::read(&path)?;
    assert_eq!(data.len() as u64, size);
    assert!(!contains(&data, pattern), "original pattern still found after overwriting");
    Ok(())
}

#[test]
fn large_file_truncate_keeps_empty_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("large_truncate_test.txt");
    let size = 5 * 1024 * 1024;
    create_large_file(&path, size, b"LARGE_FILE_CONTENT_TO_BE_TRUNCATED_AFTER_SHRED")?;
    assert_eq!(fs::metadata(&path)?.len(), size);

    shred_file(&path, false)?;

    assert_eq!(fs::metadata(&path)?.len(), 0, "file not truncated");
    Ok(())
}

#[test]
fn large_file_full_shred() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("large_fullshred_test.txt");
    let size = 8 * 1024 * 1024;
    create_large_file(&path, size, b"CONTENT_TO_BE_DELETED_AFTER_SHRED")?;
    assert_eq!(fs::metadata(&path)?.len(), size);

    shred(&path)?;

    assert!(!path.exists(), "file still exists after full shred");
    Ok(())
}
