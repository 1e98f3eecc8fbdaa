use crate::error::{FileKind, Result, ShredError, Stage};
use crate::overwrite::{overwrite_passes, DEFAULT_PASSES};
use rand::rngs::OsRng;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Options controlling a shred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShredOptions {
    /// Number of random overwrite passes, at least 1
    pub passes: u32,
    /// Resize the file to zero bytes after overwriting
    pub truncate: bool,
    /// Unlink the path once the data is destroyed
    pub delete: bool,
}

impl Default for ShredOptions {
    fn default() -> Self {
        Self {
            passes: DEFAULT_PASSES,
            truncate: true,
            delete: true,
        }
    }
}

/// Overwrite, truncate and delete the file at `path`
pub fn shred(path: impl AsRef<Path>) -> Result<()> {
    shred_file(path, true)
}

/// Overwrite and truncate the file at `path`, deleting it if `delete_after`
pub fn shred_file(path: impl AsRef<Path>, delete_after: bool) -> Result<()> {
    shred_file_with_options(path, true, delete_after)
}

pub fn shred_file_with_options(
    path: impl AsRef<Path>,
    truncate_after: bool,
    delete_after: bool,
) -> Result<()> {
    let options = ShredOptions {
        truncate: truncate_after,
        delete: delete_after,
        ..Default::default()
    };
    shred_with(path, &options)
}

/// Shred the file at `path` according to `options`.
///
/// The size is read once from the open handle and every pass covers exactly
/// that extent; concurrent changes to the file's length are not tracked.
/// Shredding the same path from several callers at once is not synchronized.
///
/// A symlink is followed for the overwrite and truncate, and the link itself
/// is what gets unlinked. On error the file must not be assumed destroyed.
pub fn shred_with(path: impl AsRef<Path>, options: &ShredOptions) -> Result<()> {
    shred_path(path.as_ref(), options)
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
fn shred_path(path: &Path, options: &ShredOptions) -> Result<()> {
    if options.passes == 0 {
        return Err(ShredError::InvalidPasses(options.passes));
    }

    info!(passes = options.passes, "shredding file");

    // Advisory: rejects directories and special files before opening them
    let metadata = fs::metadata(path).map_err(|e| ShredError::from_io(path, Stage::Open, e))?;
    ensure_regular(path, metadata.file_type(), Stage::Open)?;

    let mut file = open_for_write(path)?;

    let metadata = file
        .metadata()
        .map_err(|e| ShredError::from_io(path, Stage::Stat, e))?;
    ensure_regular(path, metadata.file_type(), Stage::Stat)?;

    let size = metadata.len();
    debug!(size, "size snapshot taken");

    if size > 0 {
        let written = overwrite_passes(&mut file, size, options.passes, &mut OsRng)
            .map_err(|e| ShredError::from_io(path, Stage::Overwrite, e))?;
        debug!(written, "overwrite complete");
    } else {
        debug!("empty file, no overwrite needed");
    }

    if options.truncate {
        file.set_len(0)
            .and_then(|()| file.sync_all())
            .map_err(|e| ShredError::from_io(path, Stage::Truncate, e))?;
        debug!("truncated to zero bytes");
    }

    close(file, path);

    if options.delete {
        fs::remove_file(path).map_err(|e| ShredError::from_io(path, Stage::Unlink, e))?;
        debug!("unlinked");
    }

    info!("shred complete");
    Ok(())
}

fn ensure_regular(path: &Path, file_type: fs::FileType, stage: Stage) -> Result<()> {
    match FileKind::of(file_type) {
        FileKind::Regular => Ok(()),
        kind => Err(ShredError::WrongFileType {
            path: path.to_path_buf(),
            kind,
            stage,
        }),
    }
}

/// Open an existing file write-only, never creating it
fn open_for_write(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);

    // A fifo swapped in after the type check must not block the open
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NONBLOCK);
    }

    options
        .open(path)
        .map_err(|e| ShredError::from_io(path, Stage::Open, e))
}

/// Release the handle. A failing close is logged, it cannot undo the work
/// already synced to disk.
#[cfg(unix)]
fn close(file: File, path: &Path) {
    use std::os::unix::io::IntoRawFd;

    let fd = file.into_raw_fd();
    // SAFETY: `fd` was just taken out of an owned `File`, so nothing else closes it.
    if unsafe { libc::close(fd) } != 0 {
        let err = std::io::Error::last_os_error();
        tracing::warn!(path = %path.display(), stage = %Stage::Close, error = %err, "close failed");
    }
}

#[cfg(not(unix))]
fn close(file: File, _path: &Path) {
    drop(file);
}
