use std::fmt;
use std::fs::FileType;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Step of the shred pipeline an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Open,
    Stat,
    Overwrite,
    Truncate,
    Close,
    Unlink,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Open => "open",
            Stage::Stat => "stat",
            Stage::Overwrite => "overwrite",
            Stage::Truncate => "truncate",
            Stage::Close => "close",
            Stage::Unlink => "unlink",
        };
        f.write_str(name)
    }
}

/// Kind of filesystem object found at a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    BlockDevice,
    CharDevice,
    Fifo,
    Socket,
    Other,
}

impl FileKind {
    pub fn of(file_type: FileType) -> Self {
        if file_type.is_file() {
            return Self::Regular;
        }
        if file_type.is_dir() {
            return Self::Directory;
        }
        if file_type.is_symlink() {
            return Self::Symlink;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if file_type.is_block_device() {
                return Self::BlockDevice;
            }
            if file_type.is_char_device() {
                return Self::CharDevice;
            }
            if file_type.is_fifo() {
                return Self::Fifo;
            }
            if file_type.is_socket() {
                return Self::Socket;
            }
        }
        Self::Other
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::Regular => "regular file",
            FileKind::Directory => "directory",
            FileKind::Symlink => "symbolic link",
            FileKind::BlockDevice => "block device",
            FileKind::CharDevice => "character device",
            FileKind::Fifo => "fifo",
            FileKind::Socket => "socket",
            FileKind::Other => "special file",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ShredError {
    #[error("{}: no such file or directory", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: permission denied ({stage})", .path.display())]
    PermissionDenied {
        path: PathBuf,
        stage: Stage,
        #[source]
        source: io::Error,
    },

    #[error("{}: not a regular file: {kind}", .path.display())]
    WrongFileType {
        path: PathBuf,
        kind: FileKind,
        stage: Stage,
    },

    #[error("{}: {stage} failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        stage: Stage,
        #[source]
        source: io::Error,
    },

    #[error("{}: failed to remove: {source}", .path.display())]
    Unlink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid pass count: {0}. Must be at least 1")]
    InvalidPasses(u32),
}

impl ShredError {
    /// Classify an I/O failure raised while working on `path`
    pub(crate) fn from_io(path: &Path, stage: Stage, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if stage == Stage::Unlink {
            return Self::Unlink { path, source };
        }
        match source.kind() {
            io::ErrorKind::NotFound if matches!(stage, Stage::Open | Stage::Stat) => {
                Self::NotFound { path, source }
            }
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path,
                stage,
                source,
            },
            io::ErrorKind::IsADirectory => Self::WrongFileType {
                path,
                kind: FileKind::Directory,
                stage,
            },
            _ => Self::Io {
                path,
                stage,
                source,
            },
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path, .. }
            | Self::PermissionDenied { path, .. }
            | Self::WrongFileType { path, .. }
            | Self::Io { path, .. }
            | Self::Unlink { path, .. } => Some(path),
            Self::InvalidPasses(_) => None,
        }
    }

    /// Stage the pipeline stopped at
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::NotFound { .. } => Some(Stage::Open),
            Self::PermissionDenied { stage, .. }
            | Self::WrongFileType { stage, .. }
            | Self::Io { stage, .. } => Some(*stage),
            Self::Unlink { .. } => Some(Stage::Unlink),
            Self::InvalidPasses(_) => None,
        }
    }

    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::NotFound { source, .. }
            | Self::PermissionDenied { source, .. }
            | Self::Io { source, .. }
            | Self::Unlink { source, .. } => source.raw_os_error(),
            Self::WrongFileType { .. } | Self::InvalidPasses(_) => None,
        }
    }

    /// Process exit status for this error: the OS error number when it fits
    /// in an exit status, 1 otherwise
    pub fn exit_status(&self) -> u8 {
        self.raw_os_error()
            .and_then(|code| u8::try_from(code).ok())
            .filter(|&code| code != 0)
            .unwrap_or(1)
    }
}

pub type Result<T> = std::result::Result<T, ShredError>;
