//! Shredder - overwrite a file with random data before removing it
//!
//! A shred is a linear pipeline over a single open handle:
//!
//! ```text
//! Open → Stat → Overwrite × 3 → Truncate → Close → Unlink
//! ```
//!
//! - **Open**: write-only, never creates; directories and special files are rejected
//! - **Stat**: size is read once from the open handle
//! - **Overwrite**: each pass streams fresh OS randomness over the whole extent, then syncs
//! - **Truncate**: optional, resize to zero bytes and sync
//! - **Unlink**: optional, remove the path (a symlink itself, not its target)
//!
//! Overwriting gives no guarantee on journaling filesystems, copy-on-write
//! filesystems or flash storage with wear levelling.
//!
//! ## Example
//!
//! ```no_run
//! use shredder::{shred, shred_with, ShredOptions};
//!
//! // Overwrite, truncate and delete
//! shred("secrets.txt").unwrap();
//!
//! // Overwrite in place, keep the file and its length
//! let options = ShredOptions {
//!     truncate: false,
//!     delete: false,
//!     ..Default::default()
//! };
//! shred_with("disk.img", &options).unwrap();
//! ```

pub mod error;
pub mod overwrite;
pub mod shredder;

pub use error::{FileKind, Result, ShredError, Stage};
pub use overwrite::{overwrite_passes, Durable, CHUNK_SIZE, DEFAULT_PASSES};
pub use shredder::{shred, shred_file, shred_file_with_options, shred_with, ShredOptions};
