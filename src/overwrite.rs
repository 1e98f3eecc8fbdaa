use rand::{CryptoRng, RngCore};
use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use tracing::debug;

/// Number of overwrite passes a shred performs
pub const DEFAULT_PASSES: u32 = 3;

/// Size of the random buffer streamed into the target per write
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A seekable sink that can force written data to stable storage
pub trait Durable: Write + Seek {
    fn sync(&mut self) -> io::Result<()>;
}

impl Durable for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Overwrite the first `size` bytes of `target` with random data, `passes` times.
///
/// Each pass rewinds to offset 0, streams `size` fresh random bytes through a
/// buffer of at most [`CHUNK_SIZE`] bytes and syncs before the next pass
/// starts. The first error aborts the remaining passes.
///
/// Returns the total number of bytes written across all passes.
pub fn overwrite_passes<T, R>(target: &mut T, size: u64, passes: u32, rng: &mut R) -> io::Result<u64>
where
    T: Durable + ?Sized,
    R: RngCore + CryptoRng + ?Sized,
{
    let buf_len = usize::try_from(size).map_or(CHUNK_SIZE, |size| size.min(CHUNK_SIZE));
    let mut buf = vec![0u8; buf_len];
    let mut total = 0u64;

    for pass in 1..=passes {
        target.seek(SeekFrom::Start(0))?;
        total += write_random(target, size, rng, &mut buf)?;
        target.sync()?;
        debug!(pass, passes, size, "overwrite pass synced");
    }

    Ok(total)
}

fn write_random<T, R>(target: &mut T, size: u64, rng: &mut R, buf: &mut [u8]) -> io::Result<u64>
where
    T: Write + ?Sized,
    R: RngCore + ?Sized,
{
    let mut remaining = size;
    while remaining > 0 {
        let n = remaining.min(buf.len() as u64) as usize;
        let chunk = &mut buf[..n];
        rng.try_fill_bytes(chunk)?;
        target.write_all(chunk)?;
        remaining -= n as u64;
    }
    Ok(size)
}
