//! Fletcher-32 checksum
//!
//! This variant sums single bytes into two running sums reduced modulo `0xFFFF`,
//! both seeded with `0xFFFF`. The checksum is `sum2 << 16 | sum1`.
//!
//! ```
//! use checksum::Fletcher32;
//!
//! let mut hasher = Fletcher32::new();
//! hasher.update(b"abc");
//! hasher.update(b"de");
//! assert_eq!(hasher.finalize(), 0x05c3_01ef);
//! assert_eq!(Fletcher32::checksum(b"abcde"), 0x05c3_01ef);
//! ```
//!
//! See also: <https://en.wikipedia.org/wiki/Fletcher%27s_checksum>

use crate::*;
use alloc::boxed::Box;
use core::alloc::Layout;
use core::hash::Hasher;

#[cfg(test)]
mod tests;

mod update;

/// Reduction base of both running sums.
pub const MODULUS: u32 = 0xFFFF;

/// Maximum number of bytes that can be summed in `u32` before a reduction.
pub const NMAX: usize = 5552;

/// Initial value of both running sums.
pub const SEED: u16 = 0xFFFF;

/// Incremental Fletcher-32 accumulator
///
/// The result does not depend on how the input is split across
/// [`update`](Self::update) calls, and [`finalize`](Self::finalize) does not
/// consume the state, so more data can follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fletcher32 {
    sum1: u16,
    sum2: u16,
}

impl Fletcher32 {
    #[inline]
    pub const fn new() -> Self {
        Self {
            sum1: SEED,
            sum2: SEED,
        }
    }

    /// Allocates a seeded accumulator on the heap.
    ///
    /// Unlike `Box::new`, an allocation failure is reported instead of aborting.
    pub fn try_boxed() -> Result<Box<Self>, ChecksumError> {
        let layout = Layout::new::<Self>();
        unsafe {
            let ptr = alloc::alloc::alloc(layout) as *mut Self;
            if ptr.is_null() {
                return Err(ChecksumError::OutOfMemory);
            }
            ptr.write(Self::new());
            Ok(Box::from_raw(ptr))
        }
    }

    /// Resumes from a value previously returned by [`finalize`](Self::finalize).
    #[inline]
    pub const fn from_checksum(checksum: u32) -> Self {
        Self {
            sum1: checksum as u16,
            sum2: (checksum >> 16) as u16,
        }
    }

    /// Computes the checksum of `data` in one call.
    #[inline]
    pub fn checksum(data: &[u8]) -> u32 {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        (self.sum1, self.sum2) = update::update(self.sum1, self.sum2, data);
    }

    /// Same as calling [`update`](Self::update) on each buffer in order.
    #[inline]
    pub fn update_vectored(&mut self, bufs: &[&[u8]]) {
        for buf in bufs {
            self.update(buf);
        }
    }

    #[inline]
    pub const fn finalize(&self) -> u32 {
        (self.sum2 as u32) << 16 | self.sum1 as u32
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current `(sum1, sum2)`.
    #[inline]
    pub const fn sums(&self) -> (u16, u16) {
        (self.sum1, self.sum2)
    }
}

impl Default for Fletcher32 {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fletcher32 {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.finalize() as u64
    }
}

impl Extend<u8> for Fletcher32 {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        let mut buf = [0u8; 64];
        let mut len = 0;
        for byte in iter {
            buf[len] = byte;
            len += 1;
            if len == buf.len() {
                self.update(&buf);
                len = 0;
            }
        }
        self.update(&buf[..len]);
    }
}

impl<'a> Extend<&'a u8> for Fletcher32 {
    #[inline]
    fn extend<T: IntoIterator<Item = &'a u8>>(&mut self, iter: T) {
        Extend::<u8>::extend(self, iter.into_iter().copied());
    }
}

#[cfg(feature = "std")]
impl std::io::Write for Fletcher32 {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
