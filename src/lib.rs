//! Streaming checksums for data preservation
//!
//! Currently provides the Fletcher-32 accumulator, usable from Rust as
//! [`Fletcher32`] and from C through the [`capi`] functions.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

use core::fmt;

pub mod capi;
#[path = "fletcher32/fletcher32.rs"]
pub mod fletcher32;

pub use fletcher32::Fletcher32;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    InvalidInput,
    OutOfMemory,
}

impl ChecksumError {
    /// Status code reported through the C interface.
    #[inline]
    pub const fn status(&self) -> i32 {
        match self {
            Self::InvalidInput => -1,
            Self::OutOfMemory => -2,
        }
    }
}

impl fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => f.write_str("invalid input"),
            Self::OutOfMemory => f.write_str("out of memory"),
        }
    }
}

impl core::error::Error for ChecksumError {}
