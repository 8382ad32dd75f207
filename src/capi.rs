//! C interface
//!
//! Handles are heap allocated by [`fletcher32_init`] and must be released
//! exactly once with [`fletcher32_free`]. Functions returning `i32` report `0`
//! on success and [`ChecksumError::status`] on failure, leaving the handle
//! untouched.

use crate::*;
use alloc::boxed::Box;
use core::{ptr, slice};

/// Allocates a seeded accumulator, or returns null if memory is exhausted.
#[unsafe(no_mangle)]
pub extern "C" fn fletcher32_init() -> *mut Fletcher32 {
    match Fletcher32::try_boxed() {
        Ok(ctx) => Box::into_raw(ctx),
        Err(_) => ptr::null_mut(),
    }
}

/// Folds `len` bytes at `data` into `ctx`.
///
/// A null `data` is accepted when `len` is zero.
///
/// # Safety
///
/// `ctx` must be null or a live handle from [`fletcher32_init`], and `data` must
/// be null or valid for reads of `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fletcher32_update(
    ctx: *mut Fletcher32,
    data: *const u8,
    len: u32,
) -> i32 {
    status(unsafe { update(ctx, data, len) })
}

/// Stores the current checksum of `ctx` in `checksum`.
///
/// # Safety
///
/// `ctx` must be null or a live handle from [`fletcher32_init`], and `checksum`
/// must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fletcher32_final(ctx: *const Fletcher32, checksum: *mut u32) -> i32 {
    status(unsafe { finalize(ctx, checksum) })
}

/// Releases `ctx`. Null is ignored.
///
/// # Safety
///
/// `ctx` must be null or a live handle from [`fletcher32_init`]; it is dangling
/// afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fletcher32_free(ctx: *mut Fletcher32) {
    if ctx.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(ctx) });
}

unsafe fn update(ctx: *mut Fletcher32, data: *const u8, len: u32) -> Result<(), ChecksumError> {
    let ctx = unsafe { ctx.as_mut() }.ok_or(ChecksumError::InvalidInput)?;
    if len == 0 {
        return Ok(());
    }
    if data.is_null() {
        return Err(ChecksumError::InvalidInput);
    }
    ctx.update(unsafe { slice::from_raw_parts(data, len as usize) });
    Ok(())
}

unsafe fn finalize(ctx: *const Fletcher32, checksum: *mut u32) -> Result<(), ChecksumError> {
    let ctx = unsafe { ctx.as_ref() }.ok_or(ChecksumError::InvalidInput)?;
    if checksum.is_null() {
        return Err(ChecksumError::InvalidInput);
    }
    unsafe { checksum.write(ctx.finalize()) };
    Ok(())
}

#[inline]
fn status(result: Result<(), ChecksumError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_of(ctx: *const Fletcher32) -> u32 {
        let mut checksum = 0;
        assert_eq!(unsafe { fletcher32_final(ctx, &mut checksum) }, 0);
        checksum
    }

    #[test]
    fn lifecycle() {
        let ctx = fletcher32_init();
        assert!(!ctx.is_null());
        assert_eq!(final_of(ctx), 0xffff_ffff);

        let data = b"abcde";
        assert_eq!(
            unsafe { fletcher32_update(ctx, data.as_ptr(), data.len() as u32) },
            0
        );
        assert_eq!(final_of(ctx), 0x05c3_01ef);
        assert_eq!(final_of(ctx), 0x05c3_01ef);

        unsafe { fletcher32_free(ctx) };
    }

    #[test]
    fn matches_rust_api() {
        let data = (0..20000u32).map(|v| (v * 31 >> 3) as u8).collect::<Vec<_>>();
        let ctx = fletcher32_init();
        for chunk in data.chunks(777) {
            let status = unsafe { fletcher32_update(ctx, chunk.as_ptr(), chunk.len() as u32) };
            assert_eq!(status, 0);
        }
        assert_eq!(final_of(ctx), Fletcher32::checksum(&data));
        unsafe { fletcher32_free(ctx) };
    }

    #[test]
    fn null_handle() {
        let data = [1u8, 2, 3];
        let mut checksum = 0x1234;
        unsafe {
            assert_eq!(fletcher32_update(ptr::null_mut(), data.as_ptr(), 3), -1);
            assert_eq!(fletcher32_update(ptr::null_mut(), ptr::null(), 0), -1);
            assert_eq!(fletcher32_final(ptr::null(), &mut checksum), -1);
        }
        assert_eq!(checksum, 0x1234);
    }

    #[test]
    fn null_data() {
        let ctx = fletcher32_init();
        let before = final_of(ctx);
        unsafe {
            assert_eq!(fletcher32_update(ctx, ptr::null(), 16), -1);
            assert_eq!(fletcher32_update(ctx, ptr::null(), 0), 0);
            assert_eq!(fletcher32_final(ctx, ptr::null_mut()), -1);
        }
        assert_eq!(final_of(ctx), before);
        unsafe { fletcher32_free(ctx) };
    }

    #[test]
    fn free_null() {
        unsafe { fletcher32_free(ptr::null_mut()) };
    }
}
