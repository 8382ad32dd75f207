//! Batched Fletcher-32 summation
//!
//! Bytes are summed into `u32` accumulators and reduced modulo `0xFFFF` at most
//! once every [`NMAX`] bytes. Starting from sums no greater than `0xFFFF`, `sum2`
//! after `n` bytes is bounded by `0xFFFF * (n + 1) + 255 * n * (n + 1) / 2`,
//! which stays within `u32` up to `n = NMAX`.

use super::{MODULUS, NMAX};

/// Bytes summed per inner step of the long path.
const UNROLL: usize = 16;

const fn sum2_bound(n: u64) -> u64 {
    MODULUS as u64 * (n + 1) + 255 * n * (n + 1) / 2
}

const _: () = {
    assert!(sum2_bound(NMAX as u64) <= u32::MAX as u64);
    assert!(sum2_bound(NMAX as u64 + 1) > u32::MAX as u64);
    assert!(NMAX % UNROLL == 0);
};

/// Folds `data` into the running sums and returns the reduced sums.
#[inline]
pub fn update(sum1: u16, sum2: u16, data: &[u8]) -> (u16, u16) {
    match data {
        [] => (sum1, sum2),
        [byte] => update_byte(sum1, sum2, *byte),
        _ if data.len() < UNROLL => update_short(sum1, sum2, data),
        _ => update_long(sum1, sum2, data),
    }
}

#[inline]
fn update_byte(sum1: u16, sum2: u16, byte: u8) -> (u16, u16) {
    // a single addition never exceeds the modulus twice
    let mut sum1 = sum1 as u32 + byte as u32;
    if sum1 >= MODULUS {
        sum1 -= MODULUS;
    }
    let mut sum2 = sum2 as u32 + sum1;
    if sum2 >= MODULUS {
        sum2 -= MODULUS;
    }
    (sum1 as u16, sum2 as u16)
}

#[inline]
fn update_short(sum1: u16, sum2: u16, data: &[u8]) -> (u16, u16) {
    let mut sum1 = sum1 as u32;
    let mut sum2 = sum2 as u32;
    for &byte in data {
        sum1 += byte as u32;
        sum2 += sum1;
    }
    reduce(sum1, sum2)
}

fn update_long(sum1: u16, sum2: u16, data: &[u8]) -> (u16, u16) {
    let mut sums = (sum1, sum2);

    let blocks = data.chunks_exact(NMAX);
    let remainder = blocks.remainder();
    for block in blocks {
        let (sum1, sum2) = accumulate(sums.0 as u32, sums.1 as u32, block);
        sums = reduce(sum1, sum2);
    }

    if !remainder.is_empty() {
        let (sum1, sum2) = accumulate(sums.0 as u32, sums.1 as u32, remainder);
        sums = reduce(sum1, sum2);
    }

    sums
}

/// Sums at most [`NMAX`] bytes without reduction.
#[inline(always)]
fn accumulate(mut sum1: u32, mut sum2: u32, block: &[u8]) -> (u32, u32) {
    debug_assert!(block.len() <= NMAX);

    let chunks = block.chunks_exact(UNROLL);
    let tail = chunks.remainder();
    for chunk in chunks {
        for &byte in chunk {
            sum1 += byte as u32;
            sum2 += sum1;
        }
    }
    for &byte in tail {
        sum1 += byte as u32;
        sum2 += sum1;
    }

    (sum1, sum2)
}

#[inline]
fn reduce(sum1: u32, sum2: u32) -> (u16, u16) {
    ((sum1 % MODULUS) as u16, (sum2 % MODULUS) as u16)
}
