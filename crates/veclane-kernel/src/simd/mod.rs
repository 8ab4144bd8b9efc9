//! SIMD acceleration module.
//!
//! Platform-specific intrinsics for the lane-wise i8 multiply.
//! Each backend falls back to the scalar loop when compiled for a target
//! that lacks its instruction set.
//!
//! Supported architectures:
//! - ARM64 (aarch64): NEON — 128-bit vectors, 16 lanes
//! - x86_64 + SSE2: 128-bit vectors, 16 lanes (all x86_64 CPUs)
//! - x86_64 + AVX2: 256-bit vectors, 32 lanes (Intel Haswell+, AMD Zen+)
//!
//! Every backend has a pointer entry (`*_raw`) that works in place when
//! `out` is exactly `a` or `b`: each chunk is fully loaded before it is
//! stored, and no slices are formed over the caller's memory.

pub mod avx2;
pub mod neon;
pub mod sse2;

/// End of the full-chunk region: the bulk loop runs while `i + w <= n`,
/// so every complete chunk, including one ending exactly at `n`, is handled
/// there and only `n % w` elements reach the tail.
#[inline]
pub(crate) fn bulk_end(n: usize, w: usize) -> usize {
    n - n % w
}

/// Partial load: copy `len` (at most `W`) elements into zero-filled lanes.
///
/// # Safety
/// `src` must be readable for `min(len, W)` elements.
#[inline]
pub(crate) unsafe fn load_partial<const W: usize>(src: *const i8, len: usize) -> [i8; W] {
    let mut lanes = [0i8; W];
    unsafe { std::ptr::copy_nonoverlapping(src, lanes.as_mut_ptr(), len.min(W)) };
    lanes
}

/// Partial store: write only the first `len` (at most `W`) lanes.
///
/// # Safety
/// `dst` must be writable for `min(len, W)` elements.
#[inline]
pub(crate) unsafe fn store_partial<const W: usize>(lanes: &[i8; W], dst: *mut i8, len: usize) {
    unsafe { std::ptr::copy_nonoverlapping(lanes.as_ptr(), dst, len.min(W)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_end_keeps_exact_multiples_in_bulk() {
        for w in [16, 32] {
            assert_eq!(bulk_end(0, w), 0);
            assert_eq!(bulk_end(w - 1, w), 0);
            assert_eq!(bulk_end(w, w), w);
            assert_eq!(bulk_end(w + 1, w), w);
            assert_eq!(bulk_end(2 * w, w), 2 * w);
            assert_eq!(bulk_end(2 * w + 5, w), 2 * w);
        }
    }

    #[test]
    fn test_partial_helpers() {
        let src = [1i8, 2, 3];
        let lanes = unsafe { load_partial::<16>(src.as_ptr(), src.len()) };
        assert_eq!(&lanes[..4], &[1, 2, 3, 0]);

        let mut dst = [9i8; 4];
        unsafe { store_partial(&lanes, dst.as_mut_ptr(), 2) };
        assert_eq!(dst, [1, 2, 9, 9]);
    }
}
