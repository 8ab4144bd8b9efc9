//! ARM NEON byte multiply for aarch64.
//!
//! `vmulq_s8` multiplies 16 signed bytes and keeps the low 8 bits,
//! which is exactly the wrapping product.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

pub const LANES: usize = 16;

/// # Safety
///
/// `a`, `b` must be readable and `out` writable for `LANES` bytes.
#[cfg(target_arch = "aarch64")]
#[inline]
unsafe fn mul_chunk(a: *const i8, b: *const i8, out: *mut i8) {
    unsafe {
        let va = vld1q_s8(a);
        let vb = vld1q_s8(b);
        vst1q_s8(out, vmulq_s8(va, vb));
    }
}

/// NEON-accelerated wrapping multiply (16 bytes per iteration).
pub fn mul_i8_neon(a: &[i8], b: &[i8], out: &mut [i8]) {
    assert_eq!(a.len(), out.len());
    assert_eq!(b.len(), out.len());
    // SAFETY: all three slices hold out.len() elements and cannot overlap.
    unsafe { mul_i8_neon_raw(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), out.len()) }
}

/// # Safety
///
/// `a`, `b` readable and `out` writable for `n` elements; `out` is either
/// exactly `a` or `b`, or overlaps neither.
#[cfg(target_arch = "aarch64")]
pub unsafe fn mul_i8_neon_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    let end = super::bulk_end(n, LANES);
    let mut i = 0;

    while i < end {
        unsafe { mul_chunk(a.add(i), b.add(i), out.add(i)) };
        i += LANES;
    }

    // Handle remaining elements
    if i < n {
        let tail = n - i;
        unsafe {
            let va = super::load_partial::<LANES>(a.add(i), tail);
            let vb = super::load_partial::<LANES>(b.add(i), tail);
            let mut vr = [0i8; LANES];
            mul_chunk(va.as_ptr(), vb.as_ptr(), vr.as_mut_ptr());
            super::store_partial(&vr, out.add(i), tail);
        }
    }
}

/// Scalar fallback for non-aarch64.
///
/// # Safety
///
/// Same contract as the aarch64 version.
#[cfg(not(target_arch = "aarch64"))]
pub unsafe fn mul_i8_neon_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    unsafe { crate::scalar::mul_i8_scalar_raw(a, b, out, n) }
}
