//! x86 SSE2 byte multiply.
//!
//! Available on all x86_64 CPUs (SSE2 is baseline for x86_64).
//! Processes 16 bytes per iteration (128-bit vectors).

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

pub const LANES: usize = 16;

/// Wrapping i8 multiply of 16 lanes.
///
/// SSE2 has no byte multiply. The low byte of a 16-bit product depends only
/// on the low bytes of its operands, so even bytes come from one `mullo`
/// and odd bytes from a second `mullo` on the operands shifted down by 8.
#[cfg(target_arch = "x86_64")]
#[inline]
fn mul_epi8(va: __m128i, vb: __m128i) -> __m128i {
    unsafe {
        let even = _mm_mullo_epi16(va, vb);
        let odd = _mm_mullo_epi16(_mm_srli_epi16(va, 8), _mm_srli_epi16(vb, 8));
        _mm_or_si128(
            _mm_slli_epi16(odd, 8),
            _mm_and_si128(even, _mm_set1_epi16(0x00FF)),
        )
    }
}

/// # Safety
///
/// `a`, `b` must be readable and `out` writable for `LANES` bytes.
#[cfg(target_arch = "x86_64")]
#[inline]
unsafe fn mul_chunk(a: *const i8, b: *const i8, out: *mut i8) {
    unsafe {
        let va = _mm_loadu_si128(a as *const __m128i);
        let vb = _mm_loadu_si128(b as *const __m128i);
        _mm_storeu_si128(out as *mut __m128i, mul_epi8(va, vb));
    }
}

/// SSE2-accelerated wrapping multiply (16 bytes per iteration).
pub fn mul_i8_sse2(a: &[i8], b: &[i8], out: &mut [i8]) {
    assert_eq!(a.len(), out.len());
    assert_eq!(b.len(), out.len());
    // SAFETY: all three slices hold out.len() elements and cannot overlap.
    unsafe { mul_i8_sse2_raw(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), out.len()) }
}

/// # Safety
///
/// `a`, `b` readable and `out` writable for `n` elements; `out` is either
/// exactly `a` or `b`, or overlaps neither.
#[cfg(target_arch = "x86_64")]
pub unsafe fn mul_i8_sse2_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    let end = super::bulk_end(n, LANES);
    let mut i = 0;

    while i < end {
        unsafe { mul_chunk(a.add(i), b.add(i), out.add(i)) };
        i += LANES;
    }

    // Tail
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

/// Scalar fallback.
///
/// # Safety
///
/// Same contract as the x86_64 version.
#[cfg(not(target_arch = "x86_64"))]
pub unsafe fn mul_i8_sse2_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    unsafe { crate::scalar::mul_i8_scalar_raw(a, b, out, n) }
}
