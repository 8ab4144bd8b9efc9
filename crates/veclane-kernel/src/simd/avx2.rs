//! x86 AVX2 byte multiply.
//!
//! Available on Intel Haswell+ (2013), AMD Zen+ (2018).
//! Processes 32 bytes per iteration (256-bit vectors).

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

pub const LANES: usize = 32;

/// Same even/odd `mullo` split as the SSE2 path, on 256-bit registers.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn mul_chunk(a: *const i8, b: *const i8, out: *mut i8) {
    unsafe {
        let va = _mm256_loadu_si256(a as *const __m256i);
        let vb = _mm256_loadu_si256(b as *const __m256i);
        let even = _mm256_mullo_epi16(va, vb);
        let odd = _mm256_mullo_epi16(_mm256_srli_epi16(va, 8), _mm256_srli_epi16(vb, 8));
        let prod = _mm256_or_si256(
            _mm256_slli_epi16(odd, 8),
            _mm256_and_si256(even, _mm256_set1_epi16(0x00FF)),
        );
        _mm256_storeu_si256(out as *mut __m256i, prod);
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn mul_i8_avx2_impl(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
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

/// AVX2-accelerated wrapping multiply (32 bytes per iteration).
///
/// Falls back to SSE2 when the running CPU lacks AVX2.
pub fn mul_i8_avx2(a: &[i8], b: &[i8], out: &mut [i8]) {
    assert_eq!(a.len(), out.len());
    assert_eq!(b.len(), out.len());
    // SAFETY: all three slices hold out.len() elements and cannot overlap.
    unsafe { mul_i8_avx2_raw(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), out.len()) }
}

/// # Safety
///
/// `a`, `b` readable and `out` writable for `n` elements; `out` is either
/// exactly `a` or `b`, or overlaps neither.
#[cfg(target_arch = "x86_64")]
pub unsafe fn mul_i8_avx2_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    if is_x86_feature_detected!("avx2") {
        unsafe { mul_i8_avx2_impl(a, b, out, n) }
    } else {
        unsafe { super::sse2::mul_i8_sse2_raw(a, b, out, n) }
    }
}

/// Scalar fallback.
///
/// # Safety
///
/// Same contract as the x86_64 version.
#[cfg(not(target_arch = "x86_64"))]
pub unsafe fn mul_i8_avx2_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    unsafe { crate::scalar::mul_i8_scalar_raw(a, b, out, n) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avx2_two_chunks() {
        let a: Vec<i8> = (0..64).map(|i| (i as i8).wrapping_sub(32)).collect();
        let b: Vec<i8> = (0..64).map(|i| (i % 7) as i8 - 3).collect();
        let mut out = vec![0i8; 64];
        mul_i8_avx2(&a, &b, &mut out);
        for i in 0..64 {
            assert_eq!(out[i], a[i].wrapping_mul(b[i]), "lane {i}");
        }
    }

    #[test]
    fn test_avx2_odd_length() {
        let a = vec![100i8; 33];
        let b = vec![3i8; 33];
        let mut out = vec![0i8; 33];
        mul_i8_avx2(&a, &b, &mut out);
        assert!(out.iter().all(|&x| x == 44));
    }

    #[test]
    fn test_avx2_in_place_on_b() {
        let a = vec![-3i8; 70];
        let mut b: Vec<i8> = (0..70).map(|i| i as i8).collect();
        let want: Vec<i8> = b.iter().map(|x| x.wrapping_mul(-3)).collect();
        let p = b.as_mut_ptr();
        unsafe { mul_i8_avx2_raw(a.as_ptr(), p, p, 70) };
        assert_eq!(b, want);
    }
}
