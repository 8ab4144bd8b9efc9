//! Scalar reference implementation.
//!
//! Every SIMD backend must match this bit for bit.

/// Element-wise wrapping multiply, one lane at a time.
pub fn mul_i8_scalar(a: &[i8], b: &[i8], out: &mut [i8]) {
    assert_eq!(a.len(), out.len());
    assert_eq!(b.len(), out.len());

    for ((r, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *r = x.wrapping_mul(y);
    }
}

/// Pointer form of [`mul_i8_scalar`].
///
/// # Safety
/// `a`, `b` readable and `out` writable for `n` elements; `out` is either
/// exactly `a` or `b`, or overlaps neither.
pub unsafe fn mul_i8_scalar_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    for i in 0..n {
        unsafe { *out.add(i) = (*a.add(i)).wrapping_mul(*b.add(i)) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_wraps() {
        let a = [100, -128, 127, -1, 16];
        let b = [3, -1, 2, -1, 16];
        let mut out = [0i8; 5];
        mul_i8_scalar(&a, &b, &mut out);
        // 300 -> 44, 128 -> -128, 254 -> -2, 1, 256 -> 0
        assert_eq!(out, [44, -128, -2, 1, 0]);
    }

    #[test]
    fn test_scalar_empty() {
        let mut out: [i8; 0] = [];
        mul_i8_scalar(&[], &[], &mut out);
    }

    #[test]
    fn test_scalar_raw_in_place() {
        let mut a = [100i8, 2, -4];
        let b = [3i8, 2, 32];
        let p = a.as_mut_ptr();
        unsafe { mul_i8_scalar_raw(p, b.as_ptr(), p, 3) };
        assert_eq!(a, [44, 4, -128]);
    }
}
