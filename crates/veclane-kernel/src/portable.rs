//! Target-independent backend driven through [`Vec16c`].
//!
//! Same chunking as the SIMD backends, 16 lanes per step, so it doubles as
//! a reference for the tail handling on targets without SSE2 or NEON.

use crate::lanes::Vec16c;
use crate::simd::{bulk_end, load_partial, store_partial};

/// Lane-wise wrapping multiply in 16-lane chunks with a partial tail.
pub fn mul_i8_portable(a: &[i8], b: &[i8], out: &mut [i8]) {
    assert_eq!(a.len(), out.len());
    assert_eq!(b.len(), out.len());

    let n = out.len();
    let end = bulk_end(n, Vec16c::LANES);
    let mut va = Vec16c::new();
    let mut vb = Vec16c::new();
    let mut i = 0;

    while i < end {
        va.load(&a[i..]);
        vb.load(&b[i..]);
        (va * vb).store(&mut out[i..]);
        i += Vec16c::LANES;
    }

    if i < n {
        let tail = n - i;
        va.load_partial(tail, &a[i..]);
        vb.load_partial(tail, &b[i..]);
        (va * vb).store_partial(tail, &mut out[i..]);
    }
}

/// Pointer form of [`mul_i8_portable`].
///
/// # Safety
/// `a`, `b` readable and `out` writable for `n` elements; `out` is either
/// exactly `a` or `b`, or overlaps neither.
pub unsafe fn mul_i8_portable_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    let end = bulk_end(n, Vec16c::LANES);
    let mut i = 0;

    while i < end {
        let prod = unsafe {
            let va = Vec16c::from_array(load_partial(a.add(i), Vec16c::LANES));
            let vb = Vec16c::from_array(load_partial(b.add(i), Vec16c::LANES));
            va * vb
        };
        unsafe { store_partial(&prod.to_array(), out.add(i), Vec16c::LANES) };
        i += Vec16c::LANES;
    }

    if i < n {
        let tail = n - i;
        let prod = unsafe {
            let va = Vec16c::from_array(load_partial(a.add(i), tail));
            let vb = Vec16c::from_array(load_partial(b.add(i), tail));
            va * vb
        };
        unsafe { store_partial(&prod.to_array(), out.add(i), tail) };
    }
}
