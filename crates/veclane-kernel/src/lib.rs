//! # Veclane Kernel
//!
//! Lane-wise wrapping multiply of two `i8` sequences into a third.
//!
//! `n` elements are processed in full chunks of `W` lanes while
//! `i + W <= n`, then a partial chunk covers the remaining `n - i` elements.
//! The tail never reads or writes past index `n - 1`.
//!
//! ```text
//! a: [ W lanes ][ W lanes ][ tail ]
//! b: [ W lanes ][ W lanes ][ tail ]
//!        ×          ×         ×
//! r: [ W lanes ][ W lanes ][ tail ]   r[i] = a[i].wrapping_mul(b[i])
//! ```
//!
//! Results are truncated to 8 bits (two's-complement wraparound), never
//! saturated: `100 * 3 = 300` stores `44`.

pub mod backend;
pub mod error;
pub mod lanes;
pub mod portable;
pub mod scalar;
pub mod simd;

pub use backend::Backend;
pub use error::KernelError;
pub use lanes::Vec16c;

/// Multiply `a[..n]` by `b[..n]` lane-wise into `out[..n]`.
///
/// Uses the widest backend the CPU supports. `n == 0` writes nothing.
///
/// # Panics
/// If any buffer holds fewer than `n` elements.
pub fn multiply_i8(a: &[i8], b: &[i8], out: &mut [i8], n: usize) {
    assert!(a.len() >= n, "input a holds {} elements, need {n}", a.len());
    assert!(b.len() >= n, "input b holds {} elements, need {n}", b.len());
    assert!(out.len() >= n, "output holds {} elements, need {n}", out.len());

    Backend::detect().run(&a[..n], &b[..n], &mut out[..n]);
}

/// Checked variant of [`multiply_i8`] that reports short buffers instead
/// of panicking.
pub fn try_multiply_i8(a: &[i8], b: &[i8], out: &mut [i8], n: usize) -> Result<(), KernelError> {
    multiply_i8_with(Backend::detect(), a, b, out, n)
}

/// Run a specific backend.
pub fn multiply_i8_with(
    backend: Backend,
    a: &[i8],
    b: &[i8],
    out: &mut [i8],
    n: usize,
) -> Result<(), KernelError> {
    check_len("a", a.len(), n)?;
    check_len("b", b.len(), n)?;
    check_len("out", out.len(), n)?;
    if !backend.is_available() {
        return Err(KernelError::BackendUnavailable(backend));
    }

    backend.run(&a[..n], &b[..n], &mut out[..n]);
    Ok(())
}

/// Unchecked pointer entry point.
///
/// In-place use is supported: `out` may be exactly `a` or exactly `b`.
/// Each chunk is loaded in full before its product is stored, and no
/// slices are formed over the caller's buffers.
///
/// # Safety
/// When `n > 0`: `a` and `b` must be non-null and readable for `n`
/// elements, and `out` must be non-null and writable for `n` elements.
/// `out` must either equal `a` or `b`, or overlap neither; any other
/// overlap is undefined behavior. With `n == 0` no pointer is dereferenced.
pub unsafe fn multiply_i8_raw(a: *const i8, b: *const i8, out: *mut i8, n: usize) {
    if n == 0 {
        return;
    }
    // SAFETY: upheld by the caller per the contract above.
    unsafe { Backend::detect().run_raw(a, b, out, n) }
}

fn check_len(buffer: &'static str, len: usize, required: usize) -> Result<(), KernelError> {
    if len < required {
        return Err(KernelError::LengthMismatch {
            buffer,
            len,
            required,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_identity_with_tail() {
        let a: Vec<i8> = (1..=17).collect();
        let b = vec![1i8; 17];
        let mut out = vec![0i8; 17];
        multiply_i8(&a, &b, &mut out, 17);
        assert_eq!(out, a);
    }

    #[test]
    fn test_multiply_wraps() {
        let mut out = [0i8; 1];
        multiply_i8(&[100], &[3], &mut out, 1);
        assert_eq!(out, [44]);
    }

    #[test]
    fn test_multiply_prefix_only() {
        let a = [2i8; 8];
        let b = [3i8; 8];
        let mut out = [-1i8; 8];
        multiply_i8(&a, &b, &mut out, 5);
        assert_eq!(out, [6, 6, 6, 6, 6, -1, -1, -1]);
    }

    #[test]
    #[should_panic(expected = "input b holds")]
    fn test_multiply_short_input_panics() {
        let mut out = [0i8; 4];
        multiply_i8(&[1; 4], &[1; 3], &mut out, 4);
    }

    #[test]
    fn test_try_multiply_reports_short_output() {
        let mut out = [0i8; 2];
        let err = try_multiply_i8(&[1; 4], &[1; 4], &mut out, 4).unwrap_err();
        assert_eq!(
            err,
            KernelError::LengthMismatch {
                buffer: "out",
                len: 2,
                required: 4,
            }
        );
    }

    #[test]
    fn test_unavailable_backend_rejected() {
        let missing = Backend::ALL.into_iter().find(|b| !b.is_available());
        if let Some(backend) = missing {
            let mut out = [0i8; 1];
            let err = multiply_i8_with(backend, &[1], &[1], &mut out, 1).unwrap_err();
            assert_eq!(err, KernelError::BackendUnavailable(backend));
        }
    }

    #[test]
    fn test_raw_zero_length_accepts_null() {
        unsafe {
            multiply_i8_raw(std::ptr::null(), std::ptr::null(), std::ptr::null_mut(), 0);
        }
    }

    #[test]
    fn test_raw_matches_checked() {
        let a: Vec<i8> = (-40..40).collect();
        let b: Vec<i8> = (0..80).map(|i| (i * 3) as i8).collect();
        let mut raw = vec![0i8; 80];
        let mut checked = vec![0i8; 80];
        unsafe {
            multiply_i8_raw(a.as_ptr(), b.as_ptr(), raw.as_mut_ptr(), 80);
        }
        multiply_i8(&a, &b, &mut checked, 80);
        assert_eq!(raw, checked);
    }

    #[test]
    fn test_raw_in_place_on_a() {
        let mut a: Vec<i8> = (0..50).map(|i| i as i8 - 25).collect();
        let b: Vec<i8> = (0..50).map(|i| (i % 9) as i8 + 14).collect();
        let mut want = vec![0i8; 50];
        multiply_i8_with(Backend::Scalar, &a, &b, &mut want, 50).unwrap();

        let p = a.as_mut_ptr();
        unsafe { multiply_i8_raw(p, b.as_ptr(), p, 50) };
        assert_eq!(a, want);
    }

    #[test]
    fn test_raw_squares_in_place() {
        let mut a: Vec<i8> = (-20..20).collect();
        let want: Vec<i8> = a.iter().map(|x| x.wrapping_mul(*x)).collect();
        let p = a.as_mut_ptr();
        unsafe { multiply_i8_raw(p, p, p, 40) };
        assert_eq!(a, want);
    }

    #[test]
    fn test_every_backend_in_place() {
        for backend in Backend::available() {
            for n in [0, 1, 15, 16, 17, 31, 32, 33, 64, 70] {
                let b: Vec<i8> = (0..n).map(|i| (i as i8).wrapping_mul(37)).collect();
                let mut a: Vec<i8> = (0..n).map(|i| 90 - i as i8).collect();
                let mut want = vec![0i8; n];
                multiply_i8_with(Backend::Scalar, &a, &b, &mut want, n).unwrap();

                let p = a.as_mut_ptr();
                unsafe { backend.run_raw(p, b.as_ptr(), p, n) };
                assert_eq!(a, want, "{backend}, n = {n}");
            }
        }
    }

    #[test]
    fn test_kernel_error_into_core_error() {
        let err: veclane_core::VeclaneError = KernelError::UnknownBackend("mmx".into()).into();
        assert!(err.to_string().contains("mmx"));
    }
}
