//! Backend selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::KernelError;
use crate::{portable, scalar, simd};
use veclane_core::VeclaneConfig;

static DETECTED: OnceLock<Backend> = OnceLock::new();

/// One instruction-set implementation of the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// One element per step. The reference every other backend must match.
    Scalar,
    /// 16-lane chunks through [`crate::Vec16c`], no intrinsics.
    Portable,
    Sse2,
    Avx2,
    Neon,
}

impl Backend {
    pub const ALL: [Backend; 5] = [
        Backend::Scalar,
        Backend::Portable,
        Backend::Sse2,
        Backend::Avx2,
        Backend::Neon,
    ];

    /// Number of i8 lanes processed per vector step.
    pub fn lanes(self) -> usize {
        match self {
            Backend::Scalar => 1,
            Backend::Portable => crate::Vec16c::LANES,
            Backend::Sse2 => simd::sse2::LANES,
            Backend::Avx2 => simd::avx2::LANES,
            Backend::Neon => simd::neon::LANES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Portable => "portable",
            Backend::Sse2 => "sse2",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
        }
    }

    /// Whether this backend can run on the current CPU.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Scalar | Backend::Portable => true,
            Backend::Sse2 => cfg!(target_arch = "x86_64"),
            Backend::Avx2 => avx2_detected(),
            Backend::Neon => cfg!(target_arch = "aarch64"),
        }
    }

    /// Backends usable on this CPU, narrowest first.
    pub fn available() -> Vec<Backend> {
        Self::ALL.into_iter().filter(|b| b.is_available()).collect()
    }

    /// Widest backend the CPU supports. Resolved once per process.
    pub fn detect() -> Backend {
        *DETECTED.get_or_init(|| {
            let backend = if avx2_detected() {
                Backend::Avx2
            } else if cfg!(target_arch = "x86_64") {
                Backend::Sse2
            } else if cfg!(target_arch = "aarch64") {
                Backend::Neon
            } else {
                Backend::Portable
            };
            tracing::debug!("Selected kernel backend: {} ({} lanes)", backend, backend.lanes());
            backend
        })
    }

    /// Resolve a backend name, where "auto" means [`Self::detect`].
    pub fn resolve(name: &str) -> veclane_core::Result<Backend> {
        if name.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::detect());
        }
        Ok(name.parse::<Backend>()?)
    }

    /// Backend named by the config file.
    pub fn from_config(config: &VeclaneConfig) -> veclane_core::Result<Backend> {
        Self::resolve(&config.backend)
    }

    /// Run this backend over equal-length slices.
    ///
    /// Backends compiled for another architecture degrade to the scalar loop,
    /// so this is always memory safe; callers check [`Self::is_available`]
    /// when they need the real instruction set.
    pub(crate) fn run(self, a: &[i8], b: &[i8], out: &mut [i8]) {
        match self {
            Backend::Scalar => scalar::mul_i8_scalar(a, b, out),
            Backend::Portable => portable::mul_i8_portable(a, b, out),
            Backend::Sse2 => simd::sse2::mul_i8_sse2(a, b, out),
            Backend::Avx2 => simd::avx2::mul_i8_avx2(a, b, out),
            Backend::Neon => simd::neon::mul_i8_neon(a, b, out),
        }
    }

    /// Pointer form of [`Self::run`].
    ///
    /// # Safety
    /// `a`, `b` readable and `out` writable for `n` elements; `out` is
    /// either exactly `a` or `b`, or overlaps neither.
    pub(crate) unsafe fn run_raw(self, a: *const i8, b: *const i8, out: *mut i8, n: usize) {
        unsafe {
            match self {
                Backend::Scalar => scalar::mul_i8_scalar_raw(a, b, out, n),
                Backend::Portable => portable::mul_i8_portable_raw(a, b, out, n),
                Backend::Sse2 => simd::sse2::mul_i8_sse2_raw(a, b, out, n),
                Backend::Avx2 => simd::avx2::mul_i8_avx2_raw(a, b, out, n),
                Backend::Neon => simd::neon::mul_i8_neon_raw(a, b, out, n),
            }
        }
    }
}

#[cfg(target_arch = "x86_64")]
fn avx2_detected() -> bool {
    is_x86_feature_detected!("avx2")
}

#[cfg(not(target_arch = "x86_64"))]
fn avx2_detected() -> bool {
    false
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| KernelError::UnknownBackend(s.to_string()))
    }
}
