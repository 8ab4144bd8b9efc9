//! Kernel errors for the checked entry points.

use crate::backend::Backend;
use veclane_core::VeclaneError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    /// A caller buffer is shorter than the requested element count.
    #[error("buffer `{buffer}` holds {len} elements, {required} required")]
    LengthMismatch {
        buffer: &'static str,
        len: usize,
        required: usize,
    },

    #[error("backend `{0}` is not supported on this CPU")]
    BackendUnavailable(Backend),

    #[error("unknown backend `{0}` (expected scalar, portable, sse2, avx2 or neon)")]
    UnknownBackend(String),
}

impl From<KernelError> for VeclaneError {
    fn from(e: KernelError) -> Self {
        VeclaneError::Kernel(e.to_string())
    }
}
