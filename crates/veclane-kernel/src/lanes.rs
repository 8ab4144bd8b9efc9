//! Portable 128-bit lane register holding 16 signed bytes.
//!
//! `Vec16c` behaves like an SSE/NEON byte register: full and partial
//! loads and stores, lane-wise wrapping multiply, and the bitwise algebra
//! of a 128-bit value. It carries no target-specific code, so the
//! `Portable` backend built on it runs everywhere.

use std::ops;

/// 16 x i8 register value, aligned to 16 bytes like the hardware register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct Vec16c {
    lanes: [i8; 16],
}

impl Vec16c {
    pub const LANES: usize = 16;
    pub const ALIGN: usize = 16;

    /// All lanes zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcast `value` to every lane.
    pub fn splat(value: i8) -> Self {
        Self {
            lanes: [value; Self::LANES],
        }
    }

    pub fn from_array(lanes: [i8; 16]) -> Self {
        Self { lanes }
    }

    pub fn to_array(self) -> [i8; 16] {
        self.lanes
    }

    /// Load 16 elements. Panics if `src` is shorter than 16.
    #[inline]
    pub fn load(&mut self, src: &[i8]) {
        self.lanes.copy_from_slice(&src[..Self::LANES]);
    }

    /// Load the first `n` elements of `src` and zero the remaining lanes.
    ///
    /// Never reads past `src.len()`; `n` is clamped to 16.
    #[inline]
    pub fn load_partial(&mut self, n: usize, src: &[i8]) {
        let n = n.min(Self::LANES).min(src.len());
        self.lanes = [0; Self::LANES];
        self.lanes[..n].copy_from_slice(&src[..n]);
    }

    /// Store 16 lanes. Panics if `dst` is shorter than 16.
    #[inline]
    pub fn store(&self, dst: &mut [i8]) {
        dst[..Self::LANES].copy_from_slice(&self.lanes);
    }

    /// Load 16 elements from a 16-byte aligned address.
    ///
    /// Panics if `src` is misaligned or shorter than 16.
    #[inline]
    pub fn load_aligned(&mut self, src: &[i8]) {
        assert_aligned(src.as_ptr());
        self.load(src);
    }

    /// Store 16 lanes to a 16-byte aligned address.
    ///
    /// Panics if `dst` is misaligned or shorter than 16.
    #[inline]
    pub fn store_aligned(&self, dst: &mut [i8]) {
        assert_aligned(dst.as_ptr());
        self.store(dst);
    }

    /// Store the first `n` lanes, leaving the rest of `dst` untouched.
    #[inline]
    pub fn store_partial(&self, n: usize, dst: &mut [i8]) {
        let n = n.min(Self::LANES).min(dst.len());
        dst[..n].copy_from_slice(&self.lanes[..n]);
    }

    /// Zero every lane at index `n` and above.
    #[inline]
    pub fn cutoff(&mut self, n: usize) {
        if n < Self::LANES {
            self.lanes[n..].fill(0);
        }
    }

    #[inline]
    pub fn extract(&self, index: usize) -> i8 {
        self.lanes[index]
    }

    #[inline]
    fn zip_with(self, other: Self, f: impl Fn(i8, i8) -> i8) -> Self {
        let mut lanes = [0i8; 16];
        for (i, lane) in lanes.iter_mut().enumerate() {
            *lane = f(self.lanes[i], other.lanes[i]);
        }
        Self { lanes }
    }
}

#[inline]
fn assert_aligned(ptr: *const i8) {
    assert!(
        (ptr as usize) % Vec16c::ALIGN == 0,
        "address {ptr:p} is not {}-byte aligned",
        Vec16c::ALIGN
    );
}

impl From<[i8; 16]> for Vec16c {
    fn from(lanes: [i8; 16]) -> Self {
        Self::from_array(lanes)
    }
}

impl ops::Mul for Vec16c {
    type Output = Self;

    /// Lane-wise multiply truncated to 8 bits.
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.zip_with(other, i8::wrapping_mul)
    }
}

impl ops::MulAssign for Vec16c {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl ops::BitAnd for Vec16c {
    type Output = Self;

    #[inline]
    fn bitand(self, other: Self) -> Self {
        self.zip_with(other, |x, y| x & y)
    }
}

impl ops::BitOr for Vec16c {
    type Output = Self;

    #[inline]
    fn bitor(self, other: Self) -> Self {
        self.zip_with(other, |x, y| x | y)
    }
}

impl ops::BitXor for Vec16c {
    type Output = Self;

    #[inline]
    fn bitxor(self, other: Self) -> Self {
        self.zip_with(other, |x, y| x ^ y)
    }
}

impl ops::Not for Vec16c {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self {
            lanes: self.lanes.map(|x| !x),
        }
    }
}

impl ops::BitAndAssign for Vec16c {
    #[inline]
    fn bitand_assign(&mut self, other: Self) {
        *self = *self & other;
    }
}

impl ops::BitOrAssign for Vec16c {
    #[inline]
    fn bitor_assign(&mut self, other: Self) {
        *self = *self | other;
    }
}

impl ops::BitXorAssign for Vec16c {
    #[inline]
    fn bitxor_assign(&mut self, other: Self) {
        *self = *self ^ other;
    }
}

/// `a & !b`
#[inline]
pub fn andnot(a: Vec16c, b: Vec16c) -> Vec16c {
    a & !b
}

/// Byte-wise select: `result[i] = if mask[i] { a[i] } else { b[i] }`.
///
/// Each mask byte must be 0x00 (false) or 0xFF (true).
#[inline]
pub fn select(mask: Vec16c, a: Vec16c, b: Vec16c) -> Vec16c {
    (mask & a) | andnot(b, mask)
}

/// True iff every bit of the register is 1.
#[inline]
pub fn horizontal_and(a: Vec16c) -> bool {
    a.lanes.iter().all(|&x| x == -1)
}

/// True iff at least one bit of the register is 1.
#[inline]
pub fn horizontal_or(a: Vec16c) -> bool {
    a.lanes.iter().any(|&x| x != 0)
}
