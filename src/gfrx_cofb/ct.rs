//! Constant-time comparison and best-effort zeroization. These are the only
//! side-channel protections this crate provides (spec §9): no protection
//! against data-dependent memory access timing or physical attacks.

use std::hint::black_box;
use std::sync::atomic::{Ordering, compiler_fence};

/// Compares `a` and `b` in time independent of the position of the first
/// differing byte. Returns `true` iff the two slices are equal length and
/// byte-for-byte equal. Never short-circuits on byte values.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut acc: u8 = 0;
    for i in 0..a.len() {
        acc |= black_box(a[i]) ^ black_box(b[i]);
    }
    black_box(acc) == 0
}

/// Overwrites `buf` with zeros in a way the compiler may not elide, followed
/// by a compiler fence so the write is not reordered away from the caller's
/// use of `buf`.
pub fn zeroize(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        unsafe { std::ptr::write_volatile(b, 0) };
    }
    compiler_fence(Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_slices() {
        assert!(ct_eq(b"abcdef", b"abcdef"));
    }

    #[test]
    fn differing_byte_anywhere() {
        assert!(!ct_eq(b"abcdef", b"abcdeg"));
        assert!(!ct_eq(b"zbcdef", b"abcdef"));
    }

    #[test]
    fn differing_length() {
        assert!(!ct_eq(b"abc", b"abcd"));
    }

    #[test]
    fn zeroize_clears_buffer() {
        let mut buf = [1u8, 2, 3, 4];
        zeroize(&mut buf);
        assert_eq!(buf, [0, 0, 0, 0]);
    }
}
