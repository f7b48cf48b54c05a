//! Defines the fixed-size [`Key`], [`Nonce`], and [`Tag`] newtypes used throughout
//! the GFRX+COFB API. Unlike AES, GFRX has exactly one key size, so these are
//! thin wrappers around fixed-size byte arrays rather than an enum over sizes.

use crate::gfrx_cofb::error::{Error, Result};

/// A 128-bit GFRX key. Immutable once constructed; never modified in place.
///
/// ## Examples
/// ```
/// # fn main() -> gfrx_cofb::Result<()> {
/// use gfrx_cofb::Key;
///
/// let bytes = [0u8; 16];
/// let key = Key::try_from_slice(&bytes)?;
/// assert_eq!(key.as_bytes(), &bytes);
///
/// // wrong length is rejected
/// assert!(Key::try_from_slice(&bytes[..15]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Key([u8; 16]);

impl Key {
    /// Builds a key directly from a 16-byte array.
    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Attempts to build a key from a byte slice. Fails if the slice is not
    /// exactly 16 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| Error::InvalidArgument {
            field: "key",
            len: bytes.len(),
            expected: 16,
        })?;
        Ok(Self(arr))
    }

    /// Returns a reference to the internal key bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        crate::gfrx_cofb::ct::zeroize(&mut self.0);
    }
}

/// A 64-bit nonce. Must be unique per (key, encrypt-call); reuse breaks both
/// confidentiality and authenticity of every message encrypted under it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Nonce([u8; 8]);

impl Nonce {
    /// Builds a nonce directly from an 8-byte array.
    pub fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Attempts to build a nonce from a byte slice. Fails if the slice is not
    /// exactly 8 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidArgument {
            field: "nonce",
            len: bytes.len(),
            expected: 8,
        })?;
        Ok(Self(arr))
    }

    /// Returns a reference to the internal nonce bytes.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

/// A 128-bit authentication tag, produced by encrypt and required as input to decrypt.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tag([u8; 16]);

impl Tag {
    /// Builds a tag directly from a 16-byte array.
    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Attempts to build a tag from a byte slice. Fails if the slice is not
    /// exactly 16 bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| Error::InvalidArgument {
            field: "tag",
            len: bytes.len(),
            expected: 16,
        })?;
        Ok(Self(arr))
    }

    /// Returns a reference to the internal tag bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}
