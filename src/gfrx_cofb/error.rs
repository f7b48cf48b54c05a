use thiserror::Error;

/// GFRX+COFB result type.
pub type Result<T> = std::result::Result<T, Error>;

/// GFRX+COFB error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Computed tag did not match the tag supplied to decrypt. Ciphertext,
    /// AAD, nonce, or key has been modified since encryption, or the wrong
    /// key/nonce was used.
    #[error("COFB authentication failed (invalid tag)")]
    Authentication,

    /// A fixed-size input (key, nonce, or tag) was not the required length.
    #[error("invalid {field} length: {len} bytes (expected {expected})")]
    InvalidArgument {
        field: &'static str,
        len: usize,
        expected: usize,
    },
}
