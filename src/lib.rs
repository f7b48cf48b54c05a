//! This crate implements **GFRX+COFB**: the GFRX-128 Feistel-ARX block cipher
//! combined with COFB (COmbined FeedBack), a block-cipher-based
//! authenticated encryption mode with associated data (AEAD).
//!
//! - **GFRX-128** is a 128-bit block, 128-bit key Feistel cipher built
//!   entirely from addition, rotation, and XOR (ARX) — no S-box lookup
//!   tables anywhere in the round function.
//! - **COFB** turns the single-block primitive into a nonce-based AEAD: a
//!   16-byte feedback register `Y` is threaded through every AD and message
//!   block via the `rho`/`rho^-1` functions, masked at each step by a
//!   GF(2^64) doubling/tripling schedule seeded from the nonce-encryption
//!   output. The final `Y` is the authentication tag.
//!
//! ## Examples
//! ```
//! use gfrx_cofb::{Key, Nonce};
//!
//! let key = Key::new([0u8; 16]);
//! let nonce = Nonce::new([0u8; 8]);
//! let ad = b"associated data, authenticated but not encrypted";
//! let plaintext = b"attack at dawn";
//!
//! let (ciphertext, tag) = gfrx_cofb::encrypt(&key, &nonce, ad, plaintext);
//! let recovered = gfrx_cofb::decrypt(&key, &nonce, ad, &ciphertext, &tag)
//!     .expect("tag should verify");
//!
//! assert_eq!(recovered, plaintext);
//! ```
//!
//! ## Security notes
//! A nonce must never be reused with the same key — doing so breaks both
//! confidentiality and authenticity for every message encrypted under that
//! (key, nonce) pair. This crate provides constant-time tag comparison and
//! best-effort zeroization of sensitive buffers, but no protection against
//! physical side channels (timing of data-dependent memory access, power,
//! cache attacks).

mod gfrx_cofb;

pub use gfrx_cofb::{Cofb, Error, Key, Nonce, Result, Tag, decrypt, encrypt};
