mod codec;
mod cofb;
mod core;
mod ct;
mod error;
mod key;

pub use cofb::Cofb;
pub use error::{Error, Result};
pub use key::{Key, Nonce, Tag};

/// Encrypts `plaintext` under `key` and `nonce`, authenticating `ad`
/// alongside it. `nonce` must never repeat for a given `key`. Returns
/// `(ciphertext, tag)`; `ciphertext.len() == plaintext.len()`.
///
/// This is a convenience wrapper around [`Cofb::new`] + [`Cofb::seal`] for
/// one-shot use; reuse a [`Cofb`] instance directly to avoid re-running the
/// key schedule across multiple calls under the same key.
pub fn encrypt(key: &Key, nonce: &Nonce, ad: &[u8], plaintext: &[u8]) -> (Vec<u8>, Tag) {
    Cofb::new(key).seal(nonce, ad, plaintext)
}

/// Decrypts `ciphertext` under `key` and `nonce`, verifying it and `ad`
/// against `tag` in constant time. Returns [`Error::Authentication`] on
/// mismatch; no partial plaintext is ever returned on failure.
pub fn decrypt(key: &Key, nonce: &Nonce, ad: &[u8], ciphertext: &[u8], tag: &Tag) -> Result<Vec<u8>> {
    Cofb::new(key).open(nonce, ad, ciphertext, tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_function_round_trip() {
        let key = Key::new([0x42; 16]);
        let nonce = Nonce::new([7; 8]);
        let ad = b"authenticated header";
        let plaintext = b"hello, GFRX+COFB";

        let (ct, tag) = encrypt(&key, &nonce, ad, plaintext);
        let recovered = decrypt(&key, &nonce, ad, &ct, &tag).unwrap();

        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn encrypt_is_deterministic_across_calls() {
        let key = Key::new([0x11; 16]);
        let nonce = Nonce::new([2; 8]);

        let (ct1, tag1) = encrypt(&key, &nonce, b"ad", b"message");
        let (ct2, tag2) = encrypt(&key, &nonce, b"ad", b"message");

        assert_eq!(ct1, ct2);
        assert_eq!(tag1.as_bytes(), tag2.as_bytes());
    }
}
