//! COFB (COmbined FeedBack) mode built on the GFRX-128 block cipher.

mod aead;
mod mask;
mod rho;

pub use aead::Cofb;
