//! Core GFRX-128 implementation: key schedule and 16-byte block encrypt/decrypt.

mod block;
mod primitives;
mod schedule;

pub(crate) use block::GfrxContext;
