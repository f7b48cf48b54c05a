mod args;

use args::{Cli, Commands};
use clap::Parser;
use gfrx_cofb::{Key, Nonce, Tag};
use rand::TryRngCore;
use rand::rngs::OsRng;

use std::fs;
use std::time::Instant;

use thiserror::Error;

const NONCE_SIZE: usize = 8;
const TAG_SIZE: usize = 16;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid hex in --key or --aad: {0}")]
    InvalidHex(#[from] std::num::ParseIntError),

    #[error("invalid key length: {0} bytes (expected 16)")]
    KeyInvalidLength(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Os(#[from] rand::rand_core::OsError),

    #[error("malformed container: {0}")]
    Container(&'static str),

    #[error(transparent)]
    Core(#[from] gfrx_cofb::Error),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = Cli::parse();

    match args.command {
        Commands::Encrypt(enc) => {
            // common args:
            let input_path = enc.common.input; // move ownership
            let output_path = enc.common.output;
            let key = parse_key(&enc.common.key)?;

            // read plaintext from input_path
            let plaintext = fs::read(input_path)?;

            // parse AAD
            let ad: Vec<u8> = match enc.aad {
                Some(hex) => parse_hex(&hex)?,
                None => Vec::new(),
            };

            // draw nonce from OS entropy; reuse is a correctness precondition violation
            let mut nonce_bytes = [0u8; NONCE_SIZE];
            OsRng.try_fill_bytes(&mut nonce_bytes)?;
            let nonce = Nonce::new(nonce_bytes);

            let start = Instant::now();
            let (ciphertext, tag) = gfrx_cofb::encrypt(&key, &nonce, &ad, &plaintext);
            let duration = start.elapsed();

            let container = pack_container(&ad, &nonce_bytes, tag.as_bytes(), &ciphertext);
            fs::write(output_path, &container)?;

            println!(
                "Encrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(common) => {
            let input_path = common.input; // move ownership
            let output_path = common.output;
            let key = parse_key(&common.key)?;

            // read and unpack container
            let container = fs::read(input_path)?;
            let (ad, nonce_bytes, tag_bytes, ciphertext) = unpack_container(&container)?;
            let nonce = Nonce::new(nonce_bytes);
            let tag = Tag::new(tag_bytes);

            let start = Instant::now();
            let plaintext = gfrx_cofb::decrypt(&key, &nonce, ad, ciphertext, &tag)?;
            let duration = start.elapsed();

            fs::write(output_path, &plaintext)?;

            if !ad.is_empty() {
                print!("AAD = ");
                for b in ad {
                    print!("{b:02x}");
                }
                println!();
            }

            println!(
                "Decrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );

            Ok(())
        }
    }
}

fn parse_key(hex: &str) -> Result<Key, CliError> {
    let bytes = parse_hex(hex)?;
    if bytes.len() != 16 {
        return Err(CliError::KeyInvalidLength(bytes.len()));
    }
    let mut arr = [0u8; 16];
    arr.copy_from_slice(&bytes);
    Ok(Key::new(arr))
}

// parse_aad written with LLM assistance:
fn parse_hex(s: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    let mut hex: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    if hex.len() % 2 == 1 {
        hex.insert(0, '0');
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
}

/// Packs the file container: `ad_len (2 bytes) || ad || nonce (8) || tag
/// (16) || ciphertext`. The reference tool this format is bit-exact with
/// writes `ad_len` as a host-native `uint16_t`; this implementation
/// deliberately writes it little-endian so encrypted files are portable
/// across host endianness (a documented correction, not guessed intent).
fn pack_container(
    ad: &[u8],
    nonce: &[u8; NONCE_SIZE],
    tag: &[u8; TAG_SIZE],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + ad.len() + NONCE_SIZE + TAG_SIZE + ciphertext.len());
    out.extend_from_slice(&(ad.len() as u16).to_le_bytes());
    out.extend_from_slice(ad);
    out.extend_from_slice(nonce);
    out.extend_from_slice(tag);
    out.extend_from_slice(ciphertext);
    out
}

fn unpack_container(
    container: &[u8],
) -> Result<(&[u8], [u8; NONCE_SIZE], [u8; TAG_SIZE], &[u8]), CliError> {
    if container.len() < 2 {
        return Err(CliError::Container("missing ad_len field"));
    }
    let ad_len = u16::from_le_bytes([container[0], container[1]]) as usize;

    let header_len = 2 + ad_len + NONCE_SIZE + TAG_SIZE;
    if container.len() < header_len {
        return Err(CliError::Container("file shorter than declared ad_len"));
    }

    let ad = &container[2..2 + ad_len];

    let nonce_start = 2 + ad_len;
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&container[nonce_start..nonce_start + NONCE_SIZE]);

    let tag_start = nonce_start + NONCE_SIZE;
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&container[tag_start..tag_start + TAG_SIZE]);

    let ciphertext = &container[tag_start + TAG_SIZE..];

    Ok((ad, nonce, tag, ciphertext))
}
