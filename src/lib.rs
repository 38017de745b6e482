//! hexmix - small variable-length hex digest
//! **WARNING: NOT CRYPTOGRAPHICALLY SECURE**
//!
//! Maps any byte string to a lowercase hex fingerprint of 2 to 64 characters.
//! A 128-bit state seeded from the input length absorbs 16-byte blocks over
//! four rounds, is finalized into a 16-byte base digest, then stretched with a
//! counter to the requested length.
//!
//! ```
//! let a = hexmix::digest(b"hello", 32).unwrap();
//! let b = hexmix::digest(b"Hello", 32).unwrap();
//! let bits = hexmix::hamming(&a, &b).unwrap();
//! assert!(bits > 0);
//! ```
//!
//! SHA-256 ([`sha256_hex`]) is available for side-by-side comparison, and the
//! [`report`] module renders the comparison tables the `hexmix` binary prints.

mod digest;
mod distance;
mod error;
mod reference;
pub mod report;

pub use digest::{
    base_digest, digest, digest_batch, digest_bytes, rotl32, BLOCK_LEN, DEFAULT_HEX_LEN,
    MAX_HEX_LEN,
};
pub use distance::hamming;
pub use error::{Constraint, Error, Result};
pub use reference::sha256_hex;
