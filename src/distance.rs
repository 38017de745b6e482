//! Bit-level Hamming distance between hex fingerprints.

use crate::error::{Constraint, Result};

fn decode(label: &str, hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str).map_err(|e| Constraint::MalformedHex(format!("{label}: {e}")).into())
}

/// Count the differing bits between two hex strings.
///
/// The shorter value is right-padded with zero bytes, so `"ab"` compares as
/// `"ab00"` against a four-digit string. Both inputs are decoded before any
/// comparison; odd-length or non-hex text fails with
/// [`Error::InvalidParameter`](crate::Error::InvalidParameter).
pub fn hamming(a: &str, b: &str) -> Result<u32> {
    let a = decode("first operand", a)?;
    let b = decode("second operand", b)?;

    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };
    let shared: u32 = long
        .iter()
        .zip(short.iter())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum();
    let tail: u32 = long[short.len()..].iter().map(|x| x.count_ones()).sum();
    Ok(shared + tail)
}
