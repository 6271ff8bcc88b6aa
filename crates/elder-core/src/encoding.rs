//! Conversions between hex strings and bytes.
//!
//! Wallets and JSON-RPC endpoints hand out hex with and without a `0x` prefix, and sometimes
//! with an odd number of nibbles. Everything in this crate goes through these helpers so that
//! such inputs are treated the same everywhere.

/// Strips a leading `0x` or `0X` from `s` if present.
#[must_use]
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decodes a hex string with an optional `0x` prefix.
///
/// An odd number of nibbles is left-padded with a zero, so `0x1` decodes to `[0x01]`.
/// `0x` and the empty string decode to an empty vector.
///
/// # Errors
/// Returns an error if `s` contains non-hex characters.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let s = strip_0x(s);
    if s.len() % 2 == 1 {
        hex::decode(format!("0{s}"))
    } else {
        hex::decode(s)
    }
}

/// Encodes `bytes` as lower-case hex with a `0x` prefix.
#[must_use]
pub fn encode_hex_prefixed<T: AsRef<[u8]>>(bytes: T) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Left-pads `bytes` with zeros to a fixed size array.
///
/// Returns `None` if `bytes` is longer than `N`.
#[must_use]
pub fn left_pad<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    let offset = N.checked_sub(bytes.len())?;
    let mut padded = [0u8; N];
    padded[offset..].copy_from_slice(bytes);
    Some(padded)
}
