//! Utilities to emit fields using their [`std::fmt::Display`] implementation.
use std::fmt::{
    Display,
    Formatter,
    Result,
};

use base64::{
    display::Base64Display,
    engine::general_purpose::GeneralPurpose,
};

/// Format `bytes` using standard base64 formatting.
///
/// See the [`base64::engine::general_purpose::STANDARD`] for the formatting definition.
pub fn base64<T: AsRef<[u8]> + ?Sized>(bytes: &T) -> Base64Display<'_, 'static, GeneralPurpose> {
    Base64Display::new(bytes.as_ref(), &base64::engine::general_purpose::STANDARD)
}

/// Format `bytes` as lower-cased hex without a `0x` prefix.
///
/// # Example
/// ```
/// use elder_telemetry::display;
/// let tx_hash = [0xab_u8; 32];
/// tracing::info!(tx_hash = %display::hex(&tx_hash), "relayed transaction");
/// ```
pub fn hex<T: AsRef<[u8]> + ?Sized>(bytes: &T) -> Hex<'_> {
    Hex(bytes.as_ref())
}

/// A newtype wrapper of a byte slice that implements [`std::fmt::Display`].
///
/// To be used in tracing contexts. See the [`self::hex`] utility.
pub struct Hex<'a>(&'a [u8]);

impl Display for Hex<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for byte in self.0 {
            f.write_fmt(format_args!("{byte:02x}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_unprefixed() {
        assert_eq!(hex(&[0x0a_u8, 0xbc, 0xff]).to_string(), "0abcff");
        assert_eq!(hex(&[0u8; 0][..]).to_string(), "");
    }

    #[test]
    fn base64_uses_standard_alphabet() {
        assert_eq!(base64(&[0xfb_u8, 0xff]).to_string(), "+/8=");
    }
}
