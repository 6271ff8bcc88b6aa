use std::str::FromStr;

use ethers::types::U256;

use super::Error;
use crate::encoding::{
    decode_hex,
    strip_0x,
};

/// An unsigned integer that is guaranteed to fit into 32 bytes.
///
/// All numeric transaction fields go through this type so that oversized values are rejected
/// when a field bag is filled in rather than when the transaction is encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(U256);

impl Quantity {
    pub const ZERO: Self = Self(U256::zero());

    /// Interprets `bytes` as a big-endian integer.
    ///
    /// Leading zero bytes are accepted.
    ///
    /// # Errors
    /// Returns [`Error::ValueTooLarge`] if the value needs more than 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, Error> {
        let significant = bytes
            .iter()
            .position(|byte| *byte != 0)
            .map_or(&[][..], |start| &bytes[start..]);
        if significant.len() > 32 {
            return Err(Error::value_too_large(bytes));
        }
        Ok(Self(U256::from_big_endian(significant)))
    }

    /// Parses a hex string with an optional `0x` prefix. `0x` alone is zero.
    ///
    /// # Errors
    /// Returns an error if `s` is not hex or its value needs more than 32 bytes.
    pub fn from_hex_str(s: &str) -> Result<Self, Error> {
        let bytes = decode_hex(s).map_err(|_| Error::InvalidQuantity {
            input: s.to_string(),
        })?;
        Self::from_be_slice(&bytes)
    }

    /// Parses a base 10 string.
    ///
    /// # Errors
    /// Returns an error if `s` is not a decimal number or its value needs more than 32 bytes.
    pub fn from_dec_str(s: &str) -> Result<Self, Error> {
        if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(Error::InvalidQuantity {
                input: s.to_string(),
            });
        }
        // only overflow is left as a failure mode once the input is known to be all digits
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|_| Error::ValueTooLarge {
                value: s.to_string(),
            })
    }

    #[must_use]
    pub fn get(self) -> U256 {
        self.0
    }
}

impl FromStr for Quantity {
    type Err = Error;

    /// Reads `0x` prefixed input as hex and everything else as decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if strip_0x(s).len() == s.len() {
            Self::from_dec_str(s)
        } else {
            Self::from_hex_str(s)
        }
    }
}

impl From<U256> for Quantity {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Quantity {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<Quantity> for U256 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}
