//! Bech32 account addresses as used by the elder chain.
//!
//! Elder accounts are 20 byte values rendered in the classic bech32 checksum
//! (not bech32m), usually under the `elder` human readable prefix.
use std::{
    borrow::Cow,
    str::FromStr,
};

/// The length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// The human readable prefix used by elder mainnet and testnets.
pub const DEFAULT_PREFIX: &str = "elder";

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Address {
    bytes: [u8; ADDRESS_LENGTH],
    prefix: bech32::Hrp,
}

impl Address {
    #[must_use = "the builder must be used to construct an address to be useful"]
    pub fn builder() -> Builder<'static> {
        Builder {
            bytes: None,
            prefix: Cow::Borrowed(DEFAULT_PREFIX),
        }
    }

    #[must_use]
    pub fn bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.bytes
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.bytes
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Converts to a new address with the given `prefix`.
    ///
    /// # Errors
    /// Returns an error if `prefix` is not a valid bech32 human readable part.
    pub fn to_prefix(&self, prefix: &str) -> Result<Self, Error> {
        Self::builder()
            .array(self.bytes)
            .prefix(prefix)
            .try_build()
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let checked = bech32::primitives::decode::CheckedHrpstring::new::<bech32::Bech32>(s)
            .map_err(Error::decode)?;
        let bytes: Vec<u8> = checked.byte_iter().collect();
        let hrp = checked.hrp();
        Self::builder()
            .slice(bytes.as_slice())
            .prefix(hrp.as_str())
            .try_build()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use bech32::EncodeError;
        match bech32::encode_lower_to_fmt::<bech32::Bech32, _>(f, self.prefix, &self.bytes) {
            Ok(()) => Ok(()),
            Err(EncodeError::Fmt(err)) => Err(err),
            Err(err) => panic!(
                "a 20 byte payload under a parsed prefix can only fail encoding on formatter \
                 errors:\n{err:?}"
            ),
        }
    }
}

/// Constructs an [`Address`] from its parts.
///
/// The prefix defaults to [`DEFAULT_PREFIX`].
pub struct Builder<'a> {
    bytes: Option<Cow<'a, [u8]>>,
    prefix: Cow<'a, str>,
}

impl<'a> Builder<'a> {
    #[must_use = "the builder must be built to construct an address to be useful"]
    pub fn array(self, array: [u8; ADDRESS_LENGTH]) -> Builder<'a> {
        Builder {
            bytes: Some(Cow::Owned(array.to_vec())),
            prefix: self.prefix,
        }
    }

    #[must_use = "the builder must be built to construct an address to be useful"]
    pub fn slice<'b, T: Into<Cow<'b, [u8]>>>(self, bytes: T) -> Builder<'b>
    where
        'a: 'b,
    {
        Builder {
            bytes: Some(bytes.into()),
            prefix: self.prefix,
        }
    }

    #[must_use = "the builder must be built to construct an address to be useful"]
    pub fn prefix<'b, T: Into<Cow<'b, str>>>(self, prefix: T) -> Builder<'b>
    where
        'a: 'b,
    {
        Builder {
            bytes: self.bytes,
            prefix: prefix.into(),
        }
    }

    /// Attempts to build an address from the configured prefix and bytes.
    ///
    /// # Errors
    /// Returns an error if one of the following conditions are violated:
    /// + no bytes were provided, or they are not exactly 20 bytes long.
    /// + the prefix is shorter than 1 or longer than 83 characters, or contains characters
    ///   outside 33-126 of ASCII characters.
    pub fn try_build(self) -> Result<Address, Error> {
        let Self {
            bytes,
            prefix,
        } = self;
        let bytes = bytes.ok_or_else(Error::missing_bytes)?;
        let bytes = <[u8; ADDRESS_LENGTH]>::try_from(bytes.as_ref())
            .map_err(|_| Error::incorrect_length(bytes.len()))?;
        let prefix = bech32::Hrp::parse(&prefix).map_err(Error::invalid_prefix)?;
        Ok(Address {
            bytes,
            prefix,
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    fn decode(source: bech32::primitives::decode::CheckedHrpstringError) -> Self {
        Self(ErrorKind::Decode {
            source,
        })
    }

    fn invalid_prefix(source: bech32::primitives::hrp::Error) -> Self {
        Self(ErrorKind::InvalidPrefix {
            source,
        })
    }

    fn incorrect_length(received: usize) -> Self {
        Self(ErrorKind::IncorrectLength {
            received,
        })
    }

    fn missing_bytes() -> Self {
        Self(ErrorKind::MissingBytes)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum ErrorKind {
    #[error("failed decoding provided string as bech32")]
    Decode {
        source: bech32::primitives::decode::CheckedHrpstringError,
    },
    #[error("expected an address of 20 bytes, got `{received}`")]
    IncorrectLength { received: usize },
    #[error("the provided prefix was not a valid bech32 human readable prefix")]
    InvalidPrefix {
        source: bech32::primitives::hrp::Error,
    },
    #[error("no address bytes were provided")]
    MissingBytes,
}
