#[cfg(not(target_pointer_width = "64"))]
compile_error!(
    "library is only guaranteed to run on 64 bit machines due to casts from/to u64 and usize"
);

#[rustfmt::skip]
#[allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    reason = "cannot prevent allow attributes in generated files"
)]
pub mod generated;

pub mod crypto;
pub mod encoding;
pub mod protocol;
pub mod roll;

pub use elder_core_address as address;

/// A trait to convert from raw decoded protobuf types to idiomatic elder types.
///
/// The primary use of this trait is to convert to/from foreign types.
pub trait Protobuf: Sized {
    /// Errors that can occur when transforming from a raw type.
    type Error;
    /// The raw deserialized protobuf type.
    type Raw: prost::Name;

    /// Convert from a reference to the raw protobuf type.
    ///
    /// # Errors
    /// Returns [`Self::Error`] as defined by the implementor of this trait.
    fn try_from_raw_ref(raw: &Self::Raw) -> Result<Self, Self::Error>;

    /// Convert from the raw protobuf type, dropping it.
    ///
    /// # Errors
    /// Returns [`Self::Error`] as defined by the implementor of this trait.
    fn try_from_raw(raw: Self::Raw) -> Result<Self, Self::Error> {
        Self::try_from_raw_ref(&raw)
    }

    /// Convert to the raw protobuf type by reference.
    fn to_raw(&self) -> Self::Raw;

    /// Convert to the raw protobuf type, dropping `self`.
    fn into_raw(self) -> Self::Raw {
        Self::to_raw(&self)
    }

    /// The type URL under which the raw type is packed into a protobuf `Any`.
    #[must_use]
    fn type_url() -> String {
        <Self::Raw as prost::Name>::type_url()
    }
}
