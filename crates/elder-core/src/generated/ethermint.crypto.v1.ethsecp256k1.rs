/// PubKey defines a type alias for an ecdsa.PublicKey that implements
/// Tendermint's PubKey interface. It represents the 33-byte compressed public
/// key format.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}
impl ::prost::Name for PubKey {
    const NAME: &'static str = "PubKey";
    const PACKAGE: &'static str = "ethermint.crypto.v1.ethsecp256k1";
    fn full_name() -> ::prost::alloc::string::String {
        ::prost::alloc::format!("ethermint.crypto.v1.ethsecp256k1.{}", Self::NAME)
    }
    fn type_url() -> ::prost::alloc::string::String {
        ::prost::alloc::format!("/ethermint.crypto.v1.ethsecp256k1.{}", Self::NAME)
    }
}
