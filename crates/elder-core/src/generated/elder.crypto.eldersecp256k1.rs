/// PubKey is an elder-native secp256k1 public key in its 33 byte compressed form.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}
impl ::prost::Name for PubKey {
    const NAME: &'static str = "PubKey";
    const PACKAGE: &'static str = "elder.crypto.eldersecp256k1";
    fn full_name() -> ::prost::alloc::string::String {
        ::prost::alloc::format!("elder.crypto.eldersecp256k1.{}", Self::NAME)
    }
    fn type_url() -> ::prost::alloc::string::String {
        ::prost::alloc::format!("/elder.crypto.eldersecp256k1.{}", Self::NAME)
    }
}
