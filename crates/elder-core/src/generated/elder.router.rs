/// MsgSubmitRollTx submits a serialized rollup transaction on behalf of an elder account.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgSubmitRollTx {
    /// bech32 address of the elder account submitting the transaction
    #[prost(string, tag = "1")]
    pub sender: ::prost::alloc::string::String,
    /// identifier of the rollup the transaction is destined for
    #[prost(uint64, tag = "2")]
    pub roll_id: u64,
    /// the unsigned legacy encoding of the rollup transaction
    #[prost(bytes = "vec", tag = "3")]
    pub tx_data: ::prost::alloc::vec::Vec<u8>,
    /// account number of the sender on the elder chain
    #[prost(uint64, tag = "4")]
    pub acc_num: u64,
}
impl ::prost::Name for MsgSubmitRollTx {
    const NAME: &'static str = "MsgSubmitRollTx";
    const PACKAGE: &'static str = "elder.router";
    fn full_name() -> ::prost::alloc::string::String {
        ::prost::alloc::format!("elder.router.{}", Self::NAME)
    }
    fn type_url() -> ::prost::alloc::string::String {
        ::prost::alloc::format!("/elder.router.{}", Self::NAME)
    }
}
