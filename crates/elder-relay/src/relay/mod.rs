use elder_core::{
    address::Address,
    crypto::CompressedPublicKey,
    generated::cosmos::tx::v1beta1::TxRaw,
    protocol::{
        registry,
        transaction::{
            self,
            PublicKeyRecord,
            RollSubmission,
            SignDoc,
            WalletKind,
        },
        Registry,
    },
    roll::{
        self,
        InnerTransaction,
        Quantity,
        TransactionFields,
        TxType,
    },
};
use elder_relay_client::RestClient;
use elder_telemetry::display::hex;
use ethers::types::H256;
use prost::Message as _;
use tracing::{
    debug,
    info,
    instrument,
};

use crate::{
    signer::{
        self,
        DirectSignResponse,
        SigningIdentity,
    },
    ChainConfig,
};


/// Gas price written into the rollup payload. The router does not charge it.
pub const PLACEHOLDER_GAS_PRICE: u64 = 20_000_000_000;

/// A rollup transaction to relay and the elder account paying for it.
#[derive(Clone, Debug)]
pub struct RelayRequest {
    /// The rollup transaction as produced by the wallet. Its `to`, `nonce`, `data` and access
    /// list are relayed, everything else is replaced.
    pub draft: TransactionFields,
    pub sender: Address,
    pub sender_public_key: CompressedPublicKey,
    pub gas_limit: Quantity,
    pub value: Quantity,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelayOutput {
    /// The hash of the inner transaction; stable across re-submissions of the same request.
    pub tx_hash: H256,
    pub raw_tx: TxRaw,
}

impl RelayOutput {
    #[must_use]
    pub fn raw_tx_bytes(&self) -> Vec<u8> {
        self.raw_tx.encode_to_vec()
    }
}

pub struct Relayer<'a> {
    chain: ChainConfig,
    rest: RestClient,
    registry: &'a Registry,
}

impl<'a> Relayer<'a> {
    #[must_use]
    pub fn new(chain: ChainConfig, rest: RestClient, registry: &'a Registry) -> Self {
        Self {
            chain,
            rest,
            registry,
        }
    }

    #[must_use]
    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    /// Builds, simulates and signs the elder envelope carrying `request`.
    ///
    /// Any failure aborts the call; nothing is retried.
    ///
    /// # Errors
    /// Returns an error naming the step that failed.
    #[instrument(skip_all, fields(sender = %request.sender, ?wallet_kind), err)]
    pub async fn relay(
        &self,
        request: RelayRequest,
        identity: &dyn SigningIdentity,
        wallet_kind: WalletKind,
    ) -> Result<RelayOutput, Error> {
        let RelayRequest {
            draft,
            sender,
            sender_public_key,
            gas_limit,
            value,
        } = request;

        let account = self
            .rest
            .get_account(&sender)
            .await
            .map_err(Error::account)?;

        let inner = self.inner_transaction(
            &draft,
            gas_limit,
            value,
            &sender_public_key,
            account.sequence,
        )?;
        let tx_hash = inner.hash();
        debug!(tx_hash = %hex(tx_hash.as_bytes()), "computed inner transaction hash");

        let tx_data = self.rollup_payload(draft, gas_limit, value)?;
        let submission = RollSubmission::new(
            sender,
            self.chain.roll_id,
            tx_data.into(),
            account.account_number,
        );
        let message = self
            .registry
            .encode(&submission.into())
            .map_err(Error::registry)?;

        let public_key = PublicKeyRecord::for_wallet(wallet_kind, sender_public_key);
        let estimate = self
            .rest
            .simulate_message(message.clone(), &public_key, account.sequence)
            .await
            .map_err(Error::simulation)?;
        let fee = estimate.fee(&self.chain.fee_denom, self.chain.fee_amount);
        debug!(
            gas_used = estimate.gas_used,
            gas_limit = fee.gas_limit,
            "estimated fee"
        );

        let sign_doc = SignDoc::builder()
            .message(message)
            .public_key(wallet_kind, sender_public_key)
            .fee(fee)
            .sequence(account.sequence)
            .account_number(account.account_number)
            .chain_id(self.chain.chain_id.clone())
            .try_build()
            .map_err(Error::sign_doc)?;

        let DirectSignResponse {
            signed,
            signature,
        } = identity
            .sign_direct(&sender, sign_doc)
            .await
            .map_err(Error::sign)?;
        let signature = signature
            .signature_bytes()
            .map_err(Error::signature)?;
        let raw_tx = signed.into_tx_raw(signature);

        info!(
            tx_hash = %hex(tx_hash.as_bytes()),
            sequence = account.sequence,
            "assembled elder transaction"
        );
        Ok(RelayOutput {
            tx_hash,
            raw_tx,
        })
    }

    /// The inner transaction whose hash identifies the relayed transaction.
    fn inner_transaction(
        &self,
        draft: &TransactionFields,
        gas_limit: Quantity,
        value: Quantity,
        sender_public_key: &CompressedPublicKey,
        sequence: u64,
    ) -> Result<InnerTransaction, Error> {
        InnerTransaction::from_fields(TransactionFields {
            chain_id: Some(self.chain.roll_chain_id.into()),
            nonce: draft.nonce,
            gas_limit: Some(gas_limit),
            to: draft.to,
            value: Some(value),
            data: draft.data.clone(),
            access_list: draft.access_list.clone(),
            elder_public_key: Some(sender_public_key.to_hex()),
            elder_account_sequence: Some(sequence),
            ..TransactionFields::default()
        })
        .map_err(Error::inner_transaction)
    }

    /// The unsigned legacy encoding of the draft submitted to the router.
    ///
    /// The draft's nonce, fees, signature and sender are discarded.
    fn rollup_payload(
        &self,
        draft: TransactionFields,
        gas_limit: Quantity,
        value: Quantity,
    ) -> Result<Vec<u8>, Error> {
        let payload = InnerTransaction::from_fields(TransactionFields {
            tx_type: Some(TxType::Legacy),
            nonce: Some(0),
            gas_limit: Some(gas_limit),
            gas_price: Some(PLACEHOLDER_GAS_PRICE.into()),
            value: Some(value),
            chain_id: Some(self.chain.roll_chain_id.into()),
            to: draft.to,
            data: draft.data,
            ..TransactionFields::default()
        })
        .map_err(Error::rollup_payload)?;
        Ok(payload.unsigned_serialized())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed fetching the sender account")]
    Account { source: elder_relay_client::Error },
    #[error("failed building the inner transaction")]
    InnerTransaction { source: roll::Error },
    #[error("failed building the rollup payload")]
    RollupPayload { source: roll::Error },
    #[error("failed packing the roll submission")]
    Registry { source: registry::Error },
    #[error("failed simulating the envelope")]
    Simulation { source: elder_relay_client::Error },
    #[error("failed building the sign doc")]
    SignDoc { source: transaction::Error },
    #[error("signing identity failed to sign the envelope")]
    Sign { source: signer::Error },
    #[error("signing identity returned a malformed signature")]
    Signature { source: transaction::Error },
}

impl Error {
    fn account(source: elder_relay_client::Error) -> Self {
        Self::Account {
            source,
        }
    }

    fn inner_transaction(source: roll::Error) -> Self {
        Self::InnerTransaction {
            source,
        }
    }

    fn rollup_payload(source: roll::Error) -> Self {
        Self::RollupPayload {
            source,
        }
    }

    fn registry(source: registry::Error) -> Self {
        Self::Registry {
            source,
        }
    }

    fn simulation(source: elder_relay_client::Error) -> Self {
        Self::Simulation {
            source,
        }
    }

    fn sign_doc(source: transaction::Error) -> Self {
        Self::SignDoc {
            source,
        }
    }

    fn sign(source: signer::Error) -> Self {
        Self::Sign {
            source,
        }
    }

    fn signature(source: transaction::Error) -> Self {
        Self::Signature {
            source,
        }
    }
}
