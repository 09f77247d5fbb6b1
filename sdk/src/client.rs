//! # SDK Facade
//!
//! [`BumoSdk`] wires the collaborators together and hands out one view per
//! concern. Views hold `Arc`s of the shared collaborators, so they are cheap
//! to create, `Send`, and independent of each other: two transaction
//! pipelines never share mutable state.

use std::sync::Arc;

use crate::account::AccountService;
use crate::config::SdkOptions;
use crate::crypto::{Ed25519Keys, KeyCapability};
use crate::errors::SdkResult;
use crate::ledger::LedgerService;
use crate::operation::{build_operation, OperationDescriptor, OperationKind};
use crate::transaction::{
    self, EncodedTransaction, SignaturePair, Submitted, TransactionDraft,
};
use crate::transport::{HttpTransport, Transport};
use crate::validation::Args;

/// Entry point of the SDK.
///
/// ```no_run
/// use bumo_sdk::{BumoSdk, SdkOptions};
///
/// # async fn run() -> bumo_sdk::SdkResult<()> {
/// let sdk = BumoSdk::new(SdkOptions::new("seed1.bumotest.io:26002"))?;
/// let fees = sdk.ledger().default_fees().await?;
/// println!("gas price {}", fees.gas_price);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BumoSdk {
    options: SdkOptions,
    transport: Arc<dyn Transport>,
    keys: Arc<dyn KeyCapability>,
}

impl BumoSdk {
    /// HTTP transport and Ed25519 keys.
    pub fn new(options: SdkOptions) -> SdkResult<Self> {
        let transport = HttpTransport::new(&options)?;
        Ok(Self {
            options,
            transport: Arc::new(transport),
            keys: Arc::new(Ed25519Keys),
        })
    }

    /// Custom collaborators, e.g. a recording transport in tests or a
    /// hardware-backed key capability.
    pub fn with_parts(
        options: SdkOptions,
        transport: Arc<dyn Transport>,
        keys: Arc<dyn KeyCapability>,
    ) -> SdkResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            transport,
            keys,
        })
    }

    pub fn options(&self) -> &SdkOptions {
        &self.options
    }

    pub fn keys(&self) -> &dyn KeyCapability {
        self.keys.as_ref()
    }

    pub fn account(&self) -> AccountService {
        AccountService::new(self.transport.clone(), self.keys.clone())
    }

    pub fn ledger(&self) -> LedgerService {
        LedgerService::new(self.transport.clone())
    }

    pub fn operation(&self) -> OperationFactory {
        OperationFactory {
            keys: self.keys.clone(),
        }
    }

    pub fn transaction(&self) -> TransactionService {
        TransactionService {
            transport: self.transport.clone(),
            keys: self.keys.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Builds operations from loose arguments.
#[derive(Clone)]
pub struct OperationFactory {
    keys: Arc<dyn KeyCapability>,
}

impl OperationFactory {
    /// Dispatches on a kind name; unknown names fail with
    /// `OPERATION_UNRESOLVABLE`.
    pub fn build(&self, kind: &str, args: Args) -> SdkResult<OperationDescriptor> {
        build_operation(kind, args, self.keys.as_ref())
    }

    pub fn issue_asset(&self, args: Args) -> SdkResult<OperationDescriptor> {
        OperationKind::IssueAsset.build(args, self.keys.as_ref())
    }

    pub fn pay_asset(&self, args: Args) -> SdkResult<OperationDescriptor> {
        OperationKind::PayAsset.build(args, self.keys.as_ref())
    }

    pub fn pay_coin(&self, args: Args) -> SdkResult<OperationDescriptor> {
        OperationKind::PayCoin.build(args, self.keys.as_ref())
    }

    pub fn create_account(&self, args: Args) -> SdkResult<OperationDescriptor> {
        OperationKind::CreateAccount.build(args, self.keys.as_ref())
    }

    pub fn set_metadata(&self, args: Args) -> SdkResult<OperationDescriptor> {
        OperationKind::SetMetadata.build(args, self.keys.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// validate, build, encode, sign, submit.
#[derive(Clone)]
pub struct TransactionService {
    transport: Arc<dyn Transport>,
    keys: Arc<dyn KeyCapability>,
}

impl TransactionService {
    /// Validates loose transaction arguments and encodes them. Nothing is
    /// encoded unless every field and operation passes validation.
    pub fn build_blob(&self, args: Args) -> SdkResult<EncodedTransaction> {
        let draft = TransactionDraft::from_args(args, self.keys.as_ref())?;
        self.encode(&draft)
    }

    pub fn encode(&self, draft: &TransactionDraft) -> SdkResult<EncodedTransaction> {
        Ok(transaction::encode(draft)?)
    }

    pub fn decode(&self, blob: &EncodedTransaction) -> SdkResult<TransactionDraft> {
        Ok(transaction::decode(blob)?)
    }

    pub fn sign<S: AsRef<str>>(
        &self,
        blob: &EncodedTransaction,
        private_keys: &[S],
    ) -> SdkResult<Vec<SignaturePair>> {
        transaction::sign_blob(blob, private_keys, self.keys.as_ref())
    }

    pub async fn submit(
        &self,
        blob: &EncodedTransaction,
        signatures: &[SignaturePair],
    ) -> SdkResult<Submitted> {
        transaction::submit(self.transport.as_ref(), blob, signatures).await
    }
}
