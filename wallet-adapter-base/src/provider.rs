use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::adapter::WalletReadyState;
use crate::error::ProviderError;
use crate::subscription::Subscription;
use crate::types::{
    AccountInfo, HexEncodedBytes, SignMessagePayload, SignMessageResponse,
    SignTransactionResponse, TransactionOptions, TransactionPayload,
};

pub type ProviderResult<T> = std::result::Result<Option<T>, ProviderError>;

/// Called with the raw value the provider reports on a network switch.
pub type NetworkChangeHandler = Rc<dyn Fn(Value) -> LocalBoxFuture<'static, ()>>;

/// Called with the new account, or `None` when the provider reports an
/// empty account (locked or disconnected).
pub type AccountChangeHandler = Rc<dyn Fn(Option<AccountInfo>) -> LocalBoxFuture<'static, ()>>;

/// The object an Aptos wallet extension injects into the page.
///
/// Every call resolves to `Ok(None)` when the provider answers with an
/// empty value, so the adapter decides what an empty answer means.
#[async_trait::async_trait(?Send)]
pub trait AptosProvider {
    async fn connect(&self) -> ProviderResult<AccountInfo>;
    async fn account(&self) -> ProviderResult<AccountInfo>;
    async fn disconnect(&self) -> std::result::Result<(), ProviderError>;
    async fn sign_transaction(
        &self,
        transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> ProviderResult<SignTransactionResponse>;
    async fn sign_and_submit_transaction(
        &self,
        transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> ProviderResult<HexEncodedBytes>;
    async fn sign_message(&self, payload: &SignMessagePayload)
        -> ProviderResult<SignMessageResponse>;
    async fn network(&self) -> ProviderResult<String>;
    async fn on_network_change(
        &self,
        handler: NetworkChangeHandler,
    ) -> std::result::Result<Subscription, ProviderError>;
    async fn on_account_change(
        &self,
        handler: AccountChangeHandler,
    ) -> std::result::Result<Subscription, ProviderError>;
}

/// Locates the provider. Queried on every call, so a wallet installed or
/// unlocked after the adapter was built is picked up.
pub trait ProviderDetector {
    type Provider: AptosProvider + 'static;

    fn ready_state(&self) -> WalletReadyState;
    fn provider(&self) -> Option<Rc<Self::Provider>>;
}

/// Detector over a provider handed in by the caller.
#[derive(Debug)]
pub struct StaticDetector<P> {
    provider: Option<Rc<P>>,
    browser: bool,
}

impl<P> StaticDetector<P> {
    pub fn new(provider: P) -> Self {
        Self::from_rc(Rc::new(provider))
    }

    pub fn from_rc(provider: Rc<P>) -> Self {
        Self {
            provider: Some(provider),
            browser: true,
        }
    }

    /// A browser context without the extension.
    pub fn not_detected() -> Self {
        Self {
            provider: None,
            browser: true,
        }
    }

    /// No browser context at all (server side, native targets).
    pub fn unsupported() -> Self {
        Self {
            provider: None,
            browser: false,
        }
    }
}

impl<P: AptosProvider + 'static> ProviderDetector for StaticDetector<P> {
    type Provider = P;

    fn ready_state(&self) -> WalletReadyState {
        match (&self.provider, self.browser) {
            (_, false) => WalletReadyState::Unsupported,
            (Some(_), true) => WalletReadyState::Installed,
            (None, true) => WalletReadyState::NotDetected,
        }
    }

    fn provider(&self) -> Option<Rc<P>> {
        self.provider.clone()
    }
}
