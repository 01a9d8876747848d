use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use wallet_adapter_base::{
    AccountChangeHandler, AccountInfo, AptosProvider, HexEncodedBytes, Listeners,
    NetworkChangeHandler, ProviderDetector, ProviderError, ProviderResult, PublicKey,
    SignMessagePayload, SignMessageResponse, SignTransactionResponse, Subscription,
    TransactionOptions, TransactionPayload, WalletReadyState,
};

pub fn account(address: &str, public_key: Option<&str>) -> AccountInfo {
    AccountInfo {
        address: address.into(),
        public_key: public_key.map(|key| PublicKey::Single(key.into())),
        min_keys_required: None,
        ans_name: None,
    }
}

/// Scripted stand-in for an injected provider.
pub struct FakeProvider {
    pub connect: RefCell<ProviderResult<AccountInfo>>,
    pub account: RefCell<ProviderResult<AccountInfo>>,
    pub disconnect: RefCell<Result<(), ProviderError>>,
    pub sign_transaction: RefCell<ProviderResult<SignTransactionResponse>>,
    pub sign_and_submit: RefCell<ProviderResult<HexEncodedBytes>>,
    pub sign_message: RefCell<ProviderResult<SignMessageResponse>>,
    pub network: RefCell<ProviderResult<String>>,
    pub subscribe_error: RefCell<Option<ProviderError>>,
    pub calls: RefCell<Vec<&'static str>>,
    pub last_options: RefCell<Option<TransactionOptions>>,
    network_listeners: Listeners<NetworkChangeHandler>,
    account_listeners: Listeners<AccountChangeHandler>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            connect: RefCell::new(Ok(None)),
            account: RefCell::new(Ok(None)),
            disconnect: RefCell::new(Ok(())),
            sign_transaction: RefCell::new(Ok(None)),
            sign_and_submit: RefCell::new(Ok(None)),
            sign_message: RefCell::new(Ok(None)),
            network: RefCell::new(Ok(None)),
            subscribe_error: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
            last_options: RefCell::new(None),
            network_listeners: Listeners::new(),
            account_listeners: Listeners::new(),
        }
    }
}

impl FakeProvider {
    pub fn calls_to(&self, method: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == method)
            .count()
    }

    pub fn account_listeners(&self) -> usize {
        self.account_listeners.len()
    }

    pub async fn emit_account_change(&self, account: Option<AccountInfo>) {
        for handler in self.account_listeners.snapshot() {
            handler(account.clone()).await;
        }
    }

    pub async fn emit_network_change(&self, network: Value) {
        for handler in self.network_listeners.snapshot() {
            handler(network.clone()).await;
        }
    }

    fn record(&self, method: &'static str) {
        self.calls.borrow_mut().push(method);
    }
}

#[async_trait::async_trait(?Send)]
impl AptosProvider for FakeProvider {
    async fn connect(&self) -> ProviderResult<AccountInfo> {
        self.record("connect");
        self.connect.borrow().clone()
    }

    async fn account(&self) -> ProviderResult<AccountInfo> {
        self.record("account");
        self.account.borrow().clone()
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.record("disconnect");
        self.disconnect.borrow().clone()
    }

    async fn sign_transaction(
        &self,
        _transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> ProviderResult<SignTransactionResponse> {
        self.record("signTransaction");
        *self.last_options.borrow_mut() = options.cloned();
        self.sign_transaction.borrow().clone()
    }

    async fn sign_and_submit_transaction(
        &self,
        _transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> ProviderResult<HexEncodedBytes> {
        self.record("signAndSubmitTransaction");
        *self.last_options.borrow_mut() = options.cloned();
        self.sign_and_submit.borrow().clone()
    }

    async fn sign_message(
        &self,
        _payload: &SignMessagePayload,
    ) -> ProviderResult<SignMessageResponse> {
        self.record("signMessage");
        self.sign_message.borrow().clone()
    }

    async fn network(&self) -> ProviderResult<String> {
        self.record("network");
        self.network.borrow().clone()
    }

    async fn on_network_change(
        &self,
        handler: NetworkChangeHandler,
    ) -> Result<Subscription, ProviderError> {
        self.record("onNetworkChange");
        if let Some(err) = self.subscribe_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.network_listeners.add(handler))
    }

    async fn on_account_change(
        &self,
        handler: AccountChangeHandler,
    ) -> Result<Subscription, ProviderError> {
        self.record("onAccountChange");
        if let Some(err) = self.subscribe_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.account_listeners.add(handler))
    }
}

/// Detector whose provider can appear and disappear after construction.
/// Clones share the same slot.
#[derive(Default, Clone)]
pub struct SwitchDetector {
    slot: Rc<RefCell<Option<Rc<FakeProvider>>>>,
}

impl SwitchDetector {
    pub fn install(&self, provider: Rc<FakeProvider>) {
        *self.slot.borrow_mut() = Some(provider);
    }

    pub fn remove(&self) {
        self.slot.borrow_mut().take();
    }
}

impl ProviderDetector for SwitchDetector {
    type Provider = FakeProvider;

    fn ready_state(&self) -> WalletReadyState {
        if self.slot.borrow().is_some() {
            WalletReadyState::Installed
        } else {
            WalletReadyState::NotDetected
        }
    }

    fn provider(&self) -> Option<Rc<FakeProvider>> {
        self.slot.borrow().clone()
    }
}
