//! modeled on the `AdapterPlugin` shape of https://github.com/aptos-labs/aptos-wallet-adapter/tree/main/packages/wallet-adapter-core

use crate::subscription::Subscription;
use crate::types::{
    AccountInfo, DeeplinkData, NetworkInfo, PendingTransaction, SignMessagePayload,
    SignMessageResponse, SignTransactionResponse, TransactionOptions, TransactionPayload,
};

/**
 * A wallet's readiness describes a series of states that the wallet can be in,
 * depending on what kind of wallet it is. An installable wallet (eg. a browser
 * extension like OKX Wallet) might be `Installed` if we've found its API
 * in the global scope, or `NotDetected` otherwise. A loadable, zero-install
 * runtime might simply signal that it's `Loadable`. Use this metadata to
 * personalize the wallet list for each user (eg. to show their installed
 * wallets first).
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum WalletReadyState {
    /**
     * User-installable wallets can typically be detected by scanning for an API
     * that they've injected into the global context. If such an API is present,
     * we consider the wallet to have been installed.
     */
    Installed,
    NotDetected,
    /**
     * Loadable wallets are always available to you. Since you can load them at
     * any time, it's meaningless to say that they have been detected.
     */
    Loadable,
    /**
     * If a wallet is not supported on a given platform (eg. server-rendering, or
     * mobile) then it will stay in the `Unsupported` state.
     */
    Unsupported,
}

pub type NetworkChangeCallback = Box<dyn Fn(NetworkInfo)>;
pub type AccountChangeCallback = Box<dyn Fn(AccountInfo)>;

#[async_trait::async_trait(?Send)]
pub trait AdapterPlugin {
    fn name(&self) -> String;
    fn url(&self) -> String;
    fn icon(&self) -> String;
    fn ready_state(&self) -> WalletReadyState;

    /// Link opening the wallet's mobile app on the given dapp url.
    fn deeplink_provider(&self, _data: &DeeplinkData) -> Option<String> {
        None
    }

    async fn connect(&self) -> crate::Result<AccountInfo>;
    async fn account(&self) -> crate::Result<AccountInfo>;
    async fn disconnect(&self) -> crate::Result<()>;

    async fn sign_and_submit_transaction(
        &self,
        transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> crate::Result<PendingTransaction>;

    async fn sign_transaction(
        &self,
        transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> crate::Result<SignTransactionResponse>;

    async fn sign_message(&self, message: &SignMessagePayload)
        -> crate::Result<SignMessageResponse>;

    async fn network(&self) -> crate::Result<NetworkInfo>;

    async fn on_network_change(&self, callback: NetworkChangeCallback)
        -> crate::Result<Subscription>;

    async fn on_account_change(&self, callback: AccountChangeCallback)
        -> crate::Result<Subscription>;
}
