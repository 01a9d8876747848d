use std::rc::Rc;

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wallet_adapter_base::{
    AccountChangeCallback, AccountChangeHandler, AccountInfo, AdapterPlugin, AptosProvider,
    DeeplinkData, NetworkChangeCallback, NetworkChangeHandler, NetworkInfo, Operation,
    PendingTransaction, ProviderDetector, ProviderResult, SignMessagePayload, SignMessageResponse,
    SignTransactionResponse, Subscription, TransactionOptions, TransactionPayload, WalletError,
    WalletReadyState,
};
use wallet_adapter_wasm::WindowDetector;

mod deeplink;
mod network;
#[cfg(test)]
mod test_utils;

pub use deeplink::{deeplink, encode_uri_component};
pub use network::chain_id;

pub const OKX_WALLET_NAME: &str = "OKX Wallet";
pub const OKX_WALLET_URL: &str = "https://okx.com/web3/";
pub const OKX_WALLET_ICON: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAADAAAAAwCAYAAABXAvmHAAAACXBIWXMAAAsTAAALEwEAmpwYAAAAAXNSR0IArs4c6QAAAARnQU1BAACxjwv8YQUAAAJDSURBVHgB7Zq9jtpAEMfHlhEgQLiioXEkoAGECwoKxMcTRHmC5E3IoyRPkPAEkI7unJYmTgEFTYwA8a3NTKScLnCHN6c9r1e3P2llWQy7M/s1Gv1twCP0ej37dDq9x+Zut1t3t9vZjDEHIiSRSPg4ZpDL5fxkMvn1cDh8m0wmfugfO53OoFQq/crn8wxfY9EymQyrVCqMfHvScZx1p9ls3pFxXBy/bKlUipGPrVbLuQqAfsCliq3zl0H84zwtjQrOw4Mt1W63P5LvBm2d+Xz+YzqdgkqUy+WgWCy+Mc/nc282m4FqLBYL+3g8fjDxenq72WxANZbLJeA13zDX67UDioL5ybXwafMYu64Ltn3bdDweQ5R97fd7GyhBQMipx4POeEDHIu2LfDdBIGGz+hJ9CQ1ABjoA2egAZPM6AgiCAEQhsi/C4jHyPA/6/f5NG3Ks2+3CYDC4aTccDrn6ojG54MnEvG00GoVmWLIRNZ7wTCwDHYBsdACy0QHIhiuRETxlICWpMMhGZHmqS8qH6JLyGegAZKMDkI0uKf8X4SWlaZo+Pp1bRrwlJU8ZKLIvUjKh0WiQ3sRUbNVq9c5Ebew7KEo2m/1p4jJ4qAmDaqDQBzj5XyiAT4VCQezJigAU+IDU+z8vJFnGWeC+bKQV/5VZ71FV6L7PA3gg3tXrdQ+DgLhC+75Wq3no69P3MC0NFQpx2lL04Ql9gHK1bRDjsSBIvScBnDTk1WrlGIZBorIDEYJj+rhdgnQ67VmWRe0zlplXl81vcyEt0rSoYDUAAAAASUVORK5CYII=";

/// Property path of the provider the OKX extension injects.
pub const OKX_PROVIDER_PATH: [&str; 2] = ["okxwallet", "aptos"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OkxWalletOptions {
    /// Reject sign message payloads without a nonce instead of passing them on.
    pub strict_sign_message: bool,
}

fn wallet_name() -> String {
    OKX_WALLET_NAME.to_string()
}

fn expect_response<T>(
    operation: Operation,
    result: ProviderResult<T>,
) -> wallet_adapter_base::Result<T> {
    result
        .map_err(|source| WalletError::Provider {
            wallet: wallet_name(),
            operation,
            source,
        })?
        .ok_or_else(|| WalletError::EmptyResponse {
            wallet: wallet_name(),
            operation,
        })
}

/// Network change events carry whatever the extension sends; strings are
/// passed on as they are, anything else as its JSON text.
fn network_name(network: Value) -> String {
    match network {
        Value::String(name) => name,
        other => other.to_string(),
    }
}

pub struct OkxWallet<D: ProviderDetector> {
    detector: Rc<D>,
    options: OkxWalletOptions,
}

impl<D: ProviderDetector> Clone for OkxWallet<D> {
    fn clone(&self) -> Self {
        Self {
            detector: self.detector.clone(),
            options: self.options.clone(),
        }
    }
}

impl<D: ProviderDetector> std::fmt::Debug for OkxWallet<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OkxWallet")
            .field("ready_state", &self.detector.ready_state())
            .field("options", &self.options)
            .finish()
    }
}

impl OkxWallet<WindowDetector> {
    /// Adapter over `window.okxwallet.aptos`.
    pub fn from_window() -> Self {
        Self::new(WindowDetector::new(OKX_PROVIDER_PATH))
    }
}

impl<D: ProviderDetector + 'static> OkxWallet<D> {
    pub fn new(detector: D) -> Self {
        Self::with_options(detector, OkxWalletOptions::default())
    }

    pub fn with_options(detector: D, options: OkxWalletOptions) -> Self {
        Self {
            detector: Rc::new(detector),
            options,
        }
    }

    pub fn options(&self) -> &OkxWalletOptions {
        &self.options
    }

    fn provider(&self) -> wallet_adapter_base::Result<Rc<D::Provider>> {
        self.detector
            .provider()
            .ok_or_else(|| WalletError::ProviderUnavailable {
                wallet: wallet_name(),
            })
    }
}

#[async_trait::async_trait(?Send)]
impl<D: ProviderDetector + 'static> AdapterPlugin for OkxWallet<D> {
    fn name(&self) -> String {
        OKX_WALLET_NAME.into()
    }

    fn url(&self) -> String {
        OKX_WALLET_URL.into()
    }

    fn icon(&self) -> String {
        OKX_WALLET_ICON.into()
    }

    fn ready_state(&self) -> WalletReadyState {
        self.detector.ready_state()
    }

    fn deeplink_provider(&self, data: &DeeplinkData) -> Option<String> {
        Some(deeplink(&data.url))
    }

    async fn connect(&self) -> wallet_adapter_base::Result<AccountInfo> {
        tracing::info!("{OKX_WALLET_NAME} connect");

        let provider = self.provider()?;
        expect_response(Operation::Connect, provider.connect().await)
    }

    async fn account(&self) -> wallet_adapter_base::Result<AccountInfo> {
        let provider = self.provider()?;
        expect_response(Operation::Account, provider.account().await)
    }

    async fn disconnect(&self) -> wallet_adapter_base::Result<()> {
        tracing::info!("{OKX_WALLET_NAME} disconnect");

        let Some(provider) = self.detector.provider() else {
            tracing::debug!("{OKX_WALLET_NAME} not detected, nothing to disconnect");
            return Ok(());
        };

        provider
            .disconnect()
            .await
            .map_err(|source| WalletError::Provider {
                wallet: wallet_name(),
                operation: Operation::Disconnect,
                source,
            })
    }

    async fn sign_and_submit_transaction(
        &self,
        transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> wallet_adapter_base::Result<PendingTransaction> {
        let provider = self.provider()?;

        let hash = expect_response(
            Operation::SignAndSubmitTransaction,
            provider
                .sign_and_submit_transaction(transaction, options)
                .await,
        )?;

        tracing::debug!("submitted transaction {hash}");

        Ok(PendingTransaction { hash })
    }

    async fn sign_transaction(
        &self,
        transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> wallet_adapter_base::Result<SignTransactionResponse> {
        let provider = self.provider()?;
        expect_response(
            Operation::SignTransaction,
            provider.sign_transaction(transaction, options).await,
        )
    }

    async fn sign_message(
        &self,
        message: &SignMessagePayload,
    ) -> wallet_adapter_base::Result<SignMessageResponse> {
        if !message.has_nonce() {
            if self.options.strict_sign_message {
                return Err(WalletError::InvalidSignMessagePayload {
                    wallet: wallet_name(),
                });
            }
            tracing::warn!("{OKX_WALLET_NAME} Invalid signMessage Payload, missing nonce");
        }

        let provider = self.provider()?;
        expect_response(Operation::SignMessage, provider.sign_message(message).await)
    }

    async fn network(&self) -> wallet_adapter_base::Result<NetworkInfo> {
        let provider = self.provider()?;

        let name = expect_response(Operation::Network, provider.network().await)?.to_lowercase();
        let chain_id = chain_id(&name);

        Ok(NetworkInfo {
            name,
            chain_id,
            url: None,
        })
    }

    async fn on_network_change(
        &self,
        callback: NetworkChangeCallback,
    ) -> wallet_adapter_base::Result<Subscription> {
        let provider = self.provider()?;

        let callback: Rc<dyn Fn(NetworkInfo)> = Rc::from(callback);
        let handler: NetworkChangeHandler = Rc::new(move |network: Value| {
            let callback = callback.clone();
            async move {
                callback(NetworkInfo {
                    name: network_name(network),
                    chain_id: None,
                    url: None,
                });
            }
            .boxed_local()
        });

        provider
            .on_network_change(handler)
            .await
            .map_err(|source| WalletError::Provider {
                wallet: wallet_name(),
                operation: Operation::OnNetworkChange,
                source,
            })
    }

    async fn on_account_change(
        &self,
        callback: AccountChangeCallback,
    ) -> wallet_adapter_base::Result<Subscription> {
        let provider = self.provider()?;

        let callback: Rc<dyn Fn(AccountInfo)> = Rc::from(callback);
        let self_clone = self.clone();
        let handler: AccountChangeHandler = Rc::new(move |account: Option<AccountInfo>| {
            let callback = callback.clone();
            let wallet = self_clone.clone();
            async move {
                match account {
                    Some(account) if account.has_public_key() => callback(account),
                    _ => match wallet.connect().await {
                        Ok(account) => callback(account),
                        Err(err) => tracing::warn!(
                            "{OKX_WALLET_NAME} reconnect after account change failed: {err}"
                        ),
                    },
                }
            }
            .boxed_local()
        });

        provider
            .on_account_change(handler)
            .await
            .map_err(|source| WalletError::Provider {
                wallet: wallet_name(),
                operation: Operation::OnAccountChange,
                source,
            })
    }
}
