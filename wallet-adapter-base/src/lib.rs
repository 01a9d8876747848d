mod adapter;
mod error;
mod provider;
mod subscription;
mod types;

pub use adapter::AccountChangeCallback;
pub use adapter::AdapterPlugin;
pub use adapter::NetworkChangeCallback;
pub use adapter::WalletReadyState;
pub use error::{Operation, ProviderError, Result, WalletError};
pub use provider::{
    AccountChangeHandler, AptosProvider, NetworkChangeHandler, ProviderDetector, ProviderResult,
    StaticDetector,
};
pub use subscription::{Listeners, Subscription};
pub use types::{
    AccountInfo, AptosWalletError, DeeplinkData, HexEncodedBytes, NetworkInfo,
    PendingTransaction, PublicKey, SignMessagePayload, SignMessageResponse, Signature,
    SignTransactionResponse, TransactionOptions, TransactionPayload,
};
