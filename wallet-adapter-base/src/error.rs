use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, WalletError>;

/// The provider call an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    Connect,
    Account,
    Disconnect,
    SignTransaction,
    SignAndSubmitTransaction,
    SignMessage,
    Network,
    OnNetworkChange,
    OnAccountChange,
}

impl Operation {
    /// Message used when the provider resolves without a value.
    pub fn empty_response_message(&self) -> &'static str {
        match self {
            Operation::Connect => "Address Info Error",
            Operation::Account => "Account Error",
            Operation::SignMessage => "Sign Message failed",
            Operation::Network => "Network Error",
            _ => "No response",
        }
    }
}

/// A rejection coming out of the injected provider.
///
/// Aptos wallets reject with `{ code, name, message }`; plain string
/// rejections only fill `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            name: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("{wallet} provider is not available")]
    ProviderUnavailable { wallet: String },

    #[error("{wallet} {}", .operation.empty_response_message())]
    EmptyResponse { wallet: String, operation: Operation },

    #[error("{wallet} Invalid signMessage Payload")]
    InvalidSignMessagePayload { wallet: String },

    #[error("{wallet} {operation} failed: {source}")]
    Provider {
        wallet: String,
        operation: Operation,
        #[source]
        source: ProviderError,
    },
}

impl WalletError {
    /// The underlying provider rejection, if there was one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            WalletError::Provider { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            WalletError::EmptyResponse { operation, .. }
            | WalletError::Provider { operation, .. } => Some(*operation),
            WalletError::InvalidSignMessagePayload { .. } => Some(Operation::SignMessage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_messages_carry_the_wallet_name() {
        let err = WalletError::EmptyResponse {
            wallet: "OKX Wallet".into(),
            operation: Operation::Connect,
        };
        assert_eq!(err.to_string(), "OKX Wallet Address Info Error");

        let err = WalletError::EmptyResponse {
            wallet: "OKX Wallet".into(),
            operation: Operation::SignAndSubmitTransaction,
        };
        assert_eq!(err.to_string(), "OKX Wallet No response");
    }

    #[test]
    fn provider_error_keeps_its_cause() {
        let err = WalletError::Provider {
            wallet: "OKX Wallet".into(),
            operation: Operation::SignMessage,
            source: ProviderError::new("User rejected the request").with_code(4001),
        };

        assert_eq!(
            err.to_string(),
            "OKX Wallet signMessage failed: User rejected the request"
        );
        assert_eq!(err.provider_error().and_then(|e| e.code), Some(4001));
        assert_eq!(err.operation(), Some(Operation::SignMessage));
    }

    #[test]
    fn provider_error_deserializes_partial_objects() {
        let err: ProviderError =
            serde_json::from_str(r#"{"code":4100,"message":"Unauthorized"}"#).unwrap();
        assert_eq!(err.code, Some(4100));
        assert_eq!(err.name, None);
        assert_eq!(err.message, "Unauthorized");
    }
}
