//! Data types of the Aptos wallet adapter plugin contract.
//! Field names follow the camelCase shapes the injected providers speak.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One key for single-signer accounts, several for multi-ed25519 accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublicKey {
    Single(String),
    Multi(Vec<String>),
}

impl PublicKey {
    /// Whether the provider actually handed over a key. An empty string is
    /// no key; a key list counts even when it is empty, as providers send
    /// `[]` for accounts whose keys are not exposed yet.
    pub fn is_present(&self) -> bool {
        match self {
            PublicKey::Single(key) => !key.is_empty(),
            PublicKey::Multi(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: String,
    #[serde(default)]
    pub public_key: Option<PublicKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_keys_required: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ans_name: Option<String>,
}

impl AccountInfo {
    pub fn has_public_key(&self) -> bool {
        self.public_key.as_ref().is_some_and(PublicKey::is_present)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub name: String,
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessagePayload {
    /// Ask the wallet to include the account address in the signed message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<bool>,
    /// Ask the wallet to include the dapp domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<bool>,
    /// Ask the wallet to include the current chain id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<bool>,
    pub message: String,
    pub nonce: String,
}

impl SignMessagePayload {
    pub fn new(message: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            nonce: nonce.into(),
            ..Default::default()
        }
    }

    pub fn has_nonce(&self) -> bool {
        !self.nonce.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Signature {
    Single(String),
    Multi(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageResponse {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub application: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    pub full_message: String,
    pub message: String,
    pub nonce: String,
    pub prefix: String,
    pub signature: Signature,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitmap: Option<Vec<u8>>,
}

/// Transaction payload handed to the provider untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionPayload(pub Value);

impl TransactionPayload {
    pub fn entry_function(
        function: impl Into<String>,
        type_arguments: Vec<String>,
        arguments: Vec<Value>,
    ) -> Self {
        Self(json!({
            "type": "entry_function_payload",
            "function": function.into(),
            "type_arguments": type_arguments,
            "arguments": arguments,
        }))
    }
}

impl From<Value> for TransactionPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Free-form options forwarded with a transaction (gas limits, expiry, ...).
pub type TransactionOptions = Value;

/// `0x` prefixed hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexEncodedBytes(pub String);

impl HexEncodedBytes {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HexEncodedBytes {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for HexEncodedBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: HexEncodedBytes,
}

/// Error envelope some providers resolve with instead of rejecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AptosWalletError {
    pub code: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignTransactionResponse {
    Signed(Vec<u8>),
    Rejected(AptosWalletError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeeplinkData {
    pub url: String,
}

impl DeeplinkData {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
