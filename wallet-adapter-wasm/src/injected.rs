use std::cell::{Cell, RefCell};

use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use wallet_adapter_base::{
    AccountChangeHandler, AccountInfo, AptosProvider, AptosWalletError, HexEncodedBytes,
    Listeners, NetworkChangeHandler, ProviderError, ProviderResult, SignMessagePayload,
    SignMessageResponse, SignTransactionResponse, Subscription, TransactionOptions,
    TransactionPayload,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::util::{provider_error, reflect_get, to_js};

type EventClosure = Closure<dyn FnMut(JsValue)>;
type Registration = Shared<LocalBoxFuture<'static, Result<(), ProviderError>>>;

fn decode<T: DeserializeOwned>(value: JsValue) -> ProviderResult<T> {
    if value.is_falsy() {
        return Ok(None);
    }

    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|err| ProviderError::new(format!("unexpected provider response: {err}")))
}

async fn call(
    object: &JsValue,
    method: &str,
    args: &[&JsValue],
) -> Result<JsValue, ProviderError> {
    tracing::debug!("provider call: {method}");

    let function: js_sys::Function = reflect_get(object, &JsValue::from_str(method))
        .map_err(|err| ProviderError::new(err.to_string()))?
        .dyn_into()
        .map_err(|_| ProviderError::new(format!("provider has no {method} function")))?;

    let array = js_sys::Array::new();
    for arg in args {
        array.push(arg);
    }

    let returned = function.apply(object, &array).map_err(provider_error)?;

    let result = JsFuture::from(js_sys::Promise::resolve(&returned))
        .await
        .map_err(provider_error)?;

    tracing::debug!("provider result: {method} {result:?}");

    Ok(result)
}

/// The JS closure registered for one event kind, and the registration call
/// every listener of that kind waits on.
#[derive(Default)]
struct EventSlot {
    closure: RefCell<Option<EventClosure>>,
    registration: RefCell<Option<(u64, Registration)>>,
    attempts: Cell<u64>,
}

/// An Aptos provider object injected by a browser extension, e.g.
/// `window.okxwallet.aptos`.
pub struct InjectedAptosProvider {
    object: JsValue,
    network_listeners: Listeners<NetworkChangeHandler>,
    account_listeners: Listeners<AccountChangeHandler>,
    network_changed: EventSlot,
    account_changed: EventSlot,
}

impl InjectedAptosProvider {
    pub fn new(object: JsValue) -> Self {
        Self {
            object,
            network_listeners: Listeners::new(),
            account_listeners: Listeners::new(),
            network_changed: EventSlot::default(),
            account_changed: EventSlot::default(),
        }
    }

    pub fn object(&self) -> &JsValue {
        &self.object
    }

    async fn call(&self, method: &str, args: &[&JsValue]) -> Result<JsValue, ProviderError> {
        call(&self.object, method, args).await
    }

    /// Registers `dispatch` with the provider the first time a listener of
    /// this kind is added. Later listeners share the same JS closure and
    /// wait for the same registration, so a rejected registration fails
    /// every listener that was waiting on it and the next one retries.
    async fn install(
        &self,
        slot: &EventSlot,
        method: &'static str,
        dispatch: impl FnMut(JsValue) + 'static,
    ) -> Result<(), ProviderError> {
        let (attempt, registration) = {
            let mut current = slot.registration.borrow_mut();
            match current.clone() {
                Some(pending) => pending,
                None => {
                    let closure = Closure::wrap(Box::new(dispatch) as Box<dyn FnMut(JsValue)>);
                    let function: JsValue = closure.as_ref().clone();
                    *slot.closure.borrow_mut() = Some(closure);

                    let object = self.object.clone();
                    let registration: Registration = async move {
                        call(&object, method, &[&function]).await?;
                        tracing::info!("listening to {method}");
                        Ok::<_, ProviderError>(())
                    }
                    .boxed_local()
                    .shared();

                    let attempt = slot.attempts.get() + 1;
                    slot.attempts.set(attempt);
                    *current = Some((attempt, registration.clone()));
                    (attempt, registration)
                }
            }
        };

        let result = registration.await;

        if result.is_err() {
            let mut current = slot.registration.borrow_mut();
            if current.as_ref().is_some_and(|(id, _)| *id == attempt) {
                current.take();
                slot.closure.borrow_mut().take();
            }
        }

        result
    }
}

impl std::fmt::Debug for InjectedAptosProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectedAptosProvider")
            .field("object", &self.object)
            .field("network_listeners", &self.network_listeners.len())
            .field("account_listeners", &self.account_listeners.len())
            .finish()
    }
}

#[async_trait::async_trait(?Send)]
impl AptosProvider for InjectedAptosProvider {
    async fn connect(&self) -> ProviderResult<AccountInfo> {
        decode(self.call("connect", &[]).await?)
    }

    async fn account(&self) -> ProviderResult<AccountInfo> {
        decode(self.call("account", &[]).await?)
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.call("disconnect", &[]).await?;
        Ok(())
    }

    async fn sign_transaction(
        &self,
        transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> ProviderResult<SignTransactionResponse> {
        let transaction = to_js(transaction)?;
        let options = options.map(to_js).transpose()?.unwrap_or(JsValue::UNDEFINED);

        let response = self
            .call("signTransaction", &[&transaction, &options])
            .await?;

        if response.is_instance_of::<js_sys::Uint8Array>() {
            let bytes = js_sys::Uint8Array::new(&response).to_vec();
            return Ok(Some(SignTransactionResponse::Signed(bytes)));
        }

        Ok(decode::<AptosWalletError>(response)?.map(SignTransactionResponse::Rejected))
    }

    async fn sign_and_submit_transaction(
        &self,
        transaction: &TransactionPayload,
        options: Option<&TransactionOptions>,
    ) -> ProviderResult<HexEncodedBytes> {
        let transaction = to_js(transaction)?;
        let options = options.map(to_js).transpose()?.unwrap_or(JsValue::UNDEFINED);

        decode(
            self.call("signAndSubmitTransaction", &[&transaction, &options])
                .await?,
        )
    }

    async fn sign_message(
        &self,
        payload: &SignMessagePayload,
    ) -> ProviderResult<SignMessageResponse> {
        let payload = to_js(payload)?;
        decode(self.call("signMessage", &[&payload]).await?)
    }

    async fn network(&self) -> ProviderResult<String> {
        decode(self.call("network", &[]).await?)
    }

    async fn on_network_change(
        &self,
        handler: NetworkChangeHandler,
    ) -> Result<Subscription, ProviderError> {
        let subscription = self.network_listeners.add(handler);

        let listeners = self.network_listeners.clone();
        self.install(&self.network_changed, "onNetworkChange", move |value| {
            let network: serde_json::Value =
                serde_wasm_bindgen::from_value(value).unwrap_or_else(|err| {
                    tracing::warn!("unreadable network change event: {err}");
                    serde_json::Value::Null
                });

            for handler in listeners.snapshot() {
                wasm_bindgen_futures::spawn_local(handler(network.clone()));
            }
        })
        .await?;

        Ok(subscription)
    }

    async fn on_account_change(
        &self,
        handler: AccountChangeHandler,
    ) -> Result<Subscription, ProviderError> {
        let subscription = self.account_listeners.add(handler);

        let listeners = self.account_listeners.clone();
        self.install(&self.account_changed, "onAccountChange", move |value| {
            let account = decode::<AccountInfo>(value).unwrap_or_else(|err| {
                tracing::warn!("unreadable account change event: {err}");
                None
            });

            for handler in listeners.snapshot() {
                wasm_bindgen_futures::spawn_local(handler(account.clone()));
            }
        })
        .await?;

        Ok(subscription)
    }
}
