use std::cell::RefCell;
use std::rc::Rc;

use wallet_adapter_base::{ProviderDetector, WalletReadyState};
use wasm_bindgen::JsValue;

use crate::injected::InjectedAptosProvider;
use crate::util::reflect_get;

fn window() -> Option<JsValue> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().map(JsValue::from)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

fn lookup(target: &JsValue, key: &str) -> Option<JsValue> {
    reflect_get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Finds a provider under a property path of `window`, e.g.
/// `["okxwallet", "aptos"]`. The first segment is the extension's binding
/// and decides whether the wallet counts as installed.
#[derive(Debug)]
pub struct WindowDetector {
    path: Vec<String>,
    provider: RefCell<Option<Rc<InjectedAptosProvider>>>,
}

impl WindowDetector {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            provider: RefCell::new(None),
        }
    }

    fn resolve(&self) -> Option<JsValue> {
        let mut target = window()?;
        for key in &self.path {
            target = lookup(&target, key)?;
        }
        Some(target)
    }
}

impl ProviderDetector for WindowDetector {
    type Provider = InjectedAptosProvider;

    fn ready_state(&self) -> WalletReadyState {
        let Some(window) = window() else {
            return WalletReadyState::Unsupported;
        };

        match self.path.first() {
            Some(root) if lookup(&window, root).is_some() => WalletReadyState::Installed,
            _ => WalletReadyState::NotDetected,
        }
    }

    fn provider(&self) -> Option<Rc<InjectedAptosProvider>> {
        let Some(object) = self.resolve() else {
            self.provider.borrow_mut().take();
            return None;
        };

        let mut cached = self.provider.borrow_mut();

        // keep the same wrapper while the extension keeps the same object,
        // so its registered event closures stay alive
        if let Some(provider) = cached.as_ref() {
            if js_sys::Object::is(provider.object(), &object) {
                return Some(provider.clone());
            }
        }

        tracing::debug!("provider detected at window.{}", self.path.join("."));

        let provider = Rc::new(InjectedAptosProvider::new(object));
        *cached = Some(provider.clone());
        Some(provider)
    }
}
