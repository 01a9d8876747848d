use anyhow::{anyhow, Result};
use serde::Serialize;
use wallet_adapter_base::ProviderError;
use wasm_bindgen::JsValue;

pub fn reflect_get(target: &JsValue, key: &JsValue) -> Result<JsValue> {
    let result = js_sys::Reflect::get(target, key).map_err(|e| anyhow!("{:?}", e))?;
    Ok(result)
}

/// Plain JS objects instead of `Map`s, which is what providers expect.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, ProviderError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| ProviderError::new(format!("could not convert argument: {err}")))
}

/// Turns whatever a provider rejected with into a [`ProviderError`].
pub fn provider_error(err: JsValue) -> ProviderError {
    if let Some(message) = err.as_string() {
        return ProviderError::new(message);
    }

    if let Ok(error) = serde_wasm_bindgen::from_value::<ProviderError>(err.clone()) {
        return error;
    }

    // `Error` instances keep `message` on the prototype chain
    if let Some(message) = reflect_get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
    {
        return ProviderError::new(message);
    }

    ProviderError::new(format!("{err:?}"))
}
