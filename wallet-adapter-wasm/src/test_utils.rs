use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use js_sys::{Function, Object, Reflect};
use wallet_adapter_base::{AccountChangeHandler, AccountInfo, NetworkChangeHandler};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Plain JS object with one function per `(name, args, body)`. Bodies run
/// with `this` bound to the object.
pub fn stub(methods: &[(&str, &str, &str)]) -> Object {
    let object = Object::new();
    for (name, args, body) in methods {
        set(&object, name, &Function::new_with_args(args, body));
    }
    object
}

pub fn set(target: &JsValue, key: &str, value: &JsValue) {
    Reflect::set(target, &JsValue::from_str(key), value).unwrap();
}

pub fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap()
}

pub fn json(text: &str) -> JsValue {
    js_sys::JSON::parse(text).unwrap()
}

/// Lets tasks queued with `spawn_local` run to completion.
pub async fn settle() {
    for _ in 0..3 {
        JsFuture::from(js_sys::Promise::resolve(&JsValue::NULL))
            .await
            .unwrap();
    }
}

pub fn account_recorder() -> (Rc<RefCell<Vec<Option<AccountInfo>>>>, AccountChangeHandler) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let handler: AccountChangeHandler = Rc::new(move |account| {
        sink.borrow_mut().push(account);
        async {}.boxed_local()
    });
    (seen, handler)
}

pub fn network_recorder() -> (Rc<RefCell<Vec<serde_json::Value>>>, NetworkChangeHandler) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let handler: NetworkChangeHandler = Rc::new(move |network| {
        sink.borrow_mut().push(network);
        async {}.boxed_local()
    });
    (seen, handler)
}
