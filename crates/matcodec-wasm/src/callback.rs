//! Node-style callback delivery: `callback(error, value)`.
//!
//! The callback runs inline before the binding returns. If it throws, the
//! exception is logged as fatal and re-thrown to the caller.

use js_sys::{Function, TypeError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

pub(crate) const CALLBACK_REQUIRED: &str = "Callback must be a function.";

/// Return `value` as a function, or a `TypeError` to throw synchronously.
pub(crate) fn require_callback(value: &JsValue) -> Result<Function, JsValue> {
    value
        .dyn_ref::<Function>()
        .cloned()
        .ok_or_else(|| type_error(CALLBACK_REQUIRED))
}

/// Invoke `callback(error, value)` with the global object as `this`.
pub(crate) fn deliver(callback: &Function, error: JsValue, value: JsValue) -> Result<(), JsValue> {
    let this: JsValue = js_sys::global().into();
    callback
        .call2(&this, &error, &value)
        .map(|_| ())
        .map_err(|exception| {
            console::error_2(
                &JsValue::from_str("matcodec: fatal exception thrown from callback"),
                &exception,
            );
            exception
        })
}

pub(crate) fn type_error(message: &str) -> JsValue {
    TypeError::new(message).into()
}

pub(crate) fn error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}
