//! `encodeImage` bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encodeImage, encodeImageWithOptions } from '@matcodec/wasm';
//!
//! encodeImage(mat, '.png', (err, bytes) => {
//!   if (err) throw err;
//!   console.log(`Encoded ${bytes.byteLength} bytes`);
//! });
//!
//! encodeImageWithOptions(mat, 'jpg', { jpegQuality: 80 }, (err, bytes) => { ... });
//! ```

use js_sys::Uint8Array;
use matcodec_core::{EncodeError, EncodeOptions};
use wasm_bindgen::prelude::*;

use crate::callback::{deliver, error, require_callback, type_error};
use crate::types::JsMatrix;

pub(crate) const ARG1_NOT_MATRIX: &str = "Argument 1 must be Matrix.";
pub(crate) const ARG2_NOT_STRING: &str = "Argument 2 must be String.";
pub(crate) const FAIL_TO_ENCODE: &str = "Fail to encode";

/// Encode a matrix and pass the result to `callback(error, bytes)`.
///
/// `extension` is a format token such as "png", ".jpg", "bmp", "tiff" or "webp".
///
/// # Errors
///
/// Throws a `TypeError` synchronously, without calling back, when the
/// callback is missing, `matrix` is not a Matrix, or `extension` is not a
/// string. Re-throws anything the callback throws.
#[wasm_bindgen(js_name = encodeImage)]
pub fn encode_image(matrix: JsValue, extension: JsValue, callback: JsValue) -> Result<(), JsValue> {
    encode_with(&matrix, &extension, &EncodeOptions::default(), &callback)
}

/// Like `encodeImage`, with encoder options.
///
/// `options` is a plain object such as `{ jpegQuality: 80, pngCompression: "best" }`;
/// missing fields take their defaults and `null`/`undefined` means all defaults.
#[wasm_bindgen(js_name = encodeImageWithOptions)]
pub fn encode_image_with_options(
    matrix: JsValue,
    extension: JsValue,
    options: JsValue,
    callback: JsValue,
) -> Result<(), JsValue> {
    let options: EncodeOptions = if options.is_undefined() || options.is_null() {
        EncodeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| type_error(&format!("Invalid encode options: {}", e)))?
    };
    encode_with(&matrix, &extension, &options, &callback)
}

fn encode_with(
    matrix: &JsValue,
    extension: &JsValue,
    options: &EncodeOptions,
    callback: &JsValue,
) -> Result<(), JsValue> {
    let callback = require_callback(callback)?;

    if !matrix.is_object() {
        return Err(type_error(ARG1_NOT_MATRIX));
    }
    let extension = extension
        .as_string()
        .ok_or_else(|| type_error(ARG2_NOT_STRING))?;
    let mat = JsMatrix::read_handle(matrix).ok_or_else(|| type_error(ARG1_NOT_MATRIX))?;

    let (err, bytes) = match matcodec_core::encode_image(&mat, &extension, options) {
        Ok(bytes) => (JsValue::NULL, Uint8Array::from(&bytes[..]).into()),
        Err(e) => (error(&failure_message(&e)), JsValue::NULL),
    };
    deliver(&callback, err, bytes)
}

/// Message carried by the callback error for a failed encode.
///
/// A codec failure without a message of its own reports "Fail to encode".
pub(crate) fn failure_message(err: &EncodeError) -> String {
    match err {
        EncodeError::EncodingFailed(message) if message.trim().is_empty() => {
            FAIL_TO_ENCODE.to_string()
        }
        other => other.to_string(),
    }
}
