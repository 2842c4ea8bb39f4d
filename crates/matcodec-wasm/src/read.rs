//! `readImage` binding.
//!
//! Accepts `(width, height, callback)`, `(path, callback)` or
//! `(buffer, callback)` and calls `callback(error, matrix)`.
//!
//! # Example
//!
//! ```typescript
//! import { readImage } from '@matcodec/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! readImage(bytes, (err, mat) => {
//!   if (err) throw err;
//!   console.log(`Decoded ${mat.width}x${mat.height} ${mat.depth}x${mat.channels}`);
//! });
//! ```

use js_sys::{ArrayBuffer, Uint8Array};
use matcodec_core::{DecodeError, Matrix, ReadOptions, Source};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

use crate::callback::{deliver, error, require_callback};
use crate::types::JsMatrix;

/// Read an image and pass the result to `callback(error, matrix)`.
///
/// The callback is the second argument, or the third when the first two are
/// dimensions. Sources:
///
/// * two numbers: a blank `width` x `height` matrix of 64-bit floats
/// * a string: a file path (an unreadable file yields an empty matrix, not an error)
/// * a `Uint8Array` or `ArrayBuffer`: encoded image bytes
///
/// # Errors
///
/// Throws a `TypeError` synchronously when no callback is given, and
/// re-throws anything the callback throws.
#[wasm_bindgen(js_name = readImage)]
pub fn read_image(source: JsValue, second: JsValue, third: JsValue) -> Result<(), JsValue> {
    let (callback, height) = if second.is_function() {
        (require_callback(&second)?, JsValue::UNDEFINED)
    } else {
        (require_callback(&third)?, second)
    };

    let result = match classify(&source, &height) {
        Some(src) => matcodec_core::read_image(src, &ReadOptions::default()),
        None => {
            console::warn_1(&JsValue::from_str(
                "matcodec: readImage source is not dimensions, a path or a buffer; returning empty matrix",
            ));
            Ok(Matrix::empty())
        }
    };

    let (err, value) = match ReadOutcome::from_result(result) {
        ReadOutcome::Loaded(mat) => (JsValue::NULL, JsMatrix::from_matrix(mat).into()),
        ReadOutcome::FailedWithHandle(message) => (error(&message), JsMatrix::new().into()),
        ReadOutcome::Failed(message) => (error(&message), JsValue::NULL),
    };
    deliver(&callback, err, value)
}

/// Work out what the first argument(s) name.
fn classify(source: &JsValue, height: &JsValue) -> Option<Source> {
    if let (Some(w), Some(h)) = (source.as_f64(), height.as_f64()) {
        return Some(Source::Dimensions {
            width: to_uint32(w),
            height: to_uint32(h),
        });
    }
    if let Some(path) = source.as_string() {
        return Some(Source::Path(path.into()));
    }
    if let Some(bytes) = source.dyn_ref::<Uint8Array>() {
        return Some(Source::Bytes(bytes.to_vec()));
    }
    if let Some(buffer) = source.dyn_ref::<ArrayBuffer>() {
        return Some(Source::Bytes(Uint8Array::new(buffer).to_vec()));
    }
    None
}

/// JavaScript `ToUint32`: truncate, wrap modulo 2^32, non-finite becomes 0.
pub(crate) fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// What the callback receives for a read result.
#[derive(Debug, PartialEq)]
pub(crate) enum ReadOutcome {
    Loaded(Matrix),
    /// Error, with the empty matrix handle still delivered.
    FailedWithHandle(String),
    /// Error, with a null handle.
    Failed(String),
}

impl ReadOutcome {
    pub(crate) fn from_result(result: Result<Matrix, DecodeError>) -> Self {
        match result {
            Ok(mat) => ReadOutcome::Loaded(mat),
            Err(e) if e.yields_matrix() => ReadOutcome::FailedWithHandle(e.to_string()),
            Err(e) => ReadOutcome::Failed(e.to_string()),
        }
    }
}
