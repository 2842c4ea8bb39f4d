//! The `Matrix` class handed to JavaScript.
//!
//! A `Matrix` is created empty from JS (`new Matrix()`), populated by
//! `readImage` and read back by `encodeImage`.

use js_sys::{Function, Reflect, Uint8Array};
use matcodec_core::{Depth, Matrix, PixelType};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// A pixel matrix owned by WASM memory.
///
/// The pixel buffer stays in WASM memory; `data()` copies it out as a
/// `Uint8Array`. Call `free()` to release it early, otherwise wasm-bindgen's
/// finalizer does.
#[wasm_bindgen(js_name = Matrix)]
pub struct JsMatrix {
    inner: Matrix,
}

#[wasm_bindgen(js_class = Matrix)]
impl JsMatrix {
    /// Create an empty matrix.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsMatrix {
        JsMatrix {
            inner: Matrix::empty(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 {
        self.inner.rows()
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 {
        self.inner.cols()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Channels per pixel (1 to 4).
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels()
    }

    /// Sample depth: "u8", "u16", "f32" or "f64".
    #[wasm_bindgen(getter)]
    pub fn depth(&self) -> String {
        self.inner.depth().as_str().to_string()
    }

    /// True when the matrix holds no pixels.
    #[wasm_bindgen(getter)]
    pub fn empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.inner.data().len()
    }

    /// Raw samples as a Uint8Array (row-major, channels interleaved, native byte order).
    pub fn data(&self) -> Vec<u8> {
        self.inner.data().to_vec()
    }
}

impl Default for JsMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl JsMatrix {
    pub(crate) fn from_matrix(inner: Matrix) -> Self {
        Self { inner }
    }

    #[allow(dead_code)] // used by native tests
    pub(crate) fn matrix(&self) -> &Matrix {
        &self.inner
    }

    /// Rebuild a matrix from a JS value that behaves like a `Matrix` handle.
    ///
    /// `encodeImage` takes its matrix as a plain `JsValue` so that a wrong
    /// argument becomes our own `TypeError` instead of wasm-bindgen's class
    /// assertion. wasm-bindgen offers no borrow of an exported struct from a
    /// `JsValue` (`TryFromJsValue` moves the value out and detaches the JS
    /// handle), so the handle is read back through its getters and `data()`.
    /// This costs one copy of the pixel buffer per encode and accepts any
    /// object exposing the same getters. Returns `None` for anything else.
    pub(crate) fn read_handle(value: &JsValue) -> Option<Matrix> {
        if !value.is_object() {
            return None;
        }
        let get = |key: &str| Reflect::get(value, &JsValue::from_str(key)).ok();

        let rows = get("rows")?.as_f64()? as u32;
        let cols = get("cols")?.as_f64()? as u32;
        let channels = get("channels")?.as_f64()? as u8;
        let depth = depth_from_str(&get("depth")?.as_string()?)?;

        let data_fn: Function = get("data")?.dyn_into().ok()?;
        let data = data_fn.call0(value).ok()?.dyn_into::<Uint8Array>().ok()?.to_vec();

        Matrix::from_raw(rows, cols, PixelType::new(depth, channels), data)
    }
}

/// Parse the depth name reported by the `depth` getter.
pub(crate) fn depth_from_str(name: &str) -> Option<Depth> {
    match name {
        "u8" => Some(Depth::U8),
        "u16" => Some(Depth::U16),
        "f32" => Some(Depth::F32),
        "f64" => Some(Depth::F64),
        _ => None,
    }
}
