//! matcodec WASM - WebAssembly bindings for matcodec
//!
//! This crate exposes `readImage` and `encodeImage` from matcodec-core to
//! JavaScript, with Node-style `(error, value)` callbacks invoked inline.
//!
//! # Module Structure
//!
//! - `types` - the `Matrix` class
//! - `read` - `readImage`
//! - `encode` - `encodeImage`, `encodeImageWithOptions`
//! - `callback` - callback validation and delivery
//!
//! # Usage
//!
//! ```typescript
//! import init, { readImage, encodeImage, version } from '@matcodec/wasm';
//!
//! await init();
//! console.log(`matcodec ${version()}`);
//!
//! readImage(new Uint8Array(await file.arrayBuffer()), (err, mat) => {
//!   if (err) throw err;
//!   encodeImage(mat, '.jpg', (err, jpeg) => { ... });
//! });
//! ```

use wasm_bindgen::prelude::*;

mod callback;
mod encode;
mod read;
mod types;

pub use encode::{encode_image, encode_image_with_options};
pub use read::read_image;
pub use types::JsMatrix;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Dotted "major.minor" version of the wrapped codec library.
#[wasm_bindgen]
pub fn version() -> String {
    matcodec_core::version().to_string()
}
