#![forbid(unsafe_code)]

//! Host adapters for Leafkit.
//!
//! The embedding environment (JS) owns event dispatch. This crate turns what
//! it hands over into checked `leafkit-core` values:
//! - [`input`]: a JSON schema for change events serialized by the host,
//! - [`leaf`]: JSON exchange of leaf records,
//! - `wasm` (only on `wasm32`): direct narrowing of live `web_sys::Event`s,
//!   exported to JS via `wasm-bindgen`.

pub mod input;
pub mod leaf;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{DomInput, DomTarget, narrow_dom_event, read_change_number, read_change_value};

pub use input::{
    ChangeEventJson, ChangeInputError, HostTarget, InputSnapshot, decode_change_event,
    encode_change_event,
};
pub use leaf::{decode_leaf, decode_leaves, encode_leaf};
