//! Background music activation.
//!
//! Browsers refuse `play()` until the user has interacted with the page. The
//! controller here tries autoplay once, and when that is refused it falls back
//! to document-wide interaction capture plus an optional "enable music"
//! prompt. The browser side lives in [`web`]; everything else is plain Rust
//! and runs without a DOM.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod controller;
mod error;
mod surfaces;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::*;
pub use error::PlaybackError;
pub use surfaces::*;
