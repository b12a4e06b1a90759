//! Personal portfolio: a Yew single-page site and the axum server that hosts it.
//!
//! `content`, `motion`, `trail`, `scene` and `chat` are target-independent and
//! shared by both halves; `frontend` only exists on `wasm32`, `backend` only on
//! native targets.

pub mod chat;
pub mod content;
pub mod motion;
pub mod scene;
pub mod trail;

#[cfg(not(target_arch = "wasm32"))]
pub mod backend;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
