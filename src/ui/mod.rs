//! Terminal UI layer for the chat window.
//!
//! Key submodules include:
//! - [`chat_loop`]: terminal setup and the event loop that turns input and
//!   worker replies into [`crate::core::app::AppAction`]s.
//! - [`chrome`]: the frameless window's title bar, buttons, drag and resize.
//! - [`renderer`], [`bubbles`] and [`title`]: view composition and frame output.
//! - [`theme`]: color and style policy.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns the transcript and the request lifecycle.

pub mod bubbles;
pub mod chat_loop;
pub mod chrome;
pub mod renderer;
pub mod theme;
pub mod title;
