//! minichat is a small, frameless chat window for OpenAI-compatible
//! chat completion APIs, drawn inside a full-screen terminal.
//!
//! The crate is organized around a few collaborating layers:
//! - [`core`] owns the transcript, configuration, the completion client and
//!   the one-shot background worker that keeps the UI responsive while a
//!   request is in flight.
//! - [`ui`] draws the floating window (custom chrome, message bubbles,
//!   input box) and runs the interactive event loop.
//! - [`api`] defines the chat completion payloads sent over the wire.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which loads configuration and dispatches into
//! [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
