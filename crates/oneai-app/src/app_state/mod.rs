//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the workspace and coordinates webviews, the console,
//! broadcasts and persistence.

mod broadcast;
mod commands;
mod core;
mod event_handler;
mod init;
mod persistence;
mod polling;
mod shutdown;
mod title;
mod types;
mod webview_bridge;

pub use core::OneAiApp;
