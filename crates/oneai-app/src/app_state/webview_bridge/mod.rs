//! Bridge between the workspace and the webviews that show it.
//!
//! Keeps one webview per visible tab, positions them from the layout
//! engine, and services the automation script queue.

mod bounds;
mod lifecycle;
