//! Clipdump - diagnostic dump of every format on the clipboard
//!
//! This library exports the core modules for testing and potential reuse.

pub mod classify;
pub mod clipboard;
pub mod config;
pub mod dump;
pub mod error;
pub mod formats;
pub mod image;
pub mod logging;
pub mod models;
pub mod render;
