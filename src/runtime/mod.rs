//! Runtime module - winit/platform integration
//!
//! This module contains the platform code of the viewer:
//! - `app` - ApplicationHandler and window management
//! - `input` - Keyboard event to message mapping
//! - `renderer` - softbuffer surface and font

pub mod app;
pub mod input;
pub mod renderer;

pub use app::{App, FontSource};
