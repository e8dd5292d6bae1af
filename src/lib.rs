//! codearea - hex/binary code area widget core
//!
//! This crate provides the state, layout, command handling and rendering
//! of a hex editor component, implementing the Elm Architecture pattern:
//! input arrives as a [`Msg`], [`update`](update::update) applies it to a
//! [`CodeArea`] and returns a [`Cmd`] telling the host what to repaint.

pub mod cli;
pub mod clipboard;
pub mod code_type;
pub mod codec;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod data;
pub mod error;
pub mod events;
pub mod handler;
pub mod layout;
pub mod messages;
pub mod model;
pub mod scroll;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::{Cmd, Damage};
pub use config::CodeAreaConfig;
pub use error::{CodeAreaError, Result};
pub use handler::{CommandHandler, DefaultCommandHandler};
pub use messages::Msg;
pub use model::CodeArea;
pub use theme::{ColorProfile, Theme};
pub use view::{CodeAreaPainter, Painter};
