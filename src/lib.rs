//! Locate and load the prebuilt Tkhtml widget binary for the host platform.
//!
//! Binaries are laid out as `<root>/<platform tag>/libTkhtml<major>.<minor>[exp].<ext>`.
//! [`context::TkhtmlContext`] resolves the platform directory once, lists it
//! lazily, selects a binary for a [`binary::SelectRequest`] and hands it to an
//! [`interp::Interpreter`].

pub mod binary;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod interp;
pub mod loader;
pub mod platform;
pub mod runtime;

pub use binary::{BinaryDescriptor, ExperimentalMode, SelectRequest};
pub use context::TkhtmlContext;
pub use error::TkhtmlError;
