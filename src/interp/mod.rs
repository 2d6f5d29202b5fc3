//! Host interpreter abstraction.
//!
//! The loader never talks to a Tcl/Tk interpreter directly; it goes through
//! [`Interpreter`], which models the three primitives it needs: `load`,
//! `package present` and `package require`.

mod native;

use anyhow::Result;
use std::path::Path;

pub use native::NativeInterpreter;

/// Name the widget registers itself under.
pub const PACKAGE_NAME: &str = "Tkhtml";

/// Dynamic-load capabilities of a host interpreter.
///
/// Implementations are usually bound to the thread that created the
/// interpreter (Tcl interpreters are). Call these methods from that thread;
/// nothing here checks it.
#[cfg_attr(test, mockall::automock)]
pub trait Interpreter {
    /// Load a shared library into the interpreter (`load <path>`).
    fn load(&self, path: &Path) -> Result<()>;

    /// Version of an already loaded package (`package present <name>`).
    fn present(&self, package: &str) -> Result<String>;

    /// Load a package through the interpreter's own search mechanism
    /// (`package require <name>`), returning the version it provided.
    fn require(&self, package: &str) -> Result<String>;
}
