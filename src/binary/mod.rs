//! Tkhtml binary discovery and selection
//!
//! Binaries live in one directory per platform and encode their version and
//! release channel in the file name. This module lists that directory and
//! picks one file for a request.

mod catalog;
pub mod naming;
mod selector;

pub use catalog::{BinaryCatalog, BinaryDescriptor};
pub use selector::{BinarySelector, ExperimentalMode, SelectRequest};
