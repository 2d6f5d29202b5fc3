use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::binary::SelectRequest;
use crate::context::TkhtmlContext;
use crate::interp::{Interpreter, NativeInterpreter};
use crate::runtime::{RealRuntime, Runtime};

use super::open_context;

/// Load a Tkhtml binary into this process and report the version it provides.
///
/// With `by_name`, file selection is skipped and the interpreter searches
/// the platform directory on its own.
#[tracing::instrument(skip(runtime, root))]
pub fn load<R: Runtime>(
    runtime: R,
    root: Option<PathBuf>,
    request: &SelectRequest,
    by_name: bool,
) -> Result<()> {
    let context = open_context(runtime, root)?;
    let interp = NativeInterpreter::new(RealRuntime).with_auto_path(vec![context.binary_dir()]);
    let version = load_into(&context, &interp, request, by_name)?;
    println!("Tkhtml {} loaded", version);
    Ok(())
}

fn load_into<R: Runtime, I: Interpreter>(
    context: &TkhtmlContext<R>,
    interp: &I,
    request: &SelectRequest,
    by_name: bool,
) -> Result<String> {
    if by_name {
        return Ok(context.require_by_name(interp)?);
    }

    let binary = context.load_best(interp, request)?;
    info!("Loaded {}", binary.path.display());
    Ok(context.query_loaded_version(interp)?)
}
