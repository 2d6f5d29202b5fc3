use anyhow::Result;
use std::path::PathBuf;

use crate::binary::{BinaryDescriptor, SelectRequest};
use crate::runtime::Runtime;

use super::open_context;

/// Print the binary a request resolves to
#[tracing::instrument(skip(runtime, root))]
pub fn resolve<R: Runtime>(
    runtime: R,
    root: Option<PathBuf>,
    request: &SelectRequest,
    json: bool,
) -> Result<()> {
    let context = open_context(runtime, root)?;
    let binary = context.resolve_binary(request)?;
    println!("{}", render(&binary, json)?);
    Ok(())
}

pub(crate) fn render(binary: &BinaryDescriptor, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(binary)?);
    }
    Ok(format!(
        "path: {}\nversion: {}\nexperimental: {}",
        binary.path.display(),
        binary.version,
        binary.experimental
    ))
}
