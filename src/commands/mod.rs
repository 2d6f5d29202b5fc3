//! CLI command implementations.

use anyhow::Result;
use std::path::PathBuf;

use crate::{config::Config, context::TkhtmlContext, runtime::Runtime};

mod list;
mod load;
mod platform;
mod resolve;

pub use list::list;
pub use load::load;
pub use platform::platform;
pub use resolve::resolve;

fn open_context<R: Runtime>(runtime: R, root: Option<PathBuf>) -> Result<TkhtmlContext<R>> {
    let config = Config::new(&runtime, root)?;
    Ok(TkhtmlContext::new(runtime, config))
}
