use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::binary::BinaryDescriptor;
use crate::runtime::Runtime;

use super::open_context;

/// List every Tkhtml binary available for this platform
#[tracing::instrument(skip(runtime, root))]
pub fn list<R: Runtime>(runtime: R, root: Option<PathBuf>) -> Result<()> {
    let context = open_context(runtime, root)?;
    let catalog = context.catalog()?;

    if catalog.is_empty() {
        println!("No Tkhtml binaries found in {}.", catalog.dir().display());
        return Ok(());
    }

    debug!("Found {} binaries", catalog.files().len());
    for binary in catalog.descriptors() {
        println!("{}", format_entry(&binary));
    }
    Ok(())
}

fn format_entry(binary: &BinaryDescriptor) -> String {
    let name = binary
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let channel = if binary.experimental {
        "experimental"
    } else {
        "stable"
    };
    format!("{} {} ({})", binary.version, channel, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;

    #[test]
    fn test_format_entry() {
        let binary = BinaryDescriptor {
            path: PathBuf::from("/tk/libTkhtml3.1exp.so"),
            version: "3.1".into(),
            experimental: true,
        };
        assert_eq!(format_entry(&binary), "3.1 experimental (libTkhtml3.1exp.so)");
    }

    #[test]
    fn test_list_empty_directory() {
        let mut runtime = MockRuntime::new();
        runtime.expect_read_dir().returning(|_| Ok(vec![]));

        assert!(list(runtime, Some(PathBuf::from("/tk"))).is_ok());
    }

    #[test]
    fn test_list_missing_directory() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_dir()
            .returning(|_| Err(anyhow::anyhow!("No such file or directory")));

        assert!(list(runtime, Some(PathBuf::from("/tk"))).is_err());
    }
}
