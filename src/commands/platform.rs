use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::runtime::Runtime;

/// Show the detected platform and where its binaries are expected
#[tracing::instrument(skip(runtime, root))]
pub fn platform<R: Runtime>(runtime: R, root: Option<PathBuf>) -> Result<()> {
    let config = Config::new(&runtime, root)?;
    let binary_dir = config.binary_dir();

    println!("platform: {}", config.platform);
    println!("directory: {}", binary_dir.display());
    if !runtime.is_dir(&binary_dir) {
        println!("(directory does not exist)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_platform_with_explicit_root() {
        let mut runtime = MockRuntime::new();
        let expected = crate::platform::PlatformTag::current().binary_dir(&PathBuf::from("/tk"));
        runtime
            .expect_is_dir()
            .with(eq(expected))
            .times(1)
            .returning(|_| false);

        assert!(platform(runtime, Some(PathBuf::from("/tk"))).is_ok());
    }
}
