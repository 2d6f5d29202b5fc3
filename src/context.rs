//! Process context tying configuration, the cached catalog and the loader together.

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

use crate::binary::{BinaryCatalog, BinaryDescriptor, BinarySelector, SelectRequest};
use crate::config::Config;
use crate::error::{Result, help_message};
use crate::interp::Interpreter;
use crate::loader::Loader;
use crate::runtime::{RealRuntime, Runtime};

static GLOBAL: OnceCell<TkhtmlContext<RealRuntime>> = OnceCell::new();

/// Resolved configuration plus the lazily listed candidate binaries.
///
/// The binary directory is listed at most once per context; later calls
/// reuse the cached catalog even if files are added in the meantime.
#[derive(Debug)]
pub struct TkhtmlContext<R: Runtime = RealRuntime> {
    runtime: R,
    config: Config,
    catalog: OnceCell<BinaryCatalog>,
}

impl TkhtmlContext<RealRuntime> {
    /// Process-wide context over the real runtime, created on first use.
    pub fn global() -> anyhow::Result<&'static Self> {
        GLOBAL.get_or_try_init(|| {
            let config = Config::new(&RealRuntime, None)?;
            Ok(Self::new(RealRuntime, config))
        })
    }
}

impl<R: Runtime> TkhtmlContext<R> {
    pub fn new(runtime: R, config: Config) -> Self {
        Self {
            runtime,
            config,
            catalog: OnceCell::new(),
        }
    }

    /// Context with a catalog supplied up front; the directory is never listed.
    pub fn with_catalog(runtime: R, config: Config, catalog: BinaryCatalog) -> Self {
        Self {
            runtime,
            config,
            catalog: OnceCell::with_value(catalog),
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn binary_dir(&self) -> PathBuf {
        self.config.binary_dir()
    }

    pub fn help_message(&self) -> String {
        help_message(&self.binary_dir())
    }

    pub fn catalog(&self) -> Result<&BinaryCatalog> {
        self.catalog
            .get_or_try_init(|| BinaryCatalog::scan(&self.runtime, &self.config.binary_dir()))
    }

    /// Pick a binary for `request` from the cached catalog.
    pub fn resolve_binary(&self, request: &SelectRequest) -> Result<BinaryDescriptor> {
        BinarySelector::new(self.catalog()?).select(request)
    }

    pub fn loader(&self) -> Loader<'_, R> {
        Loader::new(&self.runtime)
    }

    pub fn load_file<I: Interpreter + ?Sized>(&self, interp: &I, path: &Path) -> Result<()> {
        self.loader().load_file(interp, path)
    }

    /// Resolve a binary and load it in one step.
    pub fn load_best<I: Interpreter + ?Sized>(
        &self,
        interp: &I,
        request: &SelectRequest,
    ) -> Result<BinaryDescriptor> {
        let binary = self.resolve_binary(request)?;
        self.load_file(interp, &binary.path)?;
        Ok(binary)
    }

    pub fn query_loaded_version<I: Interpreter + ?Sized>(&self, interp: &I) -> Result<String> {
        self.loader().query_loaded_version(interp)
    }

    pub fn require_by_name<I: Interpreter + ?Sized>(&self, interp: &I) -> Result<String> {
        self.loader().require_by_name(interp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::ExperimentalMode;
    use crate::error::TkhtmlError;
    use crate::interp::MockInterpreter;
    use crate::platform::PlatformTag;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn config() -> Config {
        Config {
            root: PathBuf::from("/opt/tkhtml"),
            platform: PlatformTag::LinuxX86_64,
        }
    }

    fn binary_dir() -> PathBuf {
        PathBuf::from("/opt/tkhtml/manylinux1_x86_64")
    }

    #[test]
    fn test_global_is_created_once() {
        let first = TkhtmlContext::global().unwrap();
        let second = TkhtmlContext::global().unwrap();
        assert!(std::ptr::eq(first, second));

        let expected = Config::new(&RealRuntime, None).unwrap();
        assert_eq!(first.config(), &expected);
        assert_eq!(first.binary_dir(), expected.binary_dir());
        assert_eq!(first.config().platform, PlatformTag::current());
    }

    #[test]
    fn test_catalog_is_listed_once() {
        // --- Setup ---
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_dir()
            .with(eq(binary_dir()))
            .times(1)
            .returning(|dir| {
                Ok(vec![
                    dir.join("libTkhtml3.0.so"),
                    dir.join("libTkhtml3.1exp.so"),
                ])
            });
        let context = TkhtmlContext::new(runtime, config());

        // --- Execute & Verify ---
        let first = context.resolve_binary(&SelectRequest::latest()).unwrap();
        assert_eq!(first.path, binary_dir().join("libTkhtml3.0.so"));

        let second = context
            .resolve_binary(&SelectRequest::latest().with_experimental(ExperimentalMode::Auto))
            .unwrap();
        assert_eq!(second.path, binary_dir().join("libTkhtml3.1exp.so"));
    }

    #[test]
    fn test_with_catalog_never_lists() {
        let mut runtime = MockRuntime::new();
        runtime.expect_read_dir().never();
        let catalog = BinaryCatalog::new(binary_dir(), ["libTkhtml3.0.so"]);
        let context = TkhtmlContext::with_catalog(runtime, config(), catalog);

        let err = context
            .resolve_binary(&SelectRequest::version("9.9"))
            .unwrap_err();
        assert!(matches!(err, TkhtmlError::UnsupportedVersion { .. }));
        assert!(err.to_string().contains(&context.help_message()));
    }

    #[test]
    fn test_failed_listing_is_reported() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_dir()
            .returning(|_| Err(anyhow::anyhow!("No such file or directory")));
        let context = TkhtmlContext::new(runtime, config());

        let err = context.resolve_binary(&SelectRequest::latest()).unwrap_err();
        assert!(matches!(err, TkhtmlError::Catalog { .. }));
    }

    #[test]
    fn test_load_best() {
        // --- Setup ---
        let mut runtime = MockRuntime::new();
        runtime.expect_env_var_os().returning(|_| None);
        runtime.expect_set_env_var().times(1).returning(|_, _| Ok(()));
        let catalog = BinaryCatalog::new(
            binary_dir(),
            ["libTkhtml3.0.so", "libTkhtml3.1.so", "libTkhtml3.1exp.so"],
        );
        let context = TkhtmlContext::with_catalog(runtime, config(), catalog);

        let mut interp = MockInterpreter::new();
        interp
            .expect_load()
            .with(eq(binary_dir().join("libTkhtml3.1.so")))
            .times(1)
            .returning(|_| Ok(()));
        interp
            .expect_present()
            .with(eq("Tkhtml"))
            .returning(|_| Ok("3.1".to_string()));

        // --- Execute & Verify ---
        let loaded = context.load_best(&interp, &SelectRequest::latest()).unwrap();
        assert_eq!(loaded.version, "3.1");
        assert!(!loaded.experimental);
        assert_eq!(context.query_loaded_version(&interp).unwrap(), "3.1");
    }

    #[test]
    fn test_require_by_name_bypasses_catalog() {
        let mut runtime = MockRuntime::new();
        runtime.expect_read_dir().never();
        let context = TkhtmlContext::new(runtime, config());

        let mut interp = MockInterpreter::new();
        interp
            .expect_require()
            .returning(|_| Ok("3.0".to_string()));

        assert_eq!(context.require_by_name(&interp).unwrap(), "3.0");
    }
}
