use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tkhtml_loader::binary::{ExperimentalMode, SelectRequest};
use tkhtml_loader::commands;
use tkhtml_loader::runtime::RealRuntime;

/// tkhtml - locate and load prebuilt Tkhtml binaries
///
/// Binaries are looked up in <ROOT>/<platform>/, where ROOT defaults to a
/// `tkhtml` directory next to this executable.
///
/// Examples:
///   tkhtml list                        # Show binaries for this platform
///   tkhtml resolve 3.1 --experimental true
///   tkhtml load                        # Load the newest stable binary
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Binary root directory (also via TKHTML_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "TKHTML_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub root: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the detected platform and its binary directory
    Platform,

    /// List the binaries available for this platform
    List,

    /// Show which binary a request resolves to
    Resolve(ResolveArgs),

    /// Load a binary into this process
    Load(LoadArgs),
}

#[derive(clap::Args, Debug)]
pub struct SelectArgs {
    /// Version to select (substring of the file name, e.g. "3.0")
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,

    /// Position among the sorted binaries when no version is given (-1 is the newest)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub index: i64,

    /// Release channel: true, false or auto
    #[arg(long, default_value = "false", value_name = "MODE")]
    pub experimental: ExperimentalMode,
}

impl SelectArgs {
    fn request(&self) -> SelectRequest {
        SelectRequest {
            version: self.version.clone(),
            index: self.index,
            experimental: self.experimental,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct LoadArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Let the interpreter find the package itself instead of selecting a file
    #[arg(long)]
    pub by_name: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    match cli.command {
        Commands::Platform => commands::platform(runtime, cli.root)?,
        Commands::List => commands::list(runtime, cli.root)?,
        Commands::Resolve(args) => {
            commands::resolve(runtime, cli.root, &args.select.request(), args.json)?
        }
        Commands::Load(args) => {
            commands::load(runtime, cli.root, &args.select.request(), args.by_name)?
        }
    }
    Ok(())
}
