//! applecxx CLI — resolve Apple C/C++ toolchains from an installed SDK.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use applecxx_platform::PlatformVariant;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manifest::SdkArgs;

#[derive(Parser)]
#[command(name = "applecxx", version, about = "Apple C/C++ toolchain resolver")]
struct Cli {
    /// Configuration file (default: nearest applecxx.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve toolchains and print their tools and flags
    Resolve {
        /// Target platform (e.g., iphoneos, iphonesimulator, macosx)
        #[arg(long)]
        platform: PlatformVariant,
        /// Versioned SDK name (e.g., iphoneos8.0)
        #[arg(long)]
        sdk_name: Option<String>,
        /// SDK build identifier, recorded as metadata
        #[arg(long, default_value = "unknown")]
        build_version: String,
        /// Minimum deployment OS version (e.g., 7.0)
        #[arg(long)]
        min_version: String,
        /// Architecture; repeat for several (default: the platform's usual set)
        #[arg(long = "arch")]
        architectures: Vec<String>,
        #[command(flatten)]
        sdk: SdkPathArgs,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// List or describe platform variants
    Platforms {
        #[command(subcommand)]
        action: Option<PlatformsAction>,
    },
    /// Show where each tool is found for a platform
    Doctor {
        /// Target platform
        #[arg(long)]
        platform: PlatformVariant,
        /// Versioned SDK name (e.g., iphoneos8.0)
        #[arg(long)]
        sdk_name: Option<String>,
        #[command(flatten)]
        sdk: SdkPathArgs,
    },
}

#[derive(Subcommand)]
enum PlatformsAction {
    /// List all platform variants
    List,
    /// Show details of a platform variant
    Describe {
        /// Platform name
        name: String,
    },
}

#[derive(Args)]
struct SdkPathArgs {
    /// Xcode developer directory
    #[arg(long)]
    developer_path: Option<PathBuf>,
    /// Toolchain root; repeat to search several, in order
    #[arg(long = "toolchain-path")]
    toolchain_paths: Vec<PathBuf>,
    /// Platform bundle directory
    #[arg(long)]
    platform_path: Option<PathBuf>,
    /// SDK sysroot directory
    #[arg(long)]
    sdk_path: Option<PathBuf>,
}

impl From<SdkPathArgs> for SdkArgs {
    fn from(args: SdkPathArgs) -> Self {
        SdkArgs {
            developer_path: args.developer_path,
            toolchain_paths: args.toolchain_paths,
            platform_path: args.platform_path,
            sdk_path: args.sdk_path,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Resolve {
            platform,
            sdk_name,
            build_version,
            min_version,
            architectures,
            sdk,
            format,
        } => {
            let opts = commands::resolve::ResolveOptions {
                platform,
                sdk_name,
                build_version,
                min_version,
                architectures,
                sdk: sdk.into(),
                format,
            };
            commands::resolve::run(&cwd, cli.config.as_deref(), &opts)
        }

        Commands::Platforms { action } => match action {
            None | Some(PlatformsAction::List) => commands::platforms::list(),
            Some(PlatformsAction::Describe { name }) => commands::platforms::describe(&name),
        },

        Commands::Doctor {
            platform,
            sdk_name,
            sdk,
        } => commands::doctor::run(
            &cwd,
            cli.config.as_deref(),
            platform,
            sdk_name.as_deref(),
            &sdk.into(),
        ),
    }
}
