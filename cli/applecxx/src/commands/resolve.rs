//! `applecxx resolve` — print resolved toolchains.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use applecxx_platform::PlatformVariant;
use applecxx_toolchain::{
    resolve_all, ExecutableChecker, FlagCategory, FsExecutableChecker, ResolveRequest, Toolchain,
};
use tracing::debug;

use crate::manifest::{build_sdk_paths, ApplecxxConfig, SdkArgs};

/// Inputs gathered from the command line.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub platform: PlatformVariant,
    pub sdk_name: Option<String>,
    pub build_version: String,
    pub min_version: String,
    pub architectures: Vec<String>,
    pub sdk: SdkArgs,
    pub format: Option<String>,
}

/// Resolve and print one toolchain per architecture.
pub fn run(cwd: &Path, config_path: Option<&Path>, opts: &ResolveOptions) -> Result<()> {
    let output = resolve_to_string(cwd, config_path, opts, &FsExecutableChecker)?;
    print!("{output}");
    Ok(())
}

/// Resolve and render without printing.
pub fn resolve_to_string(
    cwd: &Path,
    config_path: Option<&Path>,
    opts: &ResolveOptions,
    checker: &dyn ExecutableChecker,
) -> Result<String> {
    let config = load_config(cwd, config_path)?;

    let sdk_name = opts
        .sdk_name
        .clone()
        .unwrap_or_else(|| opts.platform.name().to_string());
    let sdk_paths = build_sdk_paths(&opts.sdk, &config.sdk, opts.platform, &sdk_name)?;

    let architectures: Vec<String> = if opts.architectures.is_empty() {
        opts.platform
            .default_architectures()
            .iter()
            .map(|a| a.to_string())
            .collect()
    } else {
        opts.architectures.clone()
    };

    let request = ResolveRequest::new(
        opts.platform,
        sdk_name,
        opts.build_version.clone(),
        opts.min_version.clone(),
        String::new(),
    );
    let toolchains = resolve_all(&request, &architectures, &sdk_paths, &config.overrides, checker)
        .context("resolving toolchain")?;

    match opts.format.as_deref() {
        None | Some("human") => Ok(toolchains.iter().map(render_human).collect()),
        Some("json") => {
            let mut json = serde_json::to_string_pretty(&toolchains)?;
            json.push('\n');
            Ok(json)
        }
        Some(other) => bail!("unknown format '{other}' (expected human or json)"),
    }
}

fn load_config(cwd: &Path, config_path: Option<&Path>) -> Result<ApplecxxConfig> {
    match ApplecxxConfig::locate(cwd, config_path)? {
        Some((config, path)) => {
            debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(ApplecxxConfig::default()),
    }
}

/// Human-readable description of a toolchain.
pub fn render_human(toolchain: &Toolchain) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Toolchain: {} ===", toolchain.flavor());
    let _ = writeln!(out, "Platform:    {}", toolchain.platform());
    let _ = writeln!(
        out,
        "SDK:         {} (build {})",
        toolchain.sdk_name(),
        toolchain.build_version()
    );
    let _ = writeln!(out, "Min version: {}", toolchain.min_version());
    let _ = writeln!(out, "Arch:        {}", toolchain.architecture());
    let _ = writeln!(out);

    let _ = writeln!(out, "--- Tools ---");
    for (role, tool) in toolchain.tools() {
        let _ = writeln!(out, "  {:<6} {}", role.to_string(), tool.command_prefix().join(" "));
    }
    for name in ["libtool", "lipo", "strip"] {
        if let Some(path) = toolchain.extra_tool(name) {
            let _ = writeln!(out, "  {name:<6} {}", path.display());
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "--- Flags ---");
    for category in FlagCategory::ALL {
        let _ = writeln!(
            out,
            "  {:<10} {}",
            category.key(),
            toolchain.flags().get(category).join(" ")
        );
    }
    let _ = writeln!(out);
    out
}
