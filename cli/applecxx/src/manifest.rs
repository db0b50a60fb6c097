//! `applecxx.toml` configuration loading.
//!
//! ```toml
//! [sdk]
//! developer-path = "/Applications/Xcode.app/Contents/Developer"
//! toolchain-paths = ["Toolchains/XcodeDefault.xctoolchain"]
//!
//! [cxx]
//! cflags = "-std=gnu11"
//! cxxflags = "-std=c++11"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use applecxx_platform::{PlatformVariant, SdkPaths};
use applecxx_toolchain::ConfigOverrides;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "applecxx.toml";

/// The `[sdk]` table. Every entry can be overridden on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SdkConfig {
    #[serde(default)]
    pub developer_path: Option<PathBuf>,
    #[serde(default)]
    pub toolchain_paths: Vec<PathBuf>,
    #[serde(default)]
    pub platform_path: Option<PathBuf>,
    #[serde(default)]
    pub sdk_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    sdk: SdkConfig,
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default)]
pub struct ApplecxxConfig {
    pub sdk: SdkConfig,
    pub overrides: ConfigOverrides,
}

impl ApplecxxConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(s).context("parsing [sdk] table")?;
        let overrides = ConfigOverrides::from_toml_str(s).context("parsing [cxx] table")?;
        Ok(Self {
            sdk: file.sdk,
            overrides,
        })
    }

    /// Load an explicitly named configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load `explicit` if given, otherwise search upward from `cwd`.
    pub fn locate(cwd: &Path, explicit: Option<&Path>) -> Result<Option<(Self, PathBuf)>> {
        match explicit {
            Some(path) => Ok(Some((Self::load(path)?, path.to_path_buf()))),
            None => Self::find_and_load(cwd),
        }
    }

    /// Search upward from `start_dir` for `applecxx.toml`.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Ok(Some((Self::load(&candidate)?, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }
}

/// Command-line path arguments, taking precedence over `[sdk]`.
#[derive(Debug, Clone, Default)]
pub struct SdkArgs {
    pub developer_path: Option<PathBuf>,
    pub toolchain_paths: Vec<PathBuf>,
    pub platform_path: Option<PathBuf>,
    pub sdk_path: Option<PathBuf>,
}

/// Version suffix of an SDK name ("iphoneos8.0" -> "8.0").
pub fn sdk_version(sdk_name: &str) -> &str {
    let base_len = sdk_name
        .trim_end_matches(|c: char| c.is_ascii_digit() || c == '.')
        .len();
    &sdk_name[base_len..]
}

/// Merge command-line paths over configured ones.
///
/// Missing toolchain, platform and SDK paths fall back to the conventional
/// layout under the developer directory.
pub fn build_sdk_paths(
    args: &SdkArgs,
    config: &SdkConfig,
    platform: PlatformVariant,
    sdk_name: &str,
) -> Result<SdkPaths> {
    let developer_path = args
        .developer_path
        .clone()
        .or_else(|| config.developer_path.clone())
        .context("no developer path: pass --developer-path or set sdk.developer-path")?;

    let bundle = platform.bundle_name();
    let defaults = SdkPaths::from_developer_dir(
        &developer_path,
        bundle,
        &format!("{bundle}{}", sdk_version(sdk_name)),
    )?;

    let toolchain_paths: Vec<PathBuf> = if !args.toolchain_paths.is_empty() {
        args.toolchain_paths.clone()
    } else if !config.toolchain_paths.is_empty() {
        config.toolchain_paths.clone()
    } else {
        defaults.toolchain_paths().to_vec()
    };
    let platform_path = args
        .platform_path
        .clone()
        .or_else(|| config.platform_path.clone())
        .unwrap_or_else(|| defaults.platform_path().to_path_buf());
    let sdk_path = args
        .sdk_path
        .clone()
        .or_else(|| config.sdk_path.clone())
        .unwrap_or_else(|| defaults.sdk_path().to_path_buf());

    let paths = SdkPaths::builder()
        .developer_path(developer_path)
        .add_toolchain_paths(toolchain_paths)
        .platform_path(platform_path)
        .sdk_path(sdk_path)
        .build()?;
    Ok(paths)
}
