//! `applecxx doctor` — report where each tool would be found.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use applecxx_platform::PlatformVariant;
use applecxx_toolchain::{ExecutableChecker, ExecutableLocator, FsExecutableChecker};

use crate::manifest::{build_sdk_paths, ApplecxxConfig, SdkArgs};

const REQUIRED: [&str; 3] = ["clang", "clang++", "ar"];
const OPTIONAL: [&str; 3] = ["libtool", "lipo", "strip"];

/// Print toolchain diagnostic information.
pub fn run(
    cwd: &Path,
    config_path: Option<&Path>,
    platform: PlatformVariant,
    sdk_name: Option<&str>,
    sdk: &SdkArgs,
) -> Result<()> {
    print!("{}", report(cwd, config_path, platform, sdk_name, sdk, &FsExecutableChecker)?);
    Ok(())
}

/// Build the diagnostic report. Missing tools are reported, not errors.
pub fn report(
    cwd: &Path,
    config_path: Option<&Path>,
    platform: PlatformVariant,
    sdk_name: Option<&str>,
    sdk: &SdkArgs,
    checker: &dyn ExecutableChecker,
) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "=== applecxx doctor ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "applecxx version: {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out);

    let config = match ApplecxxConfig::locate(cwd, config_path) {
        Ok(Some((config, path))) => {
            let _ = writeln!(out, "Config: {}", path.display());
            config
        }
        Ok(None) => {
            let _ = writeln!(out, "Config: not found");
            ApplecxxConfig::default()
        }
        Err(e) => {
            let _ = writeln!(out, "Config: error: {e:#}");
            ApplecxxConfig::default()
        }
    };

    let sdk_name = sdk_name.unwrap_or(platform.name());
    let paths = build_sdk_paths(sdk, &config.sdk, platform, sdk_name)?;
    let dirs = paths.tool_search_dirs();

    let _ = writeln!(out);
    let _ = writeln!(out, "--- SDK ---");
    let _ = writeln!(out, "  Platform: {platform}");
    let _ = writeln!(out, "  SDK:      {}", paths.sdk_path().display());
    let _ = writeln!(out, "  Search order:");
    for (i, dir) in dirs.iter().enumerate() {
        let _ = writeln!(out, "    {}. {}", i + 1, dir.display());
    }

    let locator = ExecutableLocator::new(checker);
    let _ = writeln!(out);
    let _ = writeln!(out, "--- Tools ---");
    let mut missing = 0;
    for (tool, required) in REQUIRED
        .iter()
        .map(|t| (*t, true))
        .chain(OPTIONAL.iter().map(|t| (*t, false)))
    {
        match locator.locate_optional(tool, &dirs) {
            Some(path) => {
                let _ = writeln!(out, "  {tool:<8} {}", path.display());
            }
            None if required => {
                missing += 1;
                let _ = writeln!(out, "  {tool:<8} NOT FOUND (required)");
            }
            None => {
                let _ = writeln!(out, "  {tool:<8} not found");
            }
        }
    }
    let _ = writeln!(out);
    if missing == 0 {
        let _ = writeln!(out, "Toolchain is complete.");
    } else {
        let _ = writeln!(out, "{missing} required tool(s) missing.");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use applecxx_toolchain::FixedExecutableChecker;

    use super::*;

    fn sdk_args() -> SdkArgs {
        SdkArgs {
            developer_path: Some(PathBuf::from("/Xcode/Developer")),
            ..SdkArgs::default()
        }
    }

    #[test]
    fn reports_missing_required_tools() {
        let dir = tempfile::tempdir().unwrap();
        let checker = FixedExecutableChecker::new([
            "/Xcode/Developer/Toolchains/XcodeDefault.xctoolchain/usr/bin/clang",
        ]);
        let out = report(
            dir.path(),
            None,
            PlatformVariant::IphoneOs,
            Some("iphoneos8.0"),
            &sdk_args(),
            &checker,
        )
        .unwrap();
        assert!(out.contains("clang++  NOT FOUND (required)"));
        assert!(out.contains("2 required tool(s) missing."));
        assert!(out.contains("1. /Xcode/Developer/Toolchains/XcodeDefault.xctoolchain/usr/bin"));
    }

    #[test]
    fn reports_complete_toolchain() {
        let dir = tempfile::tempdir().unwrap();
        let checker = FixedExecutableChecker::new([
            "/Xcode/Developer/Toolchains/XcodeDefault.xctoolchain/usr/bin/clang",
            "/Xcode/Developer/Toolchains/XcodeDefault.xctoolchain/usr/bin/clang++",
            "/Xcode/Developer/Platforms/MacOSX.platform/Developer/usr/bin/ar",
        ]);
        let out = report(
            dir.path(),
            None,
            PlatformVariant::MacOsX,
            Some("macosx10.10"),
            &sdk_args(),
            &checker,
        )
        .unwrap();
        assert!(out.contains("Toolchain is complete."));
        assert!(out.contains("lipo     not found"));
    }

    #[test]
    fn doctor_runs_without_error() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), None, PlatformVariant::IphoneOs, None, &sdk_args()).unwrap();
    }
}
