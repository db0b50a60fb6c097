//! Toolchain resolution: locate every tool, compose its flags, assemble the
//! immutable [`Toolchain`].

use std::collections::BTreeMap;

use applecxx_platform::{PlatformVariant, SdkPaths};
use serde::Serialize;
use tracing::debug;

use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::flags::FlagComposer;
use crate::locate::{ExecutableChecker, ExecutableLocator};
use crate::toolchain::{Flavor, ResolvedTool, ToolRole, Toolchain};

/// Helper tools recorded when present but never required.
const OPTIONAL_TOOLS: [&str; 3] = ["libtool", "lipo", "strip"];

/// What to resolve a toolchain for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolveRequest {
    pub platform: PlatformVariant,
    /// Versioned SDK name (e.g., "iphoneos8.0").
    pub sdk_name: String,
    /// SDK build identifier, carried through as metadata.
    pub build_version: String,
    /// Minimum deployment OS version (e.g., "7.0").
    pub min_version: String,
    pub architecture: String,
}

impl ResolveRequest {
    pub fn new(
        platform: PlatformVariant,
        sdk_name: impl Into<String>,
        build_version: impl Into<String>,
        min_version: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            sdk_name: sdk_name.into(),
            build_version: build_version.into(),
            min_version: min_version.into(),
            architecture: architecture.into(),
        }
    }

    /// Same request for a different architecture.
    pub fn for_architecture(&self, architecture: impl Into<String>) -> Self {
        Self {
            architecture: architecture.into(),
            ..self.clone()
        }
    }

    pub fn flavor(&self) -> Flavor {
        Flavor::of(&self.sdk_name, &self.architecture)
    }
}

/// Resolve a toolchain.
///
/// Fails with [`ToolNotFound`](crate::ToolchainError::ToolNotFound) as soon
/// as `clang`, `clang++` or `ar` is missing from every search directory.
pub fn resolve(
    request: &ResolveRequest,
    sdk_paths: &SdkPaths,
    overrides: &ConfigOverrides,
    checker: &dyn ExecutableChecker,
) -> Result<Toolchain> {
    let flavor = request.flavor();
    debug!(%flavor, build_version = %request.build_version, "resolving toolchain");

    let search_dirs = sdk_paths.tool_search_dirs();
    let locator = ExecutableLocator::new(checker);

    let mut located = BTreeMap::new();
    for role in ToolRole::ALL {
        let name = role.executable_name();
        if !located.contains_key(name) {
            located.insert(name, locator.locate(name, &search_dirs)?);
        }
    }

    let composer = FlagComposer::new(
        sdk_paths.sdk_path(),
        &request.architecture,
        &request.min_version,
        request.platform,
        overrides,
    );

    let tools = ToolRole::ALL
        .into_iter()
        .map(|role| {
            let name = role.executable_name();
            let tool = ResolvedTool::new(name, located[name].clone(), composer.flags_for(role));
            (role, tool)
        })
        .collect();

    let extra_tools = OPTIONAL_TOOLS
        .into_iter()
        .filter_map(|name| {
            locator
                .locate_optional(name, &search_dirs)
                .map(|path| (name.to_string(), path))
        })
        .collect();

    Ok(Toolchain::new(
        flavor,
        request.platform,
        request.sdk_name.clone(),
        request.build_version.clone(),
        request.min_version.clone(),
        request.architecture.clone(),
        tools,
        composer.into_categories(),
        extra_tools,
    ))
}

/// Resolve one toolchain per architecture, stopping at the first failure.
pub fn resolve_all<S: AsRef<str>>(
    request: &ResolveRequest,
    architectures: &[S],
    sdk_paths: &SdkPaths,
    overrides: &ConfigOverrides,
    checker: &dyn ExecutableChecker,
) -> Result<Vec<Toolchain>> {
    architectures
        .iter()
        .map(|arch| {
            resolve(
                &request.for_architecture(arch.as_ref()),
                sdk_paths,
                overrides,
                checker,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::locate::FixedExecutableChecker;

    fn sdk_paths() -> SdkPaths {
        SdkPaths::builder()
            .developer_path(".")
            .add_toolchain_path("Toolchains/XcodeDefault.xctoolchain")
            .platform_path("Platforms/iPhoneOS.platform")
            .sdk_path("Platforms/iPhoneOS.platform/Developer/SDKs/iPhoneOS8.0.sdk")
            .build()
            .unwrap()
    }

    fn checker() -> FixedExecutableChecker {
        FixedExecutableChecker::new([
            "Toolchains/XcodeDefault.xctoolchain/usr/bin/clang",
            "Toolchains/XcodeDefault.xctoolchain/usr/bin/clang++",
            "Platforms/iPhoneOS.platform/Developer/usr/bin/libtool",
            "Platforms/iPhoneOS.platform/Developer/usr/bin/ar",
        ])
    }

    fn request() -> ResolveRequest {
        ResolveRequest::new(PlatformVariant::IphoneOs, "iphoneos8.0", "12B411", "7.0", "armv7")
    }

    #[test]
    fn every_role_is_resolved() {
        let toolchain =
            resolve(&request(), &sdk_paths(), &ConfigOverrides::new(), &checker()).unwrap();
        assert_eq!(toolchain.tools().count(), ToolRole::ALL.len());
        assert_eq!(toolchain.cxxld().path(), toolchain.cxx().path());
        assert_eq!(toolchain.assembler().path(), toolchain.cc().path());
    }

    #[test]
    fn archiver_prefix_is_bare_path() {
        let toolchain =
            resolve(&request(), &sdk_paths(), &ConfigOverrides::new(), &checker()).unwrap();
        assert_eq!(
            toolchain.ar().command_prefix(),
            ["Platforms/iPhoneOS.platform/Developer/usr/bin/ar"]
        );
    }

    #[test]
    fn optional_tools_recorded_when_present() {
        let toolchain =
            resolve(&request(), &sdk_paths(), &ConfigOverrides::new(), &checker()).unwrap();
        assert_eq!(
            toolchain.extra_tool("libtool"),
            Some(PathBuf::from("Platforms/iPhoneOS.platform/Developer/usr/bin/libtool").as_path())
        );
        assert_eq!(toolchain.extra_tool("lipo"), None);
    }

    #[test]
    fn metadata_carried_through() {
        let toolchain =
            resolve(&request(), &sdk_paths(), &ConfigOverrides::new(), &checker()).unwrap();
        assert_eq!(toolchain.platform(), PlatformVariant::IphoneOs);
        assert_eq!(toolchain.sdk_name(), "iphoneos8.0");
        assert_eq!(toolchain.build_version(), "12B411");
        assert_eq!(toolchain.min_version(), "7.0");
        assert_eq!(toolchain.architecture(), "armv7");
    }

    #[test]
    fn build_version_does_not_change_flags() {
        let a = resolve(&request(), &sdk_paths(), &ConfigOverrides::new(), &checker()).unwrap();
        let mut other = request();
        other.build_version = "6A2008a".into();
        let b = resolve(&other, &sdk_paths(), &ConfigOverrides::new(), &checker()).unwrap();
        assert_eq!(a.cc(), b.cc());
        assert_eq!(a.cxxld(), b.cxxld());
        assert_eq!(a.flavor(), b.flavor());
    }

    #[test]
    fn resolve_all_per_architecture() {
        let toolchains = resolve_all(
            &request(),
            PlatformVariant::IphoneOs.default_architectures(),
            &sdk_paths(),
            &ConfigOverrides::new(),
            &checker(),
        )
        .unwrap();
        let flavors: Vec<_> = toolchains.iter().map(|t| t.flavor().to_string()).collect();
        assert_eq!(flavors, ["iphoneos8.0-armv7", "iphoneos8.0-arm64"]);
    }

    #[test]
    fn missing_archiver_fails() {
        let checker = FixedExecutableChecker::new([
            "Toolchains/XcodeDefault.xctoolchain/usr/bin/clang",
            "Toolchains/XcodeDefault.xctoolchain/usr/bin/clang++",
        ]);
        let err = resolve(&request(), &sdk_paths(), &ConfigOverrides::new(), &checker).unwrap_err();
        assert!(err.to_string().contains("Cannot find tool \"ar\""));
    }
}
